use crate::catalogue::{CatalogueError, Coordinates, RoutingSettings, RoutingSettingsConfig, TransportCatalogue};
use crate::render::RenderSettingsError;
use crate::utils::_structs::*;
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use std::io::Read;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid catalogue data: {0}")]
    Catalogue(#[from] CatalogueError),
    #[error("Invalid render settings: {0}")]
    RenderSettings(#[from] RenderSettingsError),
}

/// Lee un documento JSON completo desde `reader`.
pub fn read_document<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, LoadError> {
    serde_json::from_reader(reader).map_err(|e| {
        error!("Failed to parse input document: {}", e);
        LoadError::Json(e)
    })
}

/// Construye el catálogo a partir de `base_requests`.
///
/// Las paradas se insertan primero, luego las distancias y por último las
/// rutas, de modo que el orden dentro del documento no importa.
pub fn load_catalogue(
    requests: &[BaseRequest],
    routing_settings: Option<RoutingSettingsConfig>,
) -> Result<TransportCatalogue, LoadError> {
    let mut catalogue = TransportCatalogue::new();

    for request in requests {
        if let BaseRequest::Stop {
            name,
            latitude,
            longitude,
            ..
        } = request
        {
            catalogue.add_stop(name.as_str(), Coordinates::new(*latitude, *longitude))?;
        }
    }

    for request in requests {
        if let BaseRequest::Stop {
            name,
            road_distances,
            ..
        } = request
        {
            for (to, meters) in road_distances {
                catalogue.add_distance(name, *meters, to)?;
            }
        }
    }

    for request in requests {
        if let BaseRequest::Bus {
            name,
            stops,
            is_roundtrip,
        } = request
        {
            catalogue.add_bus(name.as_str(), stops, *is_roundtrip)?;
        }
    }

    match routing_settings {
        Some(config) => catalogue.set_routing_settings(RoutingSettings::try_from(config)?),
        None => debug!("No routing settings in document"),
    }

    info!(
        "Catalogue loaded: {} stops, {} buses",
        catalogue.stop_count(),
        catalogue.buses().len()
    );
    Ok(catalogue)
}
