use crate::catalogue::{CatalogueError, Coordinates, RoutingSettings, RoutingSettingsConfig, TransportCatalogue};
use crate::render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("MessagePack encode error: {0}")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("MessagePack decode error: {0}")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("Unsupported snapshot version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("Inconsistent snapshot: {0}")]
    Inconsistent(String),
    #[error("Invalid catalogue data: {0}")]
    Catalogue(#[from] CatalogueError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub name: String,
    pub coordinates: Coordinates,
}

/// Ruta con sus paradas referidas por índice en `Snapshot::stops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRecord {
    pub name: String,
    pub stops: Vec<usize>,
    pub is_roundtrip: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceRecord {
    pub from: usize,
    pub to: usize,
    pub meters: u32,
}

/// Estado persistido entre `make_base` y `process_requests`.
///
/// Sólo se guardan los datos del catálogo y la configuración; el grafo de rutas
/// se reconstruye al leer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub stops: Vec<StopRecord>,
    pub buses: Vec<BusRecord>,
    pub distances: Vec<DistanceRecord>,
    pub routing_settings: Option<RoutingSettingsConfig>,
    pub render_settings: Option<RenderSettings>,
}

impl Snapshot {
    pub fn capture(catalogue: &TransportCatalogue, render_settings: Option<&RenderSettings>) -> Self {
        let stops = catalogue
            .stops()
            .iter()
            .map(|stop| StopRecord {
                name: stop.name.clone(),
                coordinates: stop.coordinates,
            })
            .collect();

        let buses = catalogue
            .buses()
            .iter()
            .map(|bus| BusRecord {
                name: bus.name.clone(),
                stops: bus.stops.iter().map(|id| id.index()).collect(),
                is_roundtrip: bus.is_roundtrip,
            })
            .collect();

        let distances = catalogue
            .measured_distances()
            .map(|(from, to, meters)| DistanceRecord {
                from: from.index(),
                to: to.index(),
                meters,
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            stops,
            buses,
            distances,
            routing_settings: catalogue.routing_settings().map(RoutingSettingsConfig::from),
            render_settings: render_settings.cloned(),
        }
    }

    /// Reconstruye el catálogo. Devuelve también la configuración de dibujo guardada.
    pub fn restore(self) -> Result<(TransportCatalogue, Option<RenderSettings>), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version {
                found: self.version,
                expected: SNAPSHOT_VERSION,
            });
        }

        let mut catalogue = TransportCatalogue::new();
        for stop in &self.stops {
            catalogue.add_stop(stop.name.as_str(), stop.coordinates)?;
        }

        let stop_name = |index: usize| -> Result<&str, SnapshotError> {
            self.stops
                .get(index)
                .map(|stop| stop.name.as_str())
                .ok_or_else(|| SnapshotError::Inconsistent(format!("stop index {} out of range", index)))
        };

        for distance in &self.distances {
            catalogue.add_distance(stop_name(distance.from)?, distance.meters, stop_name(distance.to)?)?;
        }

        for bus in &self.buses {
            let names = bus
                .stops
                .iter()
                .map(|&index| stop_name(index))
                .collect::<Result<Vec<_>, _>>()?;
            catalogue.add_bus(bus.name.as_str(), &names, bus.is_roundtrip)?;
        }

        if let Some(config) = self.routing_settings {
            catalogue.set_routing_settings(RoutingSettings::try_from(config)?);
        }

        Ok((catalogue, self.render_settings))
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        let mut encoder = rmp_serde::encode::Serializer::new(&mut writer).with_struct_map();
        self.serialize(&mut encoder)?;
        writer.flush()?;

        info!(
            stops = self.stops.len(),
            buses = self.buses.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let snapshot: Snapshot = rmp_serde::decode::from_read(reader)?;

        debug!(version = snapshot.version, "Snapshot read");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::plan_routes::TransportRouter;
    use crate::render::svg::Color;
    use tempfile::tempdir;

    fn sample_catalogue() -> TransportCatalogue {
        let mut catalogue = TransportCatalogue::new();
        catalogue.add_stop("Zagorye", Coordinates::new(55.579909, 37.68372)).unwrap();
        catalogue.add_stop("Lipetskaya", Coordinates::new(55.581065, 37.64839)).unwrap();
        catalogue.add_stop("Moskvorechye", Coordinates::new(55.638433, 37.638433)).unwrap();
        catalogue.add_distance("Zagorye", 10000, "Lipetskaya").unwrap();
        catalogue.add_distance("Lipetskaya", 3000, "Moskvorechye").unwrap();
        catalogue.add_distance("Moskvorechye", 3500, "Lipetskaya").unwrap();
        catalogue.add_distance("Moskvorechye", 8000, "Zagorye").unwrap();
        catalogue
            .add_bus("289", &["Zagorye", "Lipetskaya", "Moskvorechye", "Zagorye"], true)
            .unwrap();
        catalogue
            .add_bus("14", &["Lipetskaya", "Moskvorechye"], false)
            .unwrap();
        catalogue.set_routing_settings(RoutingSettings::new(2, 30.0).unwrap());
        catalogue
    }

    fn render_settings() -> RenderSettings {
        RenderSettings {
            width: 600.0,
            height: 400.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: [7.0, 15.0].into(),
            stop_label_font_size: 20,
            stop_label_offset: [7.0, -3.0].into(),
            underlayer_color: Color::Rgba(255, 255, 255, 0.85),
            underlayer_width: 3.0,
            color_palette: vec![Color::from("green"), Color::Rgb(255, 160, 0), Color::None],
        }
    }

    #[test]
    fn test_round_trip_preserves_catalogue() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("transport.db");
        let catalogue = sample_catalogue();
        let settings = render_settings();

        let snapshot = Snapshot::capture(&catalogue, Some(&settings));
        snapshot.save(&path).unwrap();
        let loaded = Snapshot::load(&path).unwrap();
        assert_eq!(loaded, snapshot);

        let (restored, restored_settings) = loaded.restore().unwrap();
        assert_eq!(restored_settings, Some(settings));
        assert_eq!(restored.stops(), catalogue.stops());
        assert_eq!(restored.buses(), catalogue.buses());
        assert_eq!(restored.routing_settings(), catalogue.routing_settings());
        assert_eq!(
            restored.measured_distances().collect::<Vec<_>>(),
            catalogue.measured_distances().collect::<Vec<_>>()
        );
        for bus in ["289", "14"] {
            assert_eq!(restored.bus_stats(bus), catalogue.bus_stats(bus));
        }

        let before = TransportRouter::new(&catalogue).unwrap();
        let after = TransportRouter::new(&restored).unwrap();
        for (from, to) in [("Zagorye", "Moskvorechye"), ("Moskvorechye", "Lipetskaya"), ("Lipetskaya", "Zagorye")] {
            assert_eq!(before.build_itinerary(from, to), after.build_itinerary(from, to));
        }
    }

    #[test]
    fn test_version_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("old.db");
        let mut snapshot = Snapshot::capture(&sample_catalogue(), None);
        snapshot.version = 99;
        snapshot.save(&path).unwrap();

        let result = Snapshot::load(&path).unwrap().restore();
        assert!(matches!(
            result,
            Err(SnapshotError::Version { found: 99, expected: SNAPSHOT_VERSION })
        ));
    }

    #[test]
    fn test_corrupted_and_missing_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.db");
        std::fs::write(&path, b"definitely not messagepack").unwrap();

        assert!(matches!(Snapshot::load(&path), Err(SnapshotError::Decode(_))));
        assert!(matches!(
            Snapshot::load(dir.path().join("missing.db")),
            Err(SnapshotError::Io(_))
        ));
    }

    #[test]
    fn test_out_of_range_stop_index() {
        let mut snapshot = Snapshot::capture(&sample_catalogue(), None);
        snapshot.buses[0].stops.push(42);

        assert!(matches!(snapshot.restore(), Err(SnapshotError::Inconsistent(_))));
    }
}
