use crate::catalogue::RoutingSettingsConfig;
use crate::queries::StatRequest;
use crate::render::RenderSettings;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Entrada de `base_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop {
        name: String,
        latitude: f64,
        longitude: f64,
        #[serde(default)]
        road_distances: BTreeMap<String, u32>,
    },
    Bus {
        name: String,
        stops: Vec<String>,
        is_roundtrip: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SerializationSettings {
    pub file: PathBuf,
}

/// Documento de entrada del modo `make_base`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BaseDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,
    #[serde(default)]
    pub routing_settings: Option<RoutingSettingsConfig>,
    #[serde(default)]
    pub render_settings: Option<RenderSettings>,
    pub serialization_settings: SerializationSettings,
}

/// Documento de entrada del modo `process_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestDocument {
    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
    pub serialization_settings: SerializationSettings,
}
