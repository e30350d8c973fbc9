use crate::catalogue::BusStats;
use crate::queries::plan_routes::{Itinerary, RouterError};
use serde::{Deserialize, Serialize};

pub const NOT_FOUND: &str = "not found";

/// Consulta de `stat_requests`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: i64, name: String },
    Bus { id: i64, name: String },
    Map { id: i64 },
    Route { id: i64, from: String, to: String },
}

impl StatRequest {
    pub fn id(&self) -> i64 {
        match self {
            StatRequest::Stop { id, .. }
            | StatRequest::Bus { id, .. }
            | StatRequest::Map { id }
            | StatRequest::Route { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    NotFound { error_message: String },
    Stop { buses: Vec<String> },
    Bus(BusStats),
    Map { map: String },
    Route(Itinerary),
}

impl ResponseBody {
    pub fn not_found() -> Self {
        ResponseBody::NotFound {
            error_message: NOT_FOUND.to_string(),
        }
    }
}

/// Respuesta a una consulta; siempre repite el `id` recibido como `request_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub request_id: i64,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Render settings are missing, cannot answer map request {0}")]
    MissingRenderSettings(i64),
    #[error("Router error: {0}")]
    Router(#[from] RouterError),
}
