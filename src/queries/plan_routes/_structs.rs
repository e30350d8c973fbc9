use crate::algorithms::GraphError;
use crate::catalogue::BusId;
use serde::Serialize;

/// Información asociada a cada arista del grafo de rutas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeInfo {
    pub bus: BusId,
    /// Cantidad de tramos recorridos sin bajarse del autobús.
    pub span_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ItineraryItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl ItineraryItem {
    pub fn time(&self) -> f64 {
        match self {
            ItineraryItem::Wait { time, .. } | ItineraryItem::Bus { time, .. } => *time,
        }
    }
}

/// Itinerario de tiempo mínimo entre dos paradas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Itinerary {
    pub total_time: f64,
    pub items: Vec<ItineraryItem>,
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("Routing settings are missing")]
    MissingRoutingSettings,
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}
