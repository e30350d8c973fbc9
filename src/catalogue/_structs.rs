use super::geo::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Índice estable de una parada dentro del catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(pub(crate) usize);

/// Índice estable de una ruta dentro del catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusId(pub(crate) usize);

impl StopId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl BusId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stop#{}", self.0)
    }
}

impl fmt::Display for BusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bus#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    /// Paradas en el orden en que fueron declaradas (sentido de ida).
    pub stops: Vec<StopId>,
    pub is_roundtrip: bool,
}

impl Bus {
    /// Recorrido completo del autobús: para rutas de ida y vuelta se agrega
    /// el regreso (todas las paradas menos la última, en orden inverso).
    pub fn full_route(&self) -> Vec<StopId> {
        if self.is_roundtrip {
            return self.stops.clone();
        }

        let mut route = Vec::with_capacity(self.stops.len() * 2);
        route.extend(self.stops.iter().copied());
        route.extend(self.stops.iter().rev().skip(1).copied());
        route
    }

    /// Parada final del sentido de ida.
    pub fn terminal(&self) -> Option<StopId> {
        self.stops.last().copied()
    }
}

/// Longitud de un recorrido: geográfica (metros, gran círculo) y real (metros medidos).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RouteLength {
    pub geo: f64,
    pub road: u64,
}

impl RouteLength {
    /// Relación entre la longitud real y la geográfica.
    /// `None` cuando la longitud geográfica es cero.
    pub fn curvature(&self) -> Option<f64> {
        if self.geo == 0.0 {
            None
        } else {
            Some(self.road as f64 / self.geo)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusStats {
    pub stop_count: usize,
    pub unique_stop_count: usize,
    pub route_length: u64,
    pub curvature: Option<f64>,
}

/// Parámetros de ruteo tal como llegan en el documento de entrada o en el snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettingsConfig {
    pub bus_wait_time: i64,
    pub bus_velocity: f64,
}

/// Parámetros de ruteo validados: espera en minutos y velocidad en km/h.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoutingSettings {
    bus_wait_time: u32,
    bus_velocity: f64,
}

impl RoutingSettings {
    pub fn new(bus_wait_time: i64, bus_velocity: f64) -> Result<Self, CatalogueError> {
        let wait = u32::try_from(bus_wait_time)
            .map_err(|_| CatalogueError::InvalidWaitTime(bus_wait_time))?;

        if !bus_velocity.is_finite() || bus_velocity <= 0.0 {
            return Err(CatalogueError::InvalidVelocity(bus_velocity));
        }

        Ok(Self {
            bus_wait_time: wait,
            bus_velocity,
        })
    }

    pub fn bus_wait_time(&self) -> u32 {
        self.bus_wait_time
    }

    pub fn bus_velocity(&self) -> f64 {
        self.bus_velocity
    }

    /// Minutos necesarios para recorrer `meters` a la velocidad configurada.
    pub fn travel_minutes(&self, meters: u32) -> f64 {
        (meters as f64 / 1000.0) / self.bus_velocity * 60.0
    }
}

impl TryFrom<RoutingSettingsConfig> for RoutingSettings {
    type Error = CatalogueError;

    fn try_from(config: RoutingSettingsConfig) -> Result<Self, Self::Error> {
        Self::new(config.bus_wait_time, config.bus_velocity)
    }
}

impl From<RoutingSettings> for RoutingSettingsConfig {
    fn from(settings: RoutingSettings) -> Self {
        Self {
            bus_wait_time: settings.bus_wait_time as i64,
            bus_velocity: settings.bus_velocity,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CatalogueError {
    #[error("Stop already exists: {0}")]
    DuplicateStop(String),
    #[error("Bus already exists: {0}")]
    DuplicateBus(String),
    #[error("Unknown stop: {0}")]
    UnknownStop(String),
    #[error("Bus {0} must have at least two stops")]
    TooFewStops(String),
    #[error("Bus {bus}: no measured distance between {from} and {to}")]
    MissingDistance {
        bus: String,
        from: String,
        to: String,
    },
    #[error("Invalid bus wait time: {0}")]
    InvalidWaitTime(i64),
    #[error("Invalid bus velocity: {0}")]
    InvalidVelocity(f64),
}
