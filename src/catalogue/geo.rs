use serde::{Deserialize, Serialize};

/// Radio medio de la Tierra en metros.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Distancia sobre la esfera (ley de los cosenos) entre dos coordenadas, en metros.
///
/// Para puntos casi idénticos o antípodas el resultado es aproximado; sólo la
/// igualdad exacta devuelve 0.
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }

    let dr = std::f64::consts::PI / 180.0;
    let cos_angle = (from.lat * dr).sin() * (to.lat * dr).sin()
        + (from.lat * dr).cos() * (to.lat * dr).cos() * ((from.lng - to.lng).abs() * dr).cos();

    cos_angle.acos() * EARTH_RADIUS
}
