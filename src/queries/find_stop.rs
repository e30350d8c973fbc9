use crate::catalogue::TransportCatalogue;
use crate::queries::_structs::ResponseBody;

/// Rutas que pasan por la parada, ordenadas por nombre.
pub fn find_stop_buses(catalogue: &TransportCatalogue, name: &str) -> ResponseBody {
    match catalogue.buses_serving(name) {
        Some(buses) => ResponseBody::Stop {
            buses: buses.iter().cloned().collect(),
        },
        None => ResponseBody::not_found(),
    }
}
