use crate::catalogue::TransportCatalogue;
use crate::queries::_structs::ResponseBody;

pub fn find_bus_stats(catalogue: &TransportCatalogue, name: &str) -> ResponseBody {
    catalogue
        .bus_stats(name)
        .map_or_else(ResponseBody::not_found, ResponseBody::Bus)
}
