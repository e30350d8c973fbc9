use crate::catalogue::TransportCatalogue;
use crate::queries::_structs::ResponseBody;
use crate::render::{render_map, RenderSettings};

/// Mapa completo como cadena SVG.
pub fn render_map_svg(catalogue: &TransportCatalogue, settings: &RenderSettings) -> ResponseBody {
    ResponseBody::Map {
        map: render_map(catalogue, settings).to_string(),
    }
}
