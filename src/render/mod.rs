pub mod map_renderer;
pub mod settings;
pub mod svg;

pub use map_renderer::{render_map, MapItem, SphereProjector};
pub use settings::{RenderSettings, RenderSettingsError};
