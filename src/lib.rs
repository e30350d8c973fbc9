pub mod algorithms;
pub mod catalogue;
pub mod config;
pub mod functions;
pub mod queries;
pub mod render;
pub mod utils;

pub use catalogue::TransportCatalogue;
pub use config::{load_config, AppConfig};
pub use functions::*;
