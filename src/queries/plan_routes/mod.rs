pub mod _structs;
pub mod index;

pub use _structs::{EdgeInfo, Itinerary, ItineraryItem, RouterError};
pub use index::TransportRouter;
