pub mod _structs;
pub mod load_catalogue;
pub mod snapshot;

pub use _structs::{BaseDocument, BaseRequest, RequestDocument, SerializationSettings};
pub use load_catalogue::{load_catalogue, read_document, LoadError};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
