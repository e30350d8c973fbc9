pub mod make_base;
pub mod process_requests;

pub use make_base::make_base;
pub use process_requests::process_requests;

use crate::queries::QueryError;
use crate::utils::{LoadError, SnapshotError};

/// Errores fatales de una ejecución completa.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Failed to write output: {0}")]
    Output(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
