use crate::functions::RunError;
use crate::utils::{load_catalogue, read_document, BaseDocument, LoadError, Snapshot};
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, instrument};

/// Lee el documento base, construye el catálogo y guarda el snapshot en
/// `serialization_settings.file`. Devuelve la ruta escrita.
#[instrument(skip_all)]
pub fn make_base<R: Read>(reader: R) -> Result<PathBuf, RunError> {
    let document: BaseDocument = read_document(reader)?;

    if let Some(settings) = &document.render_settings {
        settings.validate().map_err(LoadError::from)?;
    }

    let catalogue = load_catalogue(&document.base_requests, document.routing_settings)?;
    let path = document.serialization_settings.file;
    Snapshot::capture(&catalogue, document.render_settings.as_ref()).save(&path)?;

    info!(path = %path.display(), "Base created");
    Ok(path)
}
