use crate::config::AppConfig;
use crate::functions::RunError;
use crate::queries::{RequestHandler, Response};
use crate::utils::{read_document, RequestDocument, Snapshot};
use std::io::{Read, Write};
use tracing::{info, instrument};

/// Restaura el snapshot indicado en el documento, responde `stat_requests` y
/// escribe el arreglo de respuestas en `writer`.
#[instrument(skip_all, fields(threads = config.router_threads))]
pub fn process_requests<R: Read, W: Write>(
    reader: R,
    mut writer: W,
    config: &AppConfig,
) -> Result<(), RunError> {
    let document: RequestDocument = read_document(reader)?;
    let (catalogue, render_settings) =
        Snapshot::load(&document.serialization_settings.file)?.restore()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.router_threads)
        .build()?;
    let responses: Vec<Response> = pool.install(|| {
        RequestHandler::new(&catalogue, render_settings.as_ref()).answer_all(&document.stat_requests)
    })?;

    if config.pretty_output {
        serde_json::to_writer_pretty(&mut writer, &responses)?;
    } else {
        serde_json::to_writer(&mut writer, &responses)?;
    }
    writeln!(writer)?;
    writer.flush()?;

    info!(responses = responses.len(), "Responses written");
    Ok(())
}
