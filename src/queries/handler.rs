use crate::catalogue::TransportCatalogue;
use crate::queries::_structs::*;
use crate::queries::find_bus::find_bus_stats;
use crate::queries::find_stop::find_stop_buses;
use crate::queries::plan_routes::{RouterError, TransportRouter};
use crate::queries::render_map::render_map_svg;
use crate::render::RenderSettings;
use std::cell::OnceCell;
use tracing::{debug, info, instrument, warn};

/// Despacha las consultas sobre un catálogo ya cargado.
///
/// El planificador se construye la primera vez que llega una consulta `Route`
/// y se reutiliza en las siguientes.
pub struct RequestHandler<'a> {
    catalogue: &'a TransportCatalogue,
    render_settings: Option<&'a RenderSettings>,
    router: OnceCell<TransportRouter<'a>>,
}

impl<'a> RequestHandler<'a> {
    pub fn new(catalogue: &'a TransportCatalogue, render_settings: Option<&'a RenderSettings>) -> Self {
        Self {
            catalogue,
            render_settings,
            router: OnceCell::new(),
        }
    }

    pub fn answer(&self, request: &StatRequest) -> Result<Response, QueryError> {
        let body = match request {
            StatRequest::Stop { name, .. } => find_stop_buses(self.catalogue, name),
            StatRequest::Bus { name, .. } => find_bus_stats(self.catalogue, name),
            StatRequest::Map { id } => {
                let settings = self
                    .render_settings
                    .ok_or(QueryError::MissingRenderSettings(*id))?;
                render_map_svg(self.catalogue, settings)
            }
            StatRequest::Route { from, to, .. } => self
                .router()?
                .build_itinerary(from, to)
                .map_or_else(ResponseBody::not_found, ResponseBody::Route),
        };

        if matches!(body, ResponseBody::NotFound { .. }) {
            warn!(request_id = request.id(), "Request answered with not found");
        } else {
            debug!(request_id = request.id(), "Request answered");
        }
        Ok(Response {
            request_id: request.id(),
            body,
        })
    }

    #[instrument(skip_all, fields(requests = requests.len()))]
    pub fn answer_all(&self, requests: &[StatRequest]) -> Result<Vec<Response>, QueryError> {
        let responses = requests
            .iter()
            .map(|request| self.answer(request))
            .collect::<Result<Vec<_>, _>>()?;

        info!(answered = responses.len(), "Requests processed");
        Ok(responses)
    }

    pub fn is_router_built(&self) -> bool {
        self.router.get().is_some()
    }

    fn router(&self) -> Result<&TransportRouter<'a>, RouterError> {
        if let Some(router) = self.router.get() {
            return Ok(router);
        }
        let router = TransportRouter::new(self.catalogue)?;
        Ok(self.router.get_or_init(|| router))
    }
}
