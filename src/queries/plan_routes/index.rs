use crate::algorithms::{DirectedWeightedGraph, Edge, EdgeId, Router};
use crate::catalogue::{Bus, RoutingSettings, StopId, TransportCatalogue};
use crate::queries::plan_routes::_structs::*;
use tracing::{debug, info, instrument};

/// Planificador de itinerarios sobre el catálogo.
///
/// Cada arista del grafo representa "subir al autobús en la parada i y bajar
/// en la parada j" para todo par i < j de un mismo sentido, con peso igual a
/// la espera más el tiempo de viaje. Los vértices son las paradas (`StopId`).
pub struct TransportRouter<'a> {
    catalogue: &'a TransportCatalogue,
    settings: RoutingSettings,
    router: Router<f64>,
    edges: Vec<EdgeInfo>,
}

impl<'a> TransportRouter<'a> {
    #[instrument(skip(catalogue), fields(stops = catalogue.stop_count(), buses = catalogue.buses().len()))]
    pub fn new(catalogue: &'a TransportCatalogue) -> Result<Self, RouterError> {
        let settings = catalogue
            .routing_settings()
            .ok_or(RouterError::MissingRoutingSettings)?;

        let mut builder = GraphBuilder {
            catalogue,
            settings,
            graph: DirectedWeightedGraph::new(catalogue.stop_count()),
            edges: Vec::new(),
        };

        for bus in catalogue.buses() {
            if bus.is_roundtrip {
                builder.add_span_edges(bus, &bus.stops)?;
            } else {
                // Ida y vuelta se procesan como dos pasadas rectas independientes
                builder.add_span_edges(bus, &bus.stops)?;
                let inbound: Vec<StopId> = bus.stops.iter().rev().copied().collect();
                builder.add_span_edges(bus, &inbound)?;
            }
        }

        info!(
            vertices = builder.graph.vertex_count(),
            edges = builder.graph.edge_count(),
            "Route graph built"
        );

        Ok(Self {
            catalogue,
            settings,
            router: Router::new(builder.graph),
            edges: builder.edges,
        })
    }

    /// Itinerario más rápido entre dos paradas por nombre.
    ///
    /// Devuelve `None` si alguna parada no existe o si no hay camino.
    pub fn build_itinerary(&self, from: &str, to: &str) -> Option<Itinerary> {
        let from = self.catalogue.find_stop(from)?;
        let to = self.catalogue.find_stop(to)?;

        let route = self.router.build_route(from.id.index(), to.id.index())?;
        debug!(
            from = %from.name,
            to = %to.name,
            edges = route.edges.len(),
            "Route found"
        );

        let wait_time = self.settings.bus_wait_time() as f64;
        let items = route
            .edges
            .iter()
            .flat_map(|&edge_id| {
                let edge = self.router.graph().edge(edge_id);
                let info = self.edges[edge_id];
                let boarding = self.catalogue.stops()[edge.from].name.clone();

                [
                    ItineraryItem::Wait {
                        stop_name: boarding,
                        time: wait_time,
                    },
                    ItineraryItem::Bus {
                        bus: self.catalogue.bus(info.bus).name.clone(),
                        span_count: info.span_count,
                        time: edge.weight - wait_time,
                    },
                ]
            })
            .collect();

        Some(Itinerary {
            total_time: route.weight,
            items,
        })
    }

    pub fn edge_info(&self, edge_id: EdgeId) -> Option<&EdgeInfo> {
        self.edges.get(edge_id)
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<f64> {
        self.router.graph()
    }

    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }
}

struct GraphBuilder<'a> {
    catalogue: &'a TransportCatalogue,
    settings: RoutingSettings,
    graph: DirectedWeightedGraph<f64>,
    edges: Vec<EdgeInfo>,
}

impl GraphBuilder<'_> {
    /// Agrega una arista por cada par (i, j), i < j, de `stops`. El tiempo de
    /// cada tramo se suma una sola vez a medida que avanza j.
    fn add_span_edges(&mut self, bus: &Bus, stops: &[StopId]) -> Result<(), RouterError> {
        let wait_time = self.settings.bus_wait_time() as f64;

        for i in 0..stops.len() {
            let mut minutes = wait_time;
            for j in (i + 1)..stops.len() {
                let meters = self.catalogue.distance(stops[j - 1], stops[j]);
                minutes += self.settings.travel_minutes(meters);

                let edge_id = self.graph.add_edge(Edge {
                    from: stops[i].index(),
                    to: stops[j].index(),
                    weight: minutes,
                })?;
                debug_assert_eq!(edge_id, self.edges.len());
                self.edges.push(EdgeInfo {
                    bus: bus.id,
                    span_count: j - i,
                });
            }
        }

        Ok(())
    }
}
