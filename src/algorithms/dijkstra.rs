use super::graph::{DirectedWeightedGraph, EdgeId, VertexId};
use num_traits::float::FloatCore;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, instrument};

/// Resultado de una consulta: peso total y aristas del camino en orden.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInfo<W> {
    pub weight: W,
    pub edges: Vec<EdgeId>,
}

#[derive(Debug, Clone, Copy)]
struct RouteInternalData<W> {
    weight: W,
    prev_edge: Option<EdgeId>,
}

/// Índice de caminos mínimos precalculado para todos los orígenes.
///
/// Guarda, por cada par (origen, vértice), el mejor peso conocido y la arista
/// que lo alcanzó. Se guarda la arista y no el vértice previo porque entre dos
/// vértices puede haber varias aristas paralelas con distinta información.
#[derive(Debug)]
pub struct Router<W> {
    graph: DirectedWeightedGraph<W>,
    routes: Vec<Vec<Option<RouteInternalData<W>>>>,
}

impl<W> Router<W>
where
    W: FloatCore + Send + Sync,
{
    /// Construye el índice ejecutando Dijkstra desde cada vértice.
    /// Los orígenes se procesan en paralelo sobre el pool de rayon activo.
    #[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
    pub fn new(graph: DirectedWeightedGraph<W>) -> Self {
        let routes = (0..graph.vertex_count())
            .into_par_iter()
            .map(|source| shortest_paths_from(&graph, source))
            .collect();

        debug!("Shortest path index ready");
        Self { graph, routes }
    }

    pub fn graph(&self) -> &DirectedWeightedGraph<W> {
        &self.graph
    }

    /// Camino mínimo `from -> to`, o `None` si `to` no es alcanzable.
    pub fn build_route(&self, from: VertexId, to: VertexId) -> Option<RouteInfo<W>> {
        let target = (*self.routes.get(from)?.get(to)?)?;

        let mut edges = Vec::new();
        let mut prev_edge = target.prev_edge;
        while let Some(edge_id) = prev_edge {
            edges.push(edge_id);
            let edge = self.graph.edge(edge_id);
            prev_edge = self.routes[from][edge.from].and_then(|data| data.prev_edge);
        }
        edges.reverse();

        Some(RouteInfo {
            weight: target.weight,
            edges,
        })
    }
}

/// Dijkstra clásico desde `source`. Sólo se relaja con mejora estricta, de modo
/// que ante empates gana la primera arista descubierta.
fn shortest_paths_from<W: FloatCore>(
    graph: &DirectedWeightedGraph<W>,
    source: VertexId,
) -> Vec<Option<RouteInternalData<W>>> {
    let mut routes: Vec<Option<RouteInternalData<W>>> = vec![None; graph.vertex_count()];
    routes[source] = Some(RouteInternalData {
        weight: W::zero(),
        prev_edge: None,
    });

    // (peso, orden de descubrimiento, vértice)
    let mut queue = BinaryHeap::new();
    let mut sequence = 0usize;
    queue.push(Reverse((OrderedFloat(W::zero()), sequence, source)));

    while let Some(Reverse((OrderedFloat(weight), _, vertex))) = queue.pop() {
        let best = match routes[vertex] {
            Some(data) => data.weight,
            None => continue,
        };
        if weight > best {
            continue;
        }

        for &edge_id in graph.outgoing_edges(vertex) {
            let edge = graph.edge(edge_id);
            let candidate = weight + edge.weight;
            let improves = match routes[edge.to] {
                Some(data) => candidate < data.weight,
                None => true,
            };

            if improves {
                routes[edge.to] = Some(RouteInternalData {
                    weight: candidate,
                    prev_edge: Some(edge_id),
                });
                sequence += 1;
                queue.push(Reverse((OrderedFloat(candidate), sequence, edge.to)));
            }
        }
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::graph::Edge;

    fn graph_from(vertex_count: usize, edges: &[(usize, usize, f64)]) -> DirectedWeightedGraph<f64> {
        let mut graph = DirectedWeightedGraph::new(vertex_count);
        for &(from, to, weight) in edges {
            graph.add_edge(Edge { from, to, weight }).unwrap();
        }
        graph
    }

    #[test]
    fn test_shortest_route() {
        let graph = graph_from(4, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0), (2, 3, 1.0)]);
        let router = Router::new(graph);

        let route = router.build_route(0, 3).unwrap();
        assert_eq!(route.weight, 3.0);
        assert_eq!(route.edges, vec![0, 1, 3]);
    }

    #[test]
    fn test_route_to_itself_is_empty() {
        let graph = graph_from(2, &[(0, 1, 1.0), (1, 0, 1.0)]);
        let router = Router::new(graph);

        let route = router.build_route(1, 1).unwrap();
        assert_eq!(route.weight, 0.0);
        assert!(route.edges.is_empty());
    }

    #[test]
    fn test_unreachable_and_out_of_range() {
        let graph = graph_from(3, &[(0, 1, 1.0)]);
        let router = Router::new(graph);

        assert!(router.build_route(1, 0).is_none());
        assert!(router.build_route(0, 2).is_none());
        assert!(router.build_route(0, 7).is_none());
        assert!(router.build_route(7, 0).is_none());
    }

    #[test]
    fn test_ties_prefer_first_inserted_edge() {
        // Dos aristas paralelas con el mismo peso y un camino alternativo igual de largo
        let graph = graph_from(3, &[(0, 2, 2.0), (0, 2, 2.0), (0, 1, 1.0), (1, 2, 1.0)]);
        let router = Router::new(graph);

        for _ in 0..5 {
            let route = router.build_route(0, 2).unwrap();
            assert_eq!(route.weight, 2.0);
            assert_eq!(route.edges, vec![0]);
        }
    }

    #[test]
    fn test_results_do_not_depend_on_thread_count() {
        let edges = [
            (0, 1, 4.0),
            (0, 2, 1.0),
            (2, 1, 2.0),
            (1, 3, 1.0),
            (2, 3, 5.0),
            (3, 4, 3.0),
            (0, 4, 10.0),
        ];

        let single = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .unwrap()
            .install(|| Router::new(graph_from(5, &edges)));
        let multi = rayon::ThreadPoolBuilder::new()
            .num_threads(4)
            .build()
            .unwrap()
            .install(|| Router::new(graph_from(5, &edges)));

        for from in 0..5 {
            for to in 0..5 {
                assert_eq!(single.build_route(from, to), multi.build_route(from, to));
            }
        }
        assert_eq!(single.build_route(0, 4).unwrap().edges, vec![1, 2, 3, 5]);
    }
}
