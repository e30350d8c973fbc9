pub mod dijkstra;
pub mod graph;

pub use dijkstra::{RouteInfo, Router};
pub use graph::{DirectedWeightedGraph, Edge, EdgeId, GraphError, VertexId};
