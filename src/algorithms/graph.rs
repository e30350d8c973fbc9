use num_traits::Zero;

pub type VertexId = usize;
pub type EdgeId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<W> {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: W,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum GraphError {
    #[error("Vertex {vertex} out of range (graph has {vertex_count} vertices)")]
    VertexOutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },
    #[error("Negative edge weight between {from} and {to}")]
    NegativeWeight { from: VertexId, to: VertexId },
}

/// Grafo dirigido y ponderado. Las aristas sólo se agregan, nunca se quitan
/// ni cambian de peso; sus identificadores son secuenciales.
#[derive(Debug, Clone, Default)]
pub struct DirectedWeightedGraph<W> {
    edges: Vec<Edge<W>>,
    incidence_lists: Vec<Vec<EdgeId>>,
}

impl<W> DirectedWeightedGraph<W>
where
    W: Copy + PartialOrd + Zero,
{
    pub fn new(vertex_count: usize) -> Self {
        Self {
            edges: Vec::new(),
            incidence_lists: vec![Vec::new(); vertex_count],
        }
    }

    /// Reserva `count` vértices adicionales.
    pub fn add_vertices(&mut self, count: usize) {
        let new_len = self.incidence_lists.len() + count;
        self.incidence_lists.resize_with(new_len, Vec::new);
    }

    pub fn add_edge(&mut self, edge: Edge<W>) -> Result<EdgeId, GraphError> {
        for vertex in [edge.from, edge.to] {
            if vertex >= self.vertex_count() {
                return Err(GraphError::VertexOutOfRange {
                    vertex,
                    vertex_count: self.vertex_count(),
                });
            }
        }
        if edge.weight < W::zero() {
            return Err(GraphError::NegativeWeight {
                from: edge.from,
                to: edge.to,
            });
        }

        let id = self.edges.len();
        self.edges.push(edge);
        self.incidence_lists[edge.from].push(id);
        Ok(id)
    }

    pub fn vertex_count(&self) -> usize {
        self.incidence_lists.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<W> {
        &self.edges[id]
    }

    /// Aristas salientes de `vertex` en orden de inserción.
    pub fn outgoing_edges(&self, vertex: VertexId) -> &[EdgeId] {
        &self.incidence_lists[vertex]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_ids_are_sequential() {
        let mut graph = DirectedWeightedGraph::new(3);
        let first = graph.add_edge(Edge { from: 0, to: 1, weight: 1.0 }).unwrap();
        let second = graph.add_edge(Edge { from: 0, to: 2, weight: 2.0 }).unwrap();
        let third = graph.add_edge(Edge { from: 1, to: 2, weight: 0.5 }).unwrap();

        assert_eq!((first, second, third), (0, 1, 2));
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(graph.outgoing_edges(0), &[0, 1]);
        assert_eq!(graph.outgoing_edges(1), &[2]);
        assert!(graph.outgoing_edges(2).is_empty());
        assert_eq!(graph.edge(2), &Edge { from: 1, to: 2, weight: 0.5 });
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = DirectedWeightedGraph::new(2);
        graph.add_edge(Edge { from: 0, to: 1, weight: 3.0 }).unwrap();
        graph.add_edge(Edge { from: 0, to: 1, weight: 3.0 }).unwrap();
        assert_eq!(graph.outgoing_edges(0).len(), 2);
    }

    #[test]
    fn test_invalid_edges_are_rejected() {
        let mut graph = DirectedWeightedGraph::new(2);
        assert_eq!(
            graph.add_edge(Edge { from: 0, to: 5, weight: 1.0 }),
            Err(GraphError::VertexOutOfRange { vertex: 5, vertex_count: 2 })
        );
        assert_eq!(
            graph.add_edge(Edge { from: 0, to: 1, weight: -1.0 }),
            Err(GraphError::NegativeWeight { from: 0, to: 1 })
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_add_vertices() {
        let mut graph: DirectedWeightedGraph<f64> = DirectedWeightedGraph::new(1);
        graph.add_vertices(2);
        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.add_edge(Edge { from: 2, to: 0, weight: 0.0 }).is_ok());
    }
}
