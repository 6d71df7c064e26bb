//! Undirected weighted graph over stations.
//!
//! The graph is the substrate for shortest-path search. It supports cheap,
//! reversible removal of nodes and edges: every removal hands back what was
//! taken so the K-shortest-paths search can put it back exactly.

mod path;
mod traverse;

use std::collections::BTreeMap;

use crate::domain::StationId;

pub use path::Path;

/// Errors from graph mutation and traversal.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Operation referenced a node absent from the graph
    #[error("invalid node: {0} is not in the graph")]
    InvalidNode(StationId),

    /// Edge weight is negative or not a number
    #[error("invalid weight {weight} for edge {from} - {to}")]
    InvalidWeight {
        from: StationId,
        to: StationId,
        weight: f64,
    },

    /// Edge would connect a node to itself
    #[error("self-loop on {0} is not allowed")]
    SelfLoop(StationId),
}

/// An undirected edge as removed from the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: StationId,
    pub to: StationId,
    pub weight: f64,
}

/// Ledger of nodes and edges taken out of a graph, for later restoration.
#[derive(Debug, Clone, Default)]
pub struct Removal {
    nodes: Vec<StationId>,
    edges: Vec<Edge>,
}

impl Removal {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the edge `a - b` if present, recording it.
    ///
    /// Returns whether an edge was removed.
    pub fn remove_edge(
        &mut self,
        graph: &mut WeightedGraph,
        a: &StationId,
        b: &StationId,
    ) -> Result<bool, GraphError> {
        match graph.remove_edge(a, b)? {
            Some(edge) => {
                self.edges.push(edge);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove a node and its incident edges, recording them.
    pub fn remove_node(
        &mut self,
        graph: &mut WeightedGraph,
        id: &StationId,
    ) -> Result<(), GraphError> {
        let edges = graph.remove_node(id)?;
        self.nodes.push(id.clone());
        self.edges.extend(edges);
        Ok(())
    }

    /// Returns true if nothing has been removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Returns the removed nodes.
    pub fn nodes(&self) -> &[StationId] {
        &self.nodes
    }

    /// Returns the removed edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Undirected weighted graph keyed by station identifier.
///
/// Edges are symmetric: `a` lists `b` with weight `w` iff `b` lists `a` with
/// weight `w`. Neighbour lists are ordered by station identifier, so
/// removing and re-adding an edge leaves adjacency (and traversal order)
/// unchanged.
///
/// The graph is deliberately not shared between queries: search mutates it
/// through `&mut`, so concurrent searches need their own instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightedGraph {
    nodes: BTreeMap<StationId, BTreeMap<StationId, f64>>,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. No-op if the node exists or the identifier is empty.
    pub fn add_node(&mut self, id: &StationId) {
        if id.is_empty() {
            return;
        }
        self.nodes.entry(id.clone()).or_default();
    }

    /// Returns true if the node is in the graph.
    pub fn contains(&self, id: &StationId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Set (or replace) the weight of the undirected edge `a - b`.
    pub fn add_edge(
        &mut self,
        a: &StationId,
        b: &StationId,
        weight: f64,
    ) -> Result<(), GraphError> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(GraphError::SelfLoop(a.clone()));
        }
        if weight.is_nan() || weight < 0.0 {
            return Err(GraphError::InvalidWeight {
                from: a.clone(),
                to: b.clone(),
                weight,
            });
        }

        if let Some(neighbours) = self.nodes.get_mut(a) {
            neighbours.insert(b.clone(), weight);
        }
        if let Some(neighbours) = self.nodes.get_mut(b) {
            neighbours.insert(a.clone(), weight);
        }
        Ok(())
    }

    /// Remove the edge `a - b`.
    ///
    /// Returns `Ok(None)` if both nodes exist but are not adjacent.
    pub fn remove_edge(
        &mut self,
        a: &StationId,
        b: &StationId,
    ) -> Result<Option<Edge>, GraphError> {
        self.check_node(a)?;
        self.check_node(b)?;

        let weight = match self.nodes.get_mut(a).and_then(|n| n.remove(b)) {
            Some(w) => w,
            None => return Ok(None),
        };
        if let Some(neighbours) = self.nodes.get_mut(b) {
            neighbours.remove(a);
        }

        Ok(Some(Edge {
            from: a.clone(),
            to: b.clone(),
            weight,
        }))
    }

    /// Remove a node and every edge touching it.
    ///
    /// Returns the removed edges, each oriented away from `id`.
    pub fn remove_node(&mut self, id: &StationId) -> Result<Vec<Edge>, GraphError> {
        let neighbours = self
            .nodes
            .remove(id)
            .ok_or_else(|| GraphError::InvalidNode(id.clone()))?;

        let mut edges = Vec::with_capacity(neighbours.len());
        for (neighbour, weight) in neighbours {
            if let Some(back) = self.nodes.get_mut(&neighbour) {
                back.remove(id);
            }
            edges.push(Edge {
                from: id.clone(),
                to: neighbour,
                weight,
            });
        }
        Ok(edges)
    }

    /// Put back everything recorded in a removal ledger.
    ///
    /// Nodes are restored before edges, so the order of removal does not
    /// matter.
    pub fn restore(&mut self, removal: Removal) -> Result<(), GraphError> {
        for node in &removal.nodes {
            self.add_node(node);
        }
        for edge in &removal.edges {
            self.add_edge(&edge.from, &edge.to, edge.weight)?;
        }
        Ok(())
    }

    /// Returns true if `a` and `b` are adjacent.
    pub fn has_edge(&self, a: &StationId, b: &StationId) -> bool {
        self.weight(a, b).is_some()
    }

    /// Returns the weight of the edge `a - b`, if present.
    pub fn weight(&self, a: &StationId, b: &StationId) -> Option<f64> {
        self.nodes.get(a).and_then(|n| n.get(b)).copied()
    }

    /// Iterate the neighbours of a node with their edge weights.
    ///
    /// Yields nothing for an absent node.
    pub fn neighbours<'a>(
        &'a self,
        id: &StationId,
    ) -> impl Iterator<Item = (&'a StationId, f64)> + use<'a> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|n| n.iter().map(|(k, w)| (k, *w)))
    }

    /// Iterate all nodes in identifier order.
    pub fn nodes(&self) -> impl Iterator<Item = &StationId> {
        self.nodes.keys()
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Total weight of a path, or `None` if any hop is not an edge.
    pub fn path_weight(&self, path: &Path) -> Option<f64> {
        path.hops()
            .map(|(a, b)| self.weight(a, b))
            .sum::<Option<f64>>()
    }

    fn check_node(&self, id: &StationId) -> Result<(), GraphError> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::InvalidNode(id.clone()))
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn id(s: &str) -> StationId {
        StationId::new(s)
    }

    /// Six-station graph shared by the path search tests.
    pub(crate) fn sample_graph() -> WeightedGraph {
        let mut g = WeightedGraph::new();
        for n in ["c", "e", "d", "g", "f", "h"] {
            g.add_node(&id(n));
        }
        for (a, b, w) in [
            ("c", "d", 3.0),
            ("c", "e", 2.0),
            ("e", "d", 1.0),
            ("d", "f", 4.0),
            ("f", "h", 1.0),
            ("g", "h", 2.0),
            ("e", "g", 3.0),
            ("f", "g", 2.0),
            ("e", "f", 2.0),
        ] {
            g.add_edge(&id(a), &id(b), w).unwrap();
        }
        g
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = WeightedGraph::new();
        g.add_node(&id("a"));
        g.add_node(&id("b"));
        g.add_edge(&id("a"), &id("b"), 1.0).unwrap();
        let before = g.clone();

        g.add_node(&id("a"));
        assert_eq!(g, before);
        assert_eq!(g.weight(&id("a"), &id("b")), Some(1.0));
    }

    #[test]
    fn add_node_ignores_empty_id() {
        let mut g = WeightedGraph::new();
        g.add_node(&id(""));
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn add_edge_is_symmetric() {
        let g = sample_graph();
        assert_eq!(g.weight(&id("c"), &id("d")), Some(3.0));
        assert_eq!(g.weight(&id("d"), &id("c")), Some(3.0));
        assert_eq!(g.edge_count(), 9);
    }

    #[test]
    fn add_edge_replaces_weight() {
        let mut g = sample_graph();
        g.add_edge(&id("d"), &id("c"), 7.5).unwrap();
        assert_eq!(g.weight(&id("c"), &id("d")), Some(7.5));
        assert_eq!(g.weight(&id("d"), &id("c")), Some(7.5));
        assert_eq!(g.edge_count(), 9);
    }

    #[test]
    fn add_edge_requires_both_nodes() {
        let mut g = sample_graph();
        let err = g.add_edge(&id("c"), &id("z"), 1.0).unwrap_err();
        assert_eq!(err, GraphError::InvalidNode(id("z")));
        assert_eq!(err.to_string(), "invalid node: z is not in the graph");
    }

    #[test]
    fn add_edge_rejects_bad_weights_and_loops() {
        let mut g = sample_graph();
        assert!(matches!(
            g.add_edge(&id("c"), &id("d"), -1.0),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert!(matches!(
            g.add_edge(&id("c"), &id("d"), f64::NAN),
            Err(GraphError::InvalidWeight { .. })
        ));
        assert_eq!(
            g.add_edge(&id("c"), &id("c"), 1.0),
            Err(GraphError::SelfLoop(id("c")))
        );
    }

    #[test]
    fn remove_edge_returns_triple() {
        let mut g = sample_graph();
        let edge = g.remove_edge(&id("e"), &id("f")).unwrap().unwrap();
        assert_eq!(
            edge,
            Edge {
                from: id("e"),
                to: id("f"),
                weight: 2.0
            }
        );
        assert!(!g.has_edge(&id("e"), &id("f")));
        assert!(!g.has_edge(&id("f"), &id("e")));
    }

    #[test]
    fn remove_missing_edge_is_none() {
        let mut g = sample_graph();
        assert_eq!(g.remove_edge(&id("c"), &id("h")).unwrap(), None);
        assert!(g.remove_edge(&id("c"), &id("z")).is_err());
    }

    #[test]
    fn remove_node_returns_incident_edges() {
        let mut g = sample_graph();
        let edges = g.remove_node(&id("e")).unwrap();
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.from == id("e")));
        assert!(!g.contains(&id("e")));
        assert!(!g.has_edge(&id("c"), &id("e")));
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn remove_absent_node_is_invalid() {
        let mut g = sample_graph();
        assert_eq!(
            g.remove_node(&id("z")),
            Err(GraphError::InvalidNode(id("z")))
        );
    }

    #[test]
    fn restore_round_trip() {
        let original = sample_graph();
        let mut g = original.clone();
        let mut removal = Removal::new();
        assert!(removal.is_empty());

        removal.remove_edge(&mut g, &id("f"), &id("h")).unwrap();
        removal.remove_node(&mut g, &id("c")).unwrap();
        removal.remove_node(&mut g, &id("e")).unwrap();
        assert!(!removal.remove_edge(&mut g, &id("d"), &id("h")).unwrap());
        assert_ne!(g, original);

        assert!(!removal.is_empty());
        assert_eq!(removal.nodes(), &[id("c"), id("e")]);
        // f-h, then c's two edges, then e's three remaining ones
        assert_eq!(removal.edges().len(), 6);
        assert_eq!(removal.edges()[0].weight, 1.0);

        g.restore(removal).unwrap();
        assert_eq!(g, original);
    }

    #[test]
    fn path_weight_sums_hops() {
        let g = sample_graph();
        let path = Path::new(vec![id("c"), id("e"), id("f"), id("h")]);
        assert_eq!(g.path_weight(&path), Some(5.0));

        let broken = Path::new(vec![id("c"), id("h")]);
        assert_eq!(g.path_weight(&broken), None);
    }

    #[test]
    fn neighbours_are_ordered() {
        let g = sample_graph();
        let ns: Vec<&str> = g.neighbours(&id("e")).map(|(n, _)| n.as_str()).collect();
        assert_eq!(ns, vec!["c", "d", "f", "g"]);
        assert_eq!(g.neighbours(&id("z")).count(), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        RemoveNode(u8),
        RemoveEdge(u8, u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8).prop_map(Op::RemoveNode),
            (0u8..8, 0u8..8).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
        ]
    }

    fn node(i: u8) -> StationId {
        StationId::new(format!("n{i}"))
    }

    fn graph(edges: &[(u8, u8, u16)]) -> WeightedGraph {
        let mut g = WeightedGraph::new();
        for i in 0..8 {
            g.add_node(&node(i));
        }
        for &(a, b, w) in edges {
            if a != b {
                g.add_edge(&node(a), &node(b), f64::from(w) / 1000.0).unwrap();
            }
        }
        g
    }

    proptest! {
        /// Any sequence of removals followed by restore gives back the original
        #[test]
        fn removal_then_restore_is_identity(
            edges in prop::collection::vec((0u8..8, 0u8..8, 0u16..5000), 0..24),
            ops in prop::collection::vec(op(), 0..12),
        ) {
            let original = graph(&edges);
            let mut g = original.clone();
            let mut removal = Removal::new();

            for op in ops {
                match op {
                    Op::RemoveNode(n) => {
                        if g.contains(&node(n)) {
                            removal.remove_node(&mut g, &node(n)).unwrap();
                        }
                    }
                    Op::RemoveEdge(a, b) => {
                        if g.contains(&node(a)) && g.contains(&node(b)) {
                            removal.remove_edge(&mut g, &node(a), &node(b)).unwrap();
                        }
                    }
                }
            }

            g.restore(removal).unwrap();
            prop_assert_eq!(g, original);
        }

        /// Edges stay symmetric through removals
        #[test]
        fn removals_keep_symmetry(
            edges in prop::collection::vec((0u8..8, 0u8..8, 0u16..5000), 0..24),
            victim in 0u8..8,
        ) {
            let mut g = graph(&edges);
            g.remove_node(&node(victim)).unwrap();
            for a in g.nodes() {
                for (b, w) in g.neighbours(a) {
                    prop_assert_eq!(g.weight(b, a), Some(w));
                }
            }
        }
    }
}
