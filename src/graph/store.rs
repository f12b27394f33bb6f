use std::collections::HashMap;

use eframe::egui::Color32;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use super::connectivity::{LOW_CONNECTIVITY_COLOR, connectivity_color, normalized_degrees};

/// Half extent of the cube new nodes are dropped into when no position is given.
pub const SPAWN_HALF_EXTENT: f32 = 5.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("node `{0}` already exists")]
    DuplicateNode(String),
}

/// A graph vertex together with its simulation and display state.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub url: Option<String>,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Current visual scale, 1.0 at rest. Driven by the scale animator.
    pub scale: f32,
    /// Degree normalized by the maximum degree of the graph.
    pub connectivity: f32,
    pub color: Color32,
}

/// Unordered connection between two node ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub a: String,
    pub b: String,
}

impl Edge {
    pub fn connects(&self, first: &str, second: &str) -> bool {
        (self.a == first && self.b == second) || (self.a == second && self.b == first)
    }

    pub fn touches(&self, id: &str) -> bool {
        self.a == id || self.b == id
    }
}

/// Owns every node and edge of the graph.
///
/// Nodes live in a dense arena addressed through `index_by_id`; removal swaps the
/// last node into the freed slot, so indices are only stable between mutations.
/// The store refuses duplicate node ids, duplicate edges (in either order) and
/// self loops, and recolours nodes by connectivity after each topology change.
pub struct GraphStore {
    nodes: Vec<Node>,
    index_by_id: HashMap<String, usize>,
    edges: Vec<Edge>,
    rng: StdRng,
    next_generated_id: u64,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            index_by_id: HashMap::new(),
            edges: Vec::new(),
            rng,
            next_generated_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_by_id
            .get(id)
            .and_then(|&index| self.nodes.get(index))
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let index = self.index_of(id)?;
        self.nodes.get_mut(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index_by_id.get(id).copied()
    }

    /// Edges resolved to arena indices, valid until the next mutation.
    pub fn edge_indices(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter_map(|edge| Some((self.index_of(&edge.a)?, self.index_of(&edge.b)?)))
            .collect()
    }

    pub fn degree(&self, id: &str) -> usize {
        self.edges.iter().filter(|edge| edge.touches(id)).count()
    }

    /// Returns an id not used by any node, for nodes created from the editor.
    pub fn generate_id(&mut self) -> String {
        loop {
            let candidate = format!("node-{}", self.next_generated_id);
            self.next_generated_id += 1;
            if !self.contains(&candidate) {
                return candidate;
            }
        }
    }

    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        position: Option<Vec3>,
        url: Option<String>,
    ) -> Result<&Node, GraphError> {
        let id = id.into();
        if self.contains(&id) {
            return Err(GraphError::DuplicateNode(id));
        }

        let position = position.unwrap_or_else(|| self.random_position());
        let index = self.nodes.len();
        self.nodes.push(Node {
            id: id.clone(),
            label: label.into(),
            url,
            position,
            velocity: Vec3::ZERO,
            scale: 1.0,
            connectivity: 0.0,
            color: LOW_CONNECTIVITY_COLOR,
        });
        self.index_by_id.insert(id.clone(), index);
        tracing::debug!(node = %id, "added node");

        Ok(&self.nodes[index])
    }

    fn random_position(&mut self) -> Vec3 {
        let mut axis = || self.rng.gen_range(-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT);
        Vec3::new(axis(), axis(), axis())
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edges.iter().any(|edge| edge.connects(a, b))
    }

    /// Adds an edge and recolours. Returns `None` when either endpoint is
    /// missing, when `a == b`, or when the edge already exists in any order.
    pub fn add_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
        let edge = self.insert_edge(a, b)?;
        self.recolor_by_connectivity();
        Some(edge)
    }

    fn insert_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
        if a == b || !self.contains(a) || !self.contains(b) || self.has_edge(a, b) {
            return None;
        }

        let edge = Edge {
            a: a.to_owned(),
            b: b.to_owned(),
        };
        self.edges.push(edge.clone());
        tracing::debug!(a, b, "added edge");
        Some(edge)
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        if !self.detach_edge(a, b) {
            return false;
        }
        self.recolor_by_connectivity();
        true
    }

    fn detach_edge(&mut self, a: &str, b: &str) -> bool {
        let Some(position) = self.edges.iter().position(|edge| edge.connects(a, b)) else {
            return false;
        };
        self.edges.remove(position);
        tracing::debug!(a, b, "removed edge");
        true
    }

    /// Removes a node and every edge incident to it.
    pub fn remove_node(&mut self, id: &str) -> Option<Node> {
        let node = self.detach_node(id)?;
        self.recolor_by_connectivity();
        Some(node)
    }

    fn detach_node(&mut self, id: &str) -> Option<Node> {
        let index = self.index_by_id.remove(id)?;
        let node = self.nodes.swap_remove(index);
        if let Some(moved) = self.nodes.get(index) {
            self.index_by_id.insert(moved.id.clone(), index);
        }

        let before = self.edges.len();
        self.edges.retain(|edge| !edge.touches(id));
        tracing::debug!(
            node = id,
            pruned_edges = before - self.edges.len(),
            "removed node"
        );
        Some(node)
    }

    /// Adds every valid pair, recolouring once. Returns how many edges were added.
    pub fn add_edges<'a>(&mut self, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> usize {
        let added = pairs
            .into_iter()
            .filter(|(a, b)| self.insert_edge(a, b).is_some())
            .count();
        self.recolor_by_connectivity();
        added
    }

    /// Adds an edge between every pair of `ids` that lacks one, recolouring once.
    pub fn connect_all(&mut self, ids: &[String]) -> usize {
        let mut added = 0usize;
        for (position, first) in ids.iter().enumerate() {
            for second in &ids[position + 1..] {
                if self.insert_edge(first, second).is_some() {
                    added += 1;
                }
            }
        }
        self.recolor_by_connectivity();
        added
    }

    /// Removes the edge between every pair of `ids` that has one, recolouring once.
    pub fn disconnect_all(&mut self, ids: &[String]) -> usize {
        let mut removed = 0usize;
        for (position, first) in ids.iter().enumerate() {
            for second in &ids[position + 1..] {
                if self.detach_edge(first, second) {
                    removed += 1;
                }
            }
        }
        self.recolor_by_connectivity();
        removed
    }

    pub fn remove_nodes(&mut self, ids: &[String]) -> Vec<Node> {
        let removed = ids
            .iter()
            .filter_map(|id| self.detach_node(id))
            .collect::<Vec<_>>();
        self.recolor_by_connectivity();
        removed
    }

    pub fn recolor_by_connectivity(&mut self) {
        let weights = normalized_degrees(&self.nodes, &self.edges, &self.index_by_id);
        for (node, weight) in self.nodes.iter_mut().zip(weights) {
            node.connectivity = weight;
            node.color = connectivity_color(weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(ids: &[&str]) -> GraphStore {
        let mut store = GraphStore::with_seed(7);
        for id in ids {
            store
                .add_node(*id, id.to_uppercase(), None, None)
                .expect("fresh id");
        }
        store
    }

    #[test]
    fn test_random_position_stays_inside_spawn_cube() {
        let store = store_with(&["a", "b", "c", "d", "e", "f"]);
        for node in store.nodes() {
            for axis in node.position.to_array() {
                assert!((-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT).contains(&axis));
            }
        }
    }

    #[test]
    fn test_explicit_position_is_kept() {
        let mut store = GraphStore::with_seed(1);
        let node = store
            .add_node("p", "P", Some(Vec3::new(1.0, 2.0, 3.0)), Some("https://example.org".into()))
            .expect("fresh id");
        assert_eq!(node.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(node.url.as_deref(), Some("https://example.org"));
        assert_eq!(node.scale, 1.0);
    }

    #[test]
    fn test_duplicate_node_id_is_rejected() {
        let mut store = GraphStore::with_seed(1);
        store.add_node("x", "X", None, None).expect("fresh id");
        let error = store.add_node("x", "Y", None, None).unwrap_err();

        assert_eq!(error, GraphError::DuplicateNode("x".to_owned()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.node("x").map(|node| node.label.as_str()), Some("X"));
    }

    #[test]
    fn test_has_edge_is_order_independent() {
        let mut store = store_with(&["a", "b", "c"]);
        store.add_edge("a", "b");

        for (first, second) in [("a", "b"), ("a", "c"), ("b", "c")] {
            assert_eq!(store.has_edge(first, second), store.has_edge(second, first));
        }
        assert!(store.has_edge("b", "a"));
        assert!(!store.has_edge("c", "a"));
    }

    #[test]
    fn test_add_edge_rejects_missing_duplicate_and_self_loop() {
        let mut store = store_with(&["a", "b"]);

        assert!(store.add_edge("a", "missing").is_none());
        assert!(store.add_edge("a", "a").is_none());
        assert_eq!(
            store.add_edge("a", "b"),
            Some(Edge {
                a: "a".into(),
                b: "b".into()
            })
        );
        assert!(store.add_edge("b", "a").is_none());
        assert_eq!(store.edges().len(), 1);
    }

    #[test]
    fn test_remove_edge_matches_either_order() {
        let mut store = store_with(&["a", "b"]);
        store.add_edge("a", "b");

        assert!(store.remove_edge("b", "a"));
        assert!(!store.remove_edge("a", "b"));
        assert!(store.edges().is_empty());
    }

    #[test]
    fn test_remove_node_cascades_to_incident_edges() {
        let mut store = store_with(&["a", "b", "c", "d"]);
        store.add_edge("a", "b");
        store.add_edge("b", "c");
        store.add_edge("c", "d");
        store.add_edge("d", "a");

        let removed = store.remove_node("b").expect("node exists");
        assert_eq!(removed.id, "b");
        assert!(store.edges().iter().all(|edge| !edge.touches("b")));
        assert_eq!(store.edges().len(), 2);
        assert!(store.remove_node("b").is_none());
    }

    #[test]
    fn test_index_stays_consistent_after_swap_remove() {
        let mut store = store_with(&["a", "b", "c"]);
        store.remove_node("a");

        for (index, node) in store.nodes().iter().enumerate() {
            assert_eq!(store.index_of(&node.id), Some(index));
        }
        assert_eq!(store.node("c").map(|node| node.id.as_str()), Some("c"));
    }

    #[test]
    fn test_connect_and_disconnect_all() {
        let mut store = store_with(&["a", "b", "c"]);
        store.add_edge("a", "b");
        let ids = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];

        assert_eq!(store.connect_all(&ids), 2);
        assert!(store.has_edge("a", "c") && store.has_edge("b", "c"));

        assert_eq!(store.disconnect_all(&ids[..2]), 1);
        assert!(!store.has_edge("a", "b"));
        assert_eq!(store.edges().len(), 2);
    }

    #[test]
    fn test_recolor_marks_hub_and_isolated_nodes() {
        let mut store = store_with(&["hub", "a", "b", "lonely"]);
        store.add_edge("hub", "a");
        store.add_edge("hub", "b");

        let hub = store.node("hub").expect("node exists");
        assert_eq!(hub.connectivity, 1.0);
        assert_eq!(hub.color, connectivity_color(1.0));
        assert_eq!(store.node("a").map(|node| node.connectivity), Some(0.5));
        let lonely = store.node("lonely").expect("node exists");
        assert_eq!(lonely.connectivity, 0.0);
        assert_eq!(lonely.color, LOW_CONNECTIVITY_COLOR);
    }

    #[test]
    fn test_recolor_is_deterministic_for_same_topology() {
        let mut first = store_with(&["a", "b", "c"]);
        first.add_edge("a", "b");
        first.add_edge("b", "c");

        let mut second = store_with(&["c", "b", "a"]);
        second.add_edge("c", "b");
        second.add_edge("b", "a");

        for node in first.nodes() {
            let other = second.node(&node.id).expect("node exists");
            assert_eq!(node.connectivity, other.connectivity);
            assert_eq!(node.color, other.color);
        }
    }

    #[test]
    fn test_generate_id_skips_taken_ids() {
        let mut store = store_with(&["node-1"]);
        assert_eq!(store.generate_id(), "node-2");
    }
}
