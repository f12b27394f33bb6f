use std::collections::BTreeSet;

use crate::graph::GraphStore;

/// User-controlled set of node ids, independent of hover.
///
/// Mutated only by editor actions. The batch operations work pairwise over the
/// current members, recolour the store once, and leave the selection empty.
#[derive(Debug, Default)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only ids present in the store can be selected.
    pub fn select(&mut self, store: &GraphStore, id: &str) -> bool {
        store.contains(id) && self.ids.insert(id.to_owned())
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn take(&mut self) -> Vec<String> {
        std::mem::take(&mut self.ids).into_iter().collect()
    }

    pub fn connect_selected(&mut self, store: &mut GraphStore) -> usize {
        let ids = self.take();
        let added = store.connect_all(&ids);
        tracing::info!(selected = ids.len(), added, "connected selection");
        added
    }

    pub fn disconnect_selected(&mut self, store: &mut GraphStore) -> usize {
        let ids = self.take();
        let removed = store.disconnect_all(&ids);
        tracing::info!(selected = ids.len(), removed, "disconnected selection");
        removed
    }

    /// Removes every selected node and returns the ids that were actually removed.
    pub fn delete_selected(&mut self, store: &mut GraphStore) -> Vec<String> {
        let ids = self.take();
        let removed = store
            .remove_nodes(&ids)
            .into_iter()
            .map(|node| node.id)
            .collect::<Vec<_>>();
        tracing::info!(removed = removed.len(), "deleted selection");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_store() -> GraphStore {
        let mut store = GraphStore::with_seed(11);
        for id in ["A", "B", "C"] {
            store.add_node(id, id, None, None).expect("fresh id");
        }
        store
    }

    fn select_all(selection: &mut Selection, store: &GraphStore) {
        for id in ["A", "B", "C"] {
            assert!(selection.select(store, id));
        }
    }

    #[test]
    fn test_connect_selected_completes_the_clique() {
        let mut store = abc_store();
        store.add_edge("A", "B");
        let mut selection = Selection::new();
        select_all(&mut selection, &store);

        assert_eq!(selection.connect_selected(&mut store), 2);
        assert_eq!(store.edges().len(), 3);
        assert!(store.has_edge("A", "B"));
        assert!(store.has_edge("A", "C"));
        assert!(store.has_edge("B", "C"));
        assert!(selection.is_empty());
        for node in store.nodes() {
            assert_eq!(node.connectivity, 1.0);
        }
    }

    #[test]
    fn test_disconnect_selected_only_touches_selected_pairs() {
        let mut store = abc_store();
        store.add_edge("A", "B");
        store.add_edge("B", "C");
        let mut selection = Selection::new();
        selection.select(&store, "A");
        selection.select(&store, "B");

        assert_eq!(selection.disconnect_selected(&mut store), 1);
        assert!(!store.has_edge("A", "B"));
        assert!(store.has_edge("B", "C"));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_delete_selected_cascades() {
        let mut store = abc_store();
        store.add_edge("A", "B");
        store.add_edge("B", "C");
        let mut selection = Selection::new();
        selection.select(&store, "B");

        assert_eq!(selection.delete_selected(&mut store), vec!["B".to_owned()]);
        assert_eq!(store.len(), 2);
        assert!(store.edges().is_empty());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_requires_existing_node() {
        let store = abc_store();
        let mut selection = Selection::new();

        assert!(!selection.select(&store, "Z"));
        assert!(selection.select(&store, "A"));
        assert!(!selection.select(&store, "A"));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn test_deselect_drops_only_that_member() {
        let store = abc_store();
        let mut selection = Selection::new();
        select_all(&mut selection, &store);

        assert!(selection.deselect("B"));
        assert!(!selection.deselect("B"));
        assert!(selection.contains("A"));
        assert!(!selection.contains("B"));
        assert_eq!(selection.len(), 2);
    }
}
