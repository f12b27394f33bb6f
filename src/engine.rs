use glam::Vec3;

use crate::anim::ScaleAnimator;
use crate::graph::{Edge, GraphError, GraphStore};
use crate::interaction::{HitTest, InteractionOutput, PointerEvent, PointerFsm, Selection};
use crate::physics::{PhysicsConfig, step_physics};

/// Hovered sphere radius over rest radius.
pub const HOVER_SCALE_RATIO: f32 = 0.45 / 0.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorHint {
    #[default]
    Default,
    Pointer,
}

/// A click on a node that carries a link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub node: String,
    pub url: String,
}

/// Ties the store, simulation, scale animation and pointer handling together
/// and keeps their references to node ids consistent.
pub struct Engine {
    store: GraphStore,
    physics: PhysicsConfig,
    animator: ScaleAnimator,
    pointer: PointerFsm,
    selection: Selection,
    cursor: CursorHint,
}

impl Engine {
    pub fn new(store: GraphStore, physics: PhysicsConfig) -> Self {
        Self {
            store,
            physics,
            animator: ScaleAnimator::new(),
            pointer: PointerFsm::new(),
            selection: Selection::new(),
            cursor: CursorHint::Default,
        }
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn physics(&self) -> PhysicsConfig {
        self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsConfig {
        &mut self.physics
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn hovered(&self) -> Option<&str> {
        self.pointer.hovered()
    }

    pub fn is_dragging(&self) -> bool {
        self.pointer.is_dragging()
    }

    pub fn cursor(&self) -> CursorHint {
        self.cursor
    }

    pub fn is_animating(&self) -> bool {
        self.animator.active_len() > 0
    }

    /// Physics first, then scale animation. Renderers read the store afterwards.
    pub fn frame(&mut self) {
        step_physics(&mut self.store, self.physics);
        self.animator.tick(&mut self.store);
    }

    pub fn enqueue_pointer(&mut self, event: PointerEvent) {
        self.pointer.enqueue(event);
    }

    /// Drains queued pointer events and applies hover and click effects.
    pub fn handle_pointer(&mut self, hits: &impl HitTest) -> Vec<Navigation> {
        let mut navigations = Vec::new();
        for output in self.pointer.drain(hits) {
            match output {
                InteractionOutput::HoverChanged { from, to } => {
                    if let Some(from) = from {
                        self.animator.animate_to(&self.store, &from, 1.0);
                    }
                    self.cursor = match to {
                        Some(to) => {
                            self.animator
                                .animate_to(&self.store, &to, HOVER_SCALE_RATIO);
                            CursorHint::Pointer
                        }
                        None => CursorHint::Default,
                    };
                }
                InteractionOutput::Click { node } => {
                    if let Some(navigation) = self.dispatch_click(node) {
                        navigations.push(navigation);
                    }
                }
            }
        }
        navigations
    }

    fn dispatch_click(&self, node: String) -> Option<Navigation> {
        let url = self.store.node(&node).and_then(|record| record.url.clone());
        match url {
            Some(url) => {
                tracing::info!(node = %node, url = %url, "opening node link");
                Some(Navigation { node, url })
            }
            None => {
                tracing::info!(node = %node, "clicked node");
                None
            }
        }
    }

    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        position: Option<Vec3>,
        url: Option<String>,
    ) -> Result<String, GraphError> {
        self.store
            .add_node(id, label, position, url)
            .map(|node| node.id.clone())
    }

    /// Adds a node under a freshly generated id, as the editor does.
    pub fn add_labelled_node(&mut self, label: &str) -> Result<String, GraphError> {
        let id = self.store.generate_id();
        self.add_node(id, label, None, None)
    }

    pub fn add_edge(&mut self, a: &str, b: &str) -> Option<Edge> {
        self.store.add_edge(a, b)
    }

    pub fn remove_edge(&mut self, a: &str, b: &str) -> bool {
        self.store.remove_edge(a, b)
    }

    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.store.remove_node(id).is_none() {
            return false;
        }
        self.purge(id);
        true
    }

    pub fn select(&mut self, id: &str) -> bool {
        self.selection.select(&self.store, id)
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.deselect(id)
    }

    /// Applies a checkbox state from the editor's node list.
    pub fn set_selected(&mut self, id: &str, selected: bool) -> bool {
        if selected {
            self.select(id)
        } else {
            self.deselect(id)
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn connect_selected(&mut self) -> usize {
        self.selection.connect_selected(&mut self.store)
    }

    pub fn disconnect_selected(&mut self) -> usize {
        self.selection.disconnect_selected(&mut self.store)
    }

    pub fn delete_selected(&mut self) -> usize {
        let removed = self.selection.delete_selected(&mut self.store);
        for id in &removed {
            self.purge(id);
        }
        removed.len()
    }

    /// Drops every reference to a node that is no longer in the store.
    fn purge(&mut self, id: &str) {
        self.animator.reset(&mut self.store, id);
        self.selection.deselect(id);
        if self.pointer.forget(id) {
            self.cursor = CursorHint::Default;
        }
    }
}
