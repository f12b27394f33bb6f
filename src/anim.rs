use std::collections::{HashMap, HashSet};

use crate::graph::GraphStore;

/// Fraction of the remaining distance covered per tick.
pub const ANIMATION_SPEED: f32 = 0.15;
/// Below this distance the scale snaps to its target and the animation ends.
pub const SCALE_EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleAnimation {
    pub current: f32,
    pub target: f32,
    pub active: bool,
}

/// Eases each node's visual scale toward a target, independent of physics.
///
/// Animation state is keyed by node id and written back into `Node::scale` on
/// every tick. Only ids in `active` are visited, so settled nodes cost nothing.
#[derive(Debug, Default)]
pub struct ScaleAnimator {
    states: HashMap<String, ScaleAnimation>,
    active: HashSet<String>,
}

impl ScaleAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn animate_to(&mut self, store: &GraphStore, id: &str, target: f32) {
        let Some(node) = store.node(id) else {
            return;
        };

        let state = self
            .states
            .entry(id.to_owned())
            .or_insert(ScaleAnimation {
                current: node.scale,
                target,
                active: true,
            });
        state.target = target;
        state.active = true;
        self.active.insert(id.to_owned());
    }

    pub fn tick(&mut self, store: &mut GraphStore) {
        let states = &mut self.states;
        self.active.retain(|id| {
            let Some(node) = store.node_mut(id) else {
                states.remove(id);
                return false;
            };
            let Some(state) = states.get_mut(id) else {
                return false;
            };

            let diff = state.target - state.current;
            if diff.abs() > SCALE_EPSILON {
                state.current += diff * ANIMATION_SPEED;
                node.scale = state.current;
                true
            } else {
                state.current = state.target;
                state.active = false;
                node.scale = state.target;
                false
            }
        });
    }

    /// Puts the node back at scale 1 and forgets its animation, whether or not
    /// the node still exists.
    pub fn reset(&mut self, store: &mut GraphStore, id: &str) {
        if let Some(node) = store.node_mut(id) {
            node.scale = 1.0;
        }
        self.states.remove(id);
        self.active.remove(id);
    }

    pub fn state(&self, id: &str) -> Option<ScaleAnimation> {
        self.states.get(id).copied()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    fn store_with_node(id: &str) -> GraphStore {
        let mut store = GraphStore::with_seed(5);
        store
            .add_node(id, id, Some(Vec3::ZERO), None)
            .expect("fresh id");
        store
    }

    fn scale_of(store: &GraphStore, id: &str) -> f32 {
        store.node(id).expect("node exists").scale
    }

    #[test]
    fn test_animation_reaches_target_within_bound() {
        let mut store = store_with_node("a");
        let mut animator = ScaleAnimator::new();
        animator.animate_to(&store, "a", 2.0);

        // Remaining distance shrinks by 0.85 per tick, starting from 1.0.
        let bound = (SCALE_EPSILON.ln() / (1.0 - ANIMATION_SPEED).ln()).ceil() as usize + 1;
        let mut ticks = 0usize;
        while animator.is_active("a") {
            animator.tick(&mut store);
            ticks += 1;
            assert!(ticks <= bound, "animation did not settle in {bound} ticks");
        }

        assert_eq!(scale_of(&store, "a"), 2.0);
        assert_eq!(animator.active_len(), 0);
        let state = animator.state("a").expect("state kept after settling");
        assert!(!state.active);
    }

    #[test]
    fn test_easing_is_exponential() {
        let mut store = store_with_node("a");
        let mut animator = ScaleAnimator::new();
        animator.animate_to(&store, "a", 2.0);
        animator.tick(&mut store);
        assert!((scale_of(&store, "a") - 1.15).abs() < 1e-6);
        animator.tick(&mut store);
        assert!((scale_of(&store, "a") - 1.2775).abs() < 1e-6);
    }

    #[test]
    fn test_retarget_keeps_current_scale() {
        let mut store = store_with_node("a");
        let mut animator = ScaleAnimator::new();
        animator.animate_to(&store, "a", 2.0);
        animator.tick(&mut store);
        animator.animate_to(&store, "a", 1.0);

        let state = animator.state("a").expect("state exists");
        assert!((state.current - 1.15).abs() < 1e-6);
        assert_eq!(state.target, 1.0);
        assert!(state.active);
    }

    #[test]
    fn test_reset_clears_state_and_scale() {
        let mut store = store_with_node("a");
        let mut animator = ScaleAnimator::new();
        animator.animate_to(&store, "a", 3.0);
        animator.tick(&mut store);

        animator.reset(&mut store, "a");
        assert_eq!(scale_of(&store, "a"), 1.0);
        assert!(animator.state("a").is_none());
        assert!(!animator.is_active("a"));
    }

    #[test]
    fn test_removed_node_leaves_active_set_on_tick() {
        let mut store = store_with_node("a");
        let mut animator = ScaleAnimator::new();
        animator.animate_to(&store, "a", 3.0);
        store.remove_node("a");

        animator.tick(&mut store);
        assert_eq!(animator.active_len(), 0);
        assert!(animator.state("a").is_none());
    }

    #[test]
    fn test_unknown_node_is_ignored() {
        let store = GraphStore::with_seed(5);
        let mut animator = ScaleAnimator::new();
        animator.animate_to(&store, "ghost", 2.0);
        assert_eq!(animator.active_len(), 0);
    }
}
