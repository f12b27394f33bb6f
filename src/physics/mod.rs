mod forces;

use std::ops::RangeInclusive;

use crate::graph::GraphStore;
use forces::{
    accumulate_attraction, accumulate_centering, accumulate_repulsion, integrate, reset_velocities,
};

pub const REPULSION_RANGE: RangeInclusive<f32> = 0.1..=5.0;
pub const ATTRACTION_RANGE: RangeInclusive<f32> = 0.01..=0.1;
pub const CENTERING_RANGE: RangeInclusive<f32> = 0.01..=0.3;
pub const DAMPING_RANGE: RangeInclusive<f32> = 0.0..=0.95;

fn clamp_to(value: f32, range: &RangeInclusive<f32>) -> f32 {
    if value.is_nan() {
        return *range.start();
    }
    value.clamp(*range.start(), *range.end())
}

/// Force coefficients. Every setter clamps into its range so the layout cannot
/// be tuned into an exploding state, and damping stays below 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    repulsion: f32,
    attraction: f32,
    centering: f32,
    damping: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            repulsion: 1.0,
            attraction: 0.09,
            centering: 0.02,
            damping: 0.3,
        }
    }
}

impl PhysicsConfig {
    pub fn repulsion(&self) -> f32 {
        self.repulsion
    }

    pub fn attraction(&self) -> f32 {
        self.attraction
    }

    pub fn centering(&self) -> f32 {
        self.centering
    }

    pub fn damping(&self) -> f32 {
        self.damping
    }

    pub fn set_repulsion(&mut self, value: f32) {
        self.repulsion = clamp_to(value, &REPULSION_RANGE);
    }

    pub fn set_attraction(&mut self, value: f32) {
        self.attraction = clamp_to(value, &ATTRACTION_RANGE);
    }

    pub fn set_centering(&mut self, value: f32) {
        self.centering = clamp_to(value, &CENTERING_RANGE);
    }

    pub fn set_damping(&mut self, value: f32) {
        self.damping = clamp_to(value, &DAMPING_RANGE);
    }
}

/// One always-on simulation tick over every node of the store.
///
/// Velocities are rebuilt from scratch: reset, repulsion, attraction, centering,
/// then integration with damping. There is no settled state; callers run this
/// once per rendered frame.
pub fn step_physics(store: &mut GraphStore, config: PhysicsConfig) {
    let edges = store.edge_indices();
    let nodes = store.nodes_mut();

    reset_velocities(nodes);
    accumulate_repulsion(nodes, config.repulsion);
    accumulate_attraction(nodes, &edges, config.attraction);
    accumulate_centering(nodes, config.centering);
    integrate(nodes, config.damping);
}
