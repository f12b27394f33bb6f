use glam::Vec3;

use crate::graph::Node;

pub(super) fn reset_velocities(nodes: &mut [Node]) {
    for node in nodes {
        node.velocity = Vec3::ZERO;
    }
}

/// Inverse-square push between every unordered pair. Pairs too close for a
/// finite push (coincident or denormal distance) are skipped.
pub(super) fn accumulate_repulsion(nodes: &mut [Node], strength: f32) {
    let node_count = nodes.len();
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = nodes[i].position - nodes[j].position;
            let distance_sq = delta.length_squared();
            if distance_sq.is_nan() || distance_sq < f32::MIN_POSITIVE {
                continue;
            }

            let push = delta / distance_sq.sqrt() * (strength / distance_sq);
            if !push.is_finite() {
                continue;
            }
            nodes[i].velocity += push;
            nodes[j].velocity -= push;
        }
    }
}

/// Spring pull along each edge, proportional to its length.
pub(super) fn accumulate_attraction(nodes: &mut [Node], edges: &[(usize, usize)], strength: f32) {
    let node_count = nodes.len();
    for &(from, to) in edges {
        if from >= node_count || to >= node_count || from == to {
            continue;
        }

        let delta = nodes[to].position - nodes[from].position;
        let distance = delta.length();
        if distance <= 0.0 {
            continue;
        }

        let pull = delta / distance * (distance * strength);
        nodes[from].velocity += pull;
        nodes[to].velocity -= pull;
    }
}

pub(super) fn accumulate_centering(nodes: &mut [Node], strength: f32) {
    for node in nodes {
        node.velocity -= node.position * strength;
    }
}

pub(super) fn integrate(nodes: &mut [Node], damping: f32) {
    for node in nodes {
        node.position += node.velocity;
        node.velocity *= damping;
    }
}
