use std::collections::HashMap;

use eframe::egui::Color32;

use super::store::{Edge, Node};

pub const LOW_CONNECTIVITY_COLOR: Color32 = Color32::from_rgb(255, 68, 68);
pub const HIGH_CONNECTIVITY_COLOR: Color32 = Color32::from_rgb(255, 214, 92);

/// The best connected node stops short of the pure high colour.
const MAX_BLEND: f32 = 0.9;

pub fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub fn connectivity_color(normalized: f32) -> Color32 {
    blend_color(
        LOW_CONNECTIVITY_COLOR,
        HIGH_CONNECTIVITY_COLOR,
        normalized * MAX_BLEND,
    )
}

/// Degree of every node divided by the largest degree, in arena order.
pub(super) fn normalized_degrees(
    nodes: &[Node],
    edges: &[Edge],
    index_by_id: &HashMap<String, usize>,
) -> Vec<f32> {
    let mut degrees = vec![0usize; nodes.len()];
    for edge in edges {
        for endpoint in [&edge.a, &edge.b] {
            if let Some(&index) = index_by_id.get(endpoint) {
                degrees[index] += 1;
            }
        }
    }

    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    if nodes.len() < 2 || max_degree == 0 {
        return vec![0.0; nodes.len()];
    }

    degrees
        .into_iter()
        .map(|degree| degree as f32 / max_degree as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blend_endpoints() {
        assert_eq!(
            blend_color(Color32::BLACK, Color32::WHITE, 0.0),
            Color32::BLACK
        );
        assert_eq!(
            blend_color(Color32::BLACK, Color32::WHITE, 1.0),
            Color32::WHITE
        );
    }

    #[test]
    fn test_connectivity_color_never_reaches_high_color() {
        assert_eq!(connectivity_color(0.0), LOW_CONNECTIVITY_COLOR);
        assert_ne!(connectivity_color(1.0), HIGH_CONNECTIVITY_COLOR);
        assert_eq!(
            connectivity_color(1.0),
            blend_color(LOW_CONNECTIVITY_COLOR, HIGH_CONNECTIVITY_COLOR, 0.9)
        );
    }
}
