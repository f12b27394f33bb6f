use eframe::egui::{Align2, Color32, Painter, Pos2, Rect, Vec2};

const BACKGROUND: Color32 = Color32::from_rgb(20, 20, 20);
pub(super) const LABEL_PADDING: f32 = 8.0;
pub(super) const LABEL_PLATE: Color32 = Color32::from_black_alpha(128);

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
}

/// Darkens a colour toward the background as it recedes from the camera.
pub(super) fn depth_fade(color: Color32, depth: f32, far_depth: f32) -> Color32 {
    if far_depth <= f32::EPSILON {
        return color;
    }
    let factor = 1.0 - (depth / far_depth).clamp(0.0, 1.0) * 0.55;
    Color32::from_rgb(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
    )
}

/// Backing plate of a label whose text hangs centred below `anchor`.
pub(super) fn label_plate(anchor: Pos2, text_size: Vec2) -> Rect {
    Align2::CENTER_TOP
        .anchor_size(anchor, text_size + Vec2::splat(LABEL_PADDING * 2.0))
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

/// Conservative: an edge is drawn unless its padded bounding box misses the
/// viewport or neither endpoint is inside and it crosses no border.
pub(super) fn edge_visible(rect: Rect, start: Pos2, end: Pos2, padding: f32) -> bool {
    let bounds = Rect::from_two_pos(start, end).expand(padding);
    if !bounds.intersects(rect) {
        return false;
    }

    if rect.contains(start) || rect.contains(end) {
        return true;
    }

    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    (0..4).any(|side| segments_intersect(start, end, corners[side], corners[(side + 1) % 4]))
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}
