use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, vec2};
use glam::Vec3;

use crate::engine::CursorHint;
use crate::graph::blend_color;

use super::super::GraphEditorApp;
use super::super::camera::OrbitCamera;
use super::super::render_utils::{
    LABEL_PADDING, LABEL_PLATE, circle_visible, depth_fade, draw_background, edge_visible,
    label_plate,
};
use super::interaction::{ProjectedHits, ProjectedNode};

/// World-space radius of a node sphere at scale 1.
const NODE_WORLD_RADIUS: f32 = 0.2;
/// Labels hang this far below their node in world units.
const LABEL_DROP: f32 = 0.8;
const SELECTED_COLOR: Color32 = Color32::from_rgb(0, 255, 0);
const EDGE_COLOR: Color32 = Color32::from_rgba_premultiplied(51, 51, 51, 128);

impl GraphEditorApp {
    fn project_nodes(&self, rect: Rect, camera: &OrbitCamera) -> ProjectedHits {
        let nodes = self
            .engine
            .store()
            .nodes()
            .iter()
            .filter_map(|node| {
                let projected = camera.project(rect, node.position)?;
                Some(ProjectedNode {
                    id: node.id.clone(),
                    center: projected.screen,
                    radius: (NODE_WORLD_RADIUS * node.scale * projected.pixels_per_unit)
                        .clamp(2.5, 60.0),
                    depth: projected.depth,
                })
            })
            .collect();
        ProjectedHits { nodes }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        // Hover and clicks resolve against what was on screen when the
        // pointer moved, so hit testing uses last frame's positions.
        self.queue_pointer_events(ui, rect);
        let hits = self.project_nodes(rect, &self.camera);
        for navigation in self.engine.handle_pointer(&hits) {
            self.set_status(format!("opened {} from {}", navigation.url, navigation.node));
            ui.ctx().open_url(egui::OpenUrl::new_tab(navigation.url));
        }
        self.handle_camera_input(ui, &response);

        self.engine.frame();

        let camera = self.camera.clone();
        let mut projected = self.project_nodes(rect, &camera).nodes;
        let store = self.engine.store();

        let edge_stroke = Stroke::new(1.0, EDGE_COLOR);
        for edge in store.edges() {
            let (Some(a), Some(b)) = (store.node(&edge.a), store.node(&edge.b)) else {
                continue;
            };
            let (Some(start), Some(end)) = (
                camera.project(rect, a.position),
                camera.project(rect, b.position),
            ) else {
                continue;
            };
            if edge_visible(rect, start.screen, end.screen, 2.0) {
                painter.line_segment([start.screen, end.screen], edge_stroke);
            }
        }

        projected.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        let hovered = self.engine.hovered();
        let far_depth = camera.distance() * 2.0;
        for entry in &projected {
            if !circle_visible(rect, entry.center, entry.radius) {
                continue;
            }
            let Some(node) = store.node(&entry.id) else {
                continue;
            };

            let base = if self.engine.selection().contains(&node.id) {
                SELECTED_COLOR
            } else {
                node.color
            };
            let color = depth_fade(base, entry.depth, far_depth);
            painter.circle_filled(entry.center, entry.radius, color);

            let is_hovered = hovered == Some(node.id.as_str());
            if is_hovered {
                painter.circle_stroke(
                    entry.center,
                    entry.radius + 3.0,
                    Stroke::new(1.5, blend_color(color, Color32::WHITE, 0.6)),
                );
            }

            if let Some(anchor) = camera.project(rect, node.position - Vec3::Y * LABEL_DROP) {
                let text_color = if is_hovered {
                    Color32::WHITE
                } else {
                    Color32::from_white_alpha(200)
                };
                let galley = painter.layout_no_wrap(
                    node.label.clone(),
                    FontId::proportional(12.0),
                    text_color,
                );
                let plate = label_plate(anchor.screen, galley.size());
                painter.rect_filled(plate, 3.0, LABEL_PLATE);
                painter.galley(plate.min + vec2(LABEL_PADDING, LABEL_PADDING), galley, text_color);
            }
        }

        let cursor_icon = if self.engine.is_dragging() {
            Some(egui::CursorIcon::Grabbing)
        } else if self.engine.cursor() == CursorHint::Pointer {
            Some(egui::CursorIcon::PointingHand)
        } else {
            None
        };
        if let Some(cursor_icon) = cursor_icon {
            ui.output_mut(|output| output.cursor_icon = cursor_icon);
        }

        if store.is_empty() {
            painter.text(
                rect.center() + vec2(0.0, -10.0),
                Align2::CENTER_CENTER,
                "Empty graph. Add a node from the editor panel.",
                FontId::proportional(14.0),
                Color32::from_gray(200),
            );
        }
    }
}
