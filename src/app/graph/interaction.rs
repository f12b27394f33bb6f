use eframe::egui::{self, Pos2, Rect, Ui};
use glam::Vec2;

use crate::interaction::{HitTest, PointerEvent};

use super::super::GraphEditorApp;

/// Screen-space disc of one node, rebuilt every frame from the camera.
pub(in crate::app) struct ProjectedNode {
    pub(in crate::app) id: String,
    pub(in crate::app) center: Pos2,
    pub(in crate::app) radius: f32,
    pub(in crate::app) depth: f32,
}

/// Hit testing against projected node discs. Overlapping hits resolve to the
/// disc nearest to the camera, like the first intersection of a picking ray.
pub(in crate::app) struct ProjectedHits {
    pub(in crate::app) nodes: Vec<ProjectedNode>,
}

impl HitTest for ProjectedHits {
    fn hit_test(&self, pointer: Vec2) -> Option<String> {
        let pointer = Pos2::new(pointer.x, pointer.y);
        self.nodes
            .iter()
            .filter(|node| node.center.distance(pointer) <= node.radius)
            .min_by(|a, b| a.depth.total_cmp(&b.depth))
            .map(|node| node.id.clone())
    }
}

fn to_glam(pos: Pos2) -> Vec2 {
    Vec2::new(pos.x, pos.y)
}

impl GraphEditorApp {
    pub(in crate::app) fn queue_pointer_events(&mut self, ui: &Ui, rect: Rect) {
        let (events, time) = ui.input(|input| (input.events.clone(), input.time));

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) if rect.contains(pos) => {
                    self.engine
                        .enqueue_pointer(PointerEvent::Move { pos: to_glam(pos) });
                }
                egui::Event::PointerMoved(_) | egui::Event::PointerGone => {
                    self.engine.enqueue_pointer(PointerEvent::Leave);
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } if rect.contains(pos) => {
                    self.engine.enqueue_pointer(PointerEvent::Down {
                        pos: to_glam(pos),
                        time,
                    });
                }
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                } => {
                    self.engine.enqueue_pointer(PointerEvent::Up {
                        pos: to_glam(pos),
                        time,
                    });
                }
                _ => {}
            }
        }
    }

    pub(in crate::app) fn handle_camera_input(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
    ) {
        if response.dragged_by(egui::PointerButton::Primary) {
            self.camera.orbit(response.drag_delta());
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.camera.pan(response.drag_delta(), response.rect.height());
        }

        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() > f32::EPSILON {
            self.camera.zoom(scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc(id: &str, x: f32, depth: f32) -> ProjectedNode {
        ProjectedNode {
            id: id.to_owned(),
            center: Pos2::new(x, 0.0),
            radius: 10.0,
            depth,
        }
    }

    #[test]
    fn test_nearest_overlapping_disc_wins() {
        let hits = ProjectedHits {
            nodes: vec![disc("far", 0.0, 12.0), disc("near", 4.0, 3.0)],
        };
        assert_eq!(hits.hit_test(Vec2::new(2.0, 0.0)).as_deref(), Some("near"));
        assert_eq!(hits.hit_test(Vec2::new(-8.0, 0.0)).as_deref(), Some("far"));
        assert!(hits.hit_test(Vec2::new(50.0, 0.0)).is_none());
    }
}
