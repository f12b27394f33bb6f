use eframe::egui::{Pos2, Rect, Vec2, pos2};
use glam::Vec3;

pub(in crate::app) const ZOOM_SPEED_RANGE: std::ops::RangeInclusive<f32> = 0.1..=5.0;
const FIELD_OF_VIEW_DEGREES: f32 = 75.0;
const NEAR_PLANE: f32 = 0.1;
const MIN_DISTANCE: f32 = 1.0;
const MAX_DISTANCE: f32 = 100.0;
const ROTATE_RADIANS_PER_PIXEL: f32 = 0.006;
const MAX_PITCH: f32 = 1.5;
/// Fraction of the pointer motion the scene follows while panning.
const PAN_SPEED: f32 = 0.8;

/// A point projected into screen space. `depth` grows away from the camera.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct Projected {
    pub(in crate::app) screen: Pos2,
    pub(in crate::app) depth: f32,
    pub(in crate::app) pixels_per_unit: f32,
}

/// Perspective camera orbiting a pannable target, initially the origin.
#[derive(Clone, Debug)]
pub(in crate::app) struct OrbitCamera {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pub(in crate::app) zoom_speed: f32,
}

impl OrbitCamera {
    pub(in crate::app) fn new(zoom_speed: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 10.0,
            zoom_speed: zoom_speed.clamp(*ZOOM_SPEED_RANGE.start(), *ZOOM_SPEED_RANGE.end()),
        }
    }

    pub(in crate::app) fn distance(&self) -> f32 {
        self.distance
    }

    pub(in crate::app) fn orbit(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ROTATE_RADIANS_PER_PIXEL;
        self.pitch = (self.pitch + drag.y * ROTATE_RADIANS_PER_PIXEL).clamp(-MAX_PITCH, MAX_PITCH);
    }

    pub(in crate::app) fn zoom(&mut self, scroll: f32) {
        let factor = (-scroll * 0.0015 * self.zoom_speed).exp();
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Slides the target across the view plane so the scene trails the pointer.
    pub(in crate::app) fn pan(&mut self, drag: Vec2, viewport_height: f32) {
        let focal = focal_length(viewport_height);
        if focal <= f32::EPSILON {
            return;
        }
        let (_, right, up) = self.basis();
        let units_per_pixel = self.distance / focal * PAN_SPEED;
        self.target += (up * drag.y - right * drag.x) * units_per_pixel;
    }

    fn offset(&self) -> Vec3 {
        Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance
    }

    /// Forward, right and up unit vectors of the view.
    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (-self.offset()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        (forward, right, up)
    }

    pub(in crate::app) fn project(&self, rect: Rect, point: Vec3) -> Option<Projected> {
        let eye = self.target + self.offset();
        let (forward, right, up) = self.basis();

        let relative = point - eye;
        let depth = relative.dot(forward);
        if depth <= NEAR_PLANE {
            return None;
        }

        let pixels_per_unit = focal_length(rect.height()) / depth;
        let center = rect.center();
        Some(Projected {
            screen: pos2(
                center.x + relative.dot(right) * pixels_per_unit,
                center.y - relative.dot(up) * pixels_per_unit,
            ),
            depth,
            pixels_per_unit,
        })
    }
}

fn focal_length(viewport_height: f32) -> f32 {
    (viewport_height * 0.5) / (FIELD_OF_VIEW_DEGREES.to_radians() * 0.5).tan()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let camera = OrbitCamera::new(1.2);
        let projected = camera.project(viewport(), Vec3::ZERO).expect("in front");
        assert_eq!(projected.screen, viewport().center());
        assert!((projected.depth - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_axes_map_to_screen_directions() {
        let camera = OrbitCamera::new(1.2);
        let right = camera.project(viewport(), Vec3::X).expect("in front");
        let up = camera.project(viewport(), Vec3::Y).expect("in front");
        assert!(right.screen.x > viewport().center().x);
        assert!(up.screen.y < viewport().center().y);
    }

    #[test]
    fn test_points_behind_camera_are_culled() {
        let camera = OrbitCamera::new(1.2);
        assert!(camera.project(viewport(), Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn test_pan_moves_scene_with_the_drag() {
        let mut camera = OrbitCamera::new(1.2);
        camera.pan(Vec2::new(100.0, -50.0), viewport().height());

        let origin = camera.project(viewport(), Vec3::ZERO).expect("in front");
        let center = viewport().center();
        assert!((origin.screen.x - (center.x + 80.0)).abs() < 1e-3);
        assert!((origin.screen.y - (center.y - 40.0)).abs() < 1e-3);
        assert!((origin.depth - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_pivots_around_panned_target() {
        let mut camera = OrbitCamera::new(1.2);
        camera.pan(Vec2::new(120.0, 0.0), viewport().height());
        let target = camera.target;
        camera.orbit(Vec2::new(200.0, 80.0));

        let pivot = camera.project(viewport(), target).expect("in front");
        assert!((pivot.screen.x - viewport().center().x).abs() < 1e-3);
        assert!((pivot.screen.y - viewport().center().y).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_stays_within_distance_limits() {
        let mut camera = OrbitCamera::new(5.0);
        for _ in 0..100 {
            camera.zoom(500.0);
        }
        assert_eq!(camera.distance(), MIN_DISTANCE);
        for _ in 0..100 {
            camera.zoom(-500.0);
        }
        assert_eq!(camera.distance(), MAX_DISTANCE);
    }
}
