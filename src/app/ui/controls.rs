use std::ops::RangeInclusive;

use eframe::egui::{self, Key, Response, RichText, Ui};

use crate::physics::{ATTRACTION_RANGE, CENTERING_RANGE, REPULSION_RANGE};

use super::super::GraphEditorApp;
use super::super::camera::ZOOM_SPEED_RANGE;

const SLIDER_KEY_BASE_RATE: f32 = 10.0;
const SLIDER_KEY_ACCEL_PER_SEC: f32 = 9.0;
const SLIDER_KEY_ACCEL_MAX: f32 = 40.0;

#[derive(Clone, Copy, Default)]
struct SliderKeyHoldState {
    held_secs: f32,
}

fn slider_key_accel_multiplier(hold_secs: f32) -> f32 {
    let ramp = hold_secs * SLIDER_KEY_ACCEL_PER_SEC;
    (1.0 + ramp + ramp * ramp * 0.15).min(SLIDER_KEY_ACCEL_MAX)
}

fn slider_key_step(range: &RangeInclusive<f32>) -> f32 {
    ((range.end() - range.start()) / 200.0).max(0.0005)
}

/// Arrow keys nudge a focused slider, faster the longer they are held.
fn apply_slider_arrow_acceleration(
    ui: &Ui,
    response: &Response,
    value: &mut f32,
    range: &RangeInclusive<f32>,
) -> bool {
    let state_id = response.id.with("arrow_key_hold_state");
    if !response.has_focus() {
        ui.ctx().data_mut(|data| {
            data.insert_temp(state_id, SliderKeyHoldState::default());
        });
        return false;
    }

    let (delta_time, increase_down, decrease_down) = ui.input(|input| {
        (
            input.stable_dt.min(0.1),
            input.key_down(Key::ArrowRight) || input.key_down(Key::ArrowUp),
            input.key_down(Key::ArrowLeft) || input.key_down(Key::ArrowDown),
        )
    });

    let direction = (increase_down as i8) - (decrease_down as i8);
    let mut hold_state = ui.ctx().data(|data| {
        data.get_temp::<SliderKeyHoldState>(state_id)
            .unwrap_or_default()
    });
    if direction == 0 {
        hold_state.held_secs = 0.0;
        ui.ctx()
            .data_mut(|data| data.insert_temp(state_id, hold_state));
        return false;
    }

    hold_state.held_secs += delta_time;
    let speed = SLIDER_KEY_BASE_RATE * slider_key_accel_multiplier(hold_state.held_secs);
    let delta = direction as f32 * slider_key_step(range) * speed * delta_time;

    let old_value = *value;
    *value = (*value + delta).clamp(*range.start(), *range.end());
    ui.ctx().request_repaint();
    ui.ctx()
        .data_mut(|data| data.insert_temp(state_id, hold_state));
    (*value - old_value).abs() > f32::EPSILON
}

fn tuning_slider(
    ui: &mut Ui,
    value: &mut f32,
    range: RangeInclusive<f32>,
    text: &str,
    hover: &str,
) -> bool {
    let response = ui
        .add(
            egui::Slider::new(value, range.clone())
                .step_by(0.001)
                .text(text)
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text(hover);
    if response.hovered() {
        response.request_focus();
    }
    let changed = response.changed();
    changed | apply_slider_arrow_acceleration(ui, &response, value, &range)
}

impl GraphEditorApp {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Tuning");
        ui.separator();

        ui.label(RichText::new("Camera").strong());
        tuning_slider(
            ui,
            &mut self.camera.zoom_speed,
            ZOOM_SPEED_RANGE,
            "Zoom speed",
            "How far one scroll step moves the camera.",
        );

        ui.separator();
        ui.label(RichText::new("Physics").strong());

        let mut config = self.engine.physics();
        let mut repulsion = config.repulsion();
        let mut attraction = config.attraction();
        let mut centering = config.centering();

        let mut changed = tuning_slider(
            ui,
            &mut repulsion,
            REPULSION_RANGE,
            "Repulsion",
            "Inverse-square push between every pair of nodes.",
        );
        changed |= tuning_slider(
            ui,
            &mut attraction,
            ATTRACTION_RANGE,
            "Attraction",
            "Spring pull along each edge, proportional to its length.",
        );
        changed |= tuning_slider(
            ui,
            &mut centering,
            CENTERING_RANGE,
            "Centering",
            "Pull of every node back toward the origin.",
        );

        if changed {
            config.set_repulsion(repulsion);
            config.set_attraction(attraction);
            config.set_centering(centering);
            *self.engine.physics_mut() = config;
            tracing::debug!(repulsion, attraction, centering, "physics retuned");
        }

        ui.add_space(4.0);
        ui.label(format!("Damping: {:.2}", config.damping()));
    }
}
