use eframe::egui::{self, Align, Context, Layout};

use crate::engine::Engine;

mod camera;
mod graph;
mod render_utils;
mod ui;

use camera::OrbitCamera;

pub struct GraphEditorApp {
    engine: Engine,
    camera: OrbitCamera,
    editor: EditorForm,
    status: Option<String>,
}

#[derive(Default)]
struct EditorForm {
    label: String,
    first_id: String,
    second_id: String,
    filter: String,
}

impl GraphEditorApp {
    pub fn new(engine: Engine, zoom_speed: f32) -> Self {
        Self {
            engine,
            camera: OrbitCamera::new(zoom_speed),
            editor: EditorForm::default(),
            status: None,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(status = %message, "editor status");
        self.status = Some(message);
    }
}

impl eframe::App for GraphEditorApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("graph3d-editor");
                    ui.separator();
                    let store = self.engine.store();
                    ui.label(format!("nodes: {}", store.len()));
                    ui.label(format!("edges: {}", store.edges().len()));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(node) = self.engine.hovered().and_then(|id| store.node(id)) {
                            ui.label(format!("hover: {} ({})", node.label, node.id));
                        }
                    });
                });
            });

        egui::SidePanel::left("editor")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_editor(ui));

        egui::SidePanel::right("tuning")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));

        // The layout never settles, so keep frames coming.
        ctx.request_repaint();
    }
}
