use eframe::egui::{self, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::GraphEditorApp;

const NODE_ROW_HEIGHT: f32 = 22.0;

impl GraphEditorApp {
    pub(in crate::app) fn draw_editor(&mut self, ui: &mut Ui) {
        ui.heading("Editor");
        ui.add_space(6.0);

        self.draw_node_form(ui);
        ui.separator();
        self.draw_edge_form(ui);
        ui.separator();
        self.draw_selection_actions(ui);

        if let Some(status) = &self.status {
            ui.add_space(4.0);
            ui.small(status.as_str());
        }

        ui.separator();
        self.draw_node_list(ui);
    }

    fn draw_node_form(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Add node").strong());
        ui.horizontal(|ui| {
            ui.text_edit_singleline(&mut self.editor.label)
                .on_hover_text("Label of the new node");
            let label = self.editor.label.trim().to_owned();
            if ui
                .add_enabled(!label.is_empty(), egui::Button::new("Add Node"))
                .clicked()
            {
                match self.engine.add_labelled_node(&label) {
                    Ok(id) => {
                        self.editor.label.clear();
                        self.set_status(format!("added {label} as {id}"));
                    }
                    Err(error) => self.set_status(error.to_string()),
                }
            }
        });
    }

    fn draw_edge_form(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Edges").strong());
        egui::Grid::new("edge_form").num_columns(2).show(ui, |ui| {
            ui.label("From");
            ui.text_edit_singleline(&mut self.editor.first_id);
            ui.end_row();
            ui.label("To");
            ui.text_edit_singleline(&mut self.editor.second_id);
            ui.end_row();
        });

        let first = self.editor.first_id.trim().to_owned();
        let second = self.editor.second_id.trim().to_owned();
        let ready = !first.is_empty() && !second.is_empty();

        ui.horizontal(|ui| {
            if ui
                .add_enabled(ready, egui::Button::new("Add Edge"))
                .clicked()
            {
                let message = match self.engine.add_edge(&first, &second) {
                    Some(_) => format!("connected {first} and {second}"),
                    None => edge_refusal(&self.engine, &first, &second),
                };
                self.set_status(message);
            }
            if ui
                .add_enabled(ready, egui::Button::new("Remove Edge"))
                .clicked()
            {
                let message = if self.engine.remove_edge(&first, &second) {
                    format!("disconnected {first} and {second}")
                } else {
                    format!("no edge between {first} and {second}")
                };
                self.set_status(message);
            }
            if ui
                .add_enabled(!first.is_empty(), egui::Button::new("Remove Node"))
                .on_hover_text("Removes the node in the From field")
                .clicked()
            {
                let message = if self.engine.remove_node(&first) {
                    format!("removed {first}")
                } else {
                    format!("unknown node {first}")
                };
                self.set_status(message);
            }
        });
    }

    fn draw_selection_actions(&mut self, ui: &mut Ui) {
        let selected = self.engine.selection().len();
        ui.label(RichText::new(format!("Selected nodes: {selected}")).strong());

        ui.horizontal_wrapped(|ui| {
            if ui
                .add_enabled(selected >= 2, egui::Button::new("Connect"))
                .on_hover_text("Connects every pair of selected nodes")
                .clicked()
            {
                let added = self.engine.connect_selected();
                self.set_status(format!("added {added} edges among {selected} nodes"));
            }
            if ui
                .add_enabled(selected >= 2, egui::Button::new("Disconnect"))
                .on_hover_text("Removes every edge between selected nodes")
                .clicked()
            {
                let removed = self.engine.disconnect_selected();
                self.set_status(format!("removed {removed} edges among {selected} nodes"));
            }
            if ui
                .add_enabled(selected > 0, egui::Button::new("Delete Selected"))
                .clicked()
            {
                let removed = self.engine.delete_selected();
                self.set_status(format!("deleted {removed} nodes"));
            }
            if ui
                .add_enabled(selected > 0, egui::Button::new("Clear Selection"))
                .clicked()
            {
                self.engine.clear_selection();
            }
        });
    }

    fn draw_node_list(&mut self, ui: &mut Ui) {
        ui.label(RichText::new("Nodes").strong());
        ui.add(
            egui::TextEdit::singleline(&mut self.editor.filter)
                .hint_text("Filter by id or label"),
        );

        let query = self.editor.filter.trim().to_owned();
        let matcher = SkimMatcherV2::default();
        let store = self.engine.store();
        let mut rows = store
            .nodes()
            .iter()
            .filter_map(|node| {
                if query.is_empty() {
                    return Some((0, node));
                }
                let score = fuzzy_match_score(&matcher, &node.label, &query)
                    .max(fuzzy_match_score(&matcher, &node.id, &query))?;
                Some((score, node))
            })
            .map(|(score, node)| {
                let selected = self.engine.selection().contains(&node.id);
                let text = format!(
                    "{}  ({}, degree {})",
                    node.label,
                    node.id,
                    store.degree(&node.id)
                );
                (score, node.id.clone(), text, selected)
            })
            .collect::<Vec<_>>();

        if !query.is_empty() {
            rows.sort_by(|a, b| b.0.cmp(&a.0));
        }

        let mut changed = None;
        egui::ScrollArea::vertical()
            .id_salt("node_list_scroll")
            .auto_shrink([false, false])
            .show_rows(ui, NODE_ROW_HEIGHT, rows.len(), |ui, row_range| {
                for index in row_range {
                    let Some((_, id, text, selected)) = rows.get(index) else {
                        continue;
                    };
                    let mut checked = *selected;
                    if ui.checkbox(&mut checked, text.as_str()).changed() {
                        changed = Some((id.clone(), checked));
                    }
                }
            });

        if let Some((id, checked)) = changed {
            self.engine.set_selected(&id, checked);
        }
    }
}

fn edge_refusal(engine: &crate::engine::Engine, first: &str, second: &str) -> String {
    let store = engine.store();
    if first == second {
        format!("{first} cannot connect to itself")
    } else if !store.contains(first) {
        format!("unknown node {first}")
    } else if !store.contains(second) {
        format!("unknown node {second}")
    } else {
        format!("{first} and {second} are already connected")
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}
