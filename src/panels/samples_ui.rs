use egui::{Color32, Ui};

use super::panel_trait::{Panel, PanelState};
use crate::data::session::{Session, ViewCommand};

/// Show/hide checkboxes for the samples of the current category.
pub struct SamplesPanel {
    pub state: PanelState,
}

impl Default for SamplesPanel {
    fn default() -> Self {
        let mut state = PanelState::new("Samples", "☑");
        state.visible = true;
        Self { state }
    }
}

impl Panel for SamplesPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &Session, commands: &mut Vec<ViewCommand>) {
        ui.horizontal(|ui| {
            if ui.button("Select All").clicked() {
                commands.push(ViewCommand::SetAllVisible(true));
            }
            if ui.button("Deselect All").clicked() {
                commands.push(ViewCommand::SetAllVisible(false));
            }
        });
        ui.separator();

        if session.files().is_empty() {
            ui.weak(format!("No files in {}/", session.category().subdir()));
            return;
        }

        egui::ScrollArea::vertical()
            .id_salt("samples_scroll")
            .show(ui, |ui| {
                for file in session.files() {
                    let name = &file.logical_name;
                    let [r, g, b] = session.styles.resolve(name, file.index).rgb();
                    ui.horizontal(|ui| {
                        let mut visible = session.visibility.is_visible(name);
                        if ui.checkbox(&mut visible, name.as_str()).changed() {
                            commands.push(ViewCommand::SetVisible(name.clone(), visible));
                        }
                        ui.colored_label(Color32::from_rgb(r, g, b), "━━");
                    });
                }
            });
    }
}
