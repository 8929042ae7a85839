use egui::Ui;

use super::panel_trait::{Panel, PanelState};
use crate::data::session::{Session, ViewCommand};
use crate::export::ExportFormat;

pub struct ExportPanel {
    pub state: PanelState,
}

impl Default for ExportPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Export", "📤"),
        }
    }
}

impl Panel for ExportPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_menu(&mut self, ui: &mut Ui, session: &Session, commands: &mut Vec<ViewCommand>) {
        ui.menu_button(self.title_and_icon(), |ui| {
            for format in ExportFormat::ALL {
                let (label, extensions) = format.filter();
                if ui.button(format!("Save as {label}")).clicked() {
                    let file_name = format!(
                        "{}.{}",
                        session.category().file_name().trim_end_matches(".xvg"),
                        format.extension()
                    );
                    if let Some(path) = rfd::FileDialog::new()
                        .set_file_name(file_name)
                        .add_filter(label, extensions)
                        .save_file()
                    {
                        commands.push(ViewCommand::Export {
                            path,
                            format: Some(format),
                        });
                    }
                    ui.close();
                }
            }
        });
    }
}
