use egui::Ui;

use super::panel_trait::{Panel, PanelState};
use crate::data::session::{Session, ViewCommand};
use crate::data::trace_look::{color_to_hex, LineStyle, Marker, StyleSpec, NAMED_COLORS};

/// Per-sample line style, marker and color editor.
pub struct StylesPanel {
    pub state: PanelState,
}

impl Default for StylesPanel {
    fn default() -> Self {
        Self {
            state: PanelState::new("Styles", "🎨"),
        }
    }
}

impl Panel for StylesPanel {
    fn state(&self) -> &PanelState {
        &self.state
    }
    fn state_mut(&mut self) -> &mut PanelState {
        &mut self.state
    }

    fn render_panel(&mut self, ui: &mut Ui, session: &Session, commands: &mut Vec<ViewCommand>) {
        egui::ScrollArea::vertical()
            .id_salt("styles_scroll")
            .show(ui, |ui| {
                for file in session.files() {
                    let name = &file.logical_name;
                    let current = session.styles.resolve(name, file.index);
                    let overridden = session.styles.override_for(name).is_some();
                    egui::CollapsingHeader::new(name.as_str())
                        .id_salt(("style", name.as_str()))
                        .show(ui, |ui| {
                            if let Some(spec) = render_style_editor(ui, name, &current) {
                                commands.push(ViewCommand::SetStyle(name.clone(), spec));
                            }
                            if ui
                                .add_enabled(overridden, egui::Button::new("Reset"))
                                .on_hover_text("Go back to the default style for this sample")
                                .clicked()
                            {
                                commands.push(ViewCommand::ClearStyle(name.clone()));
                            }
                        });
                }
            });
    }
}

/// Returns the edited spec when any control changed.
fn render_style_editor(ui: &mut Ui, name: &str, current: &StyleSpec) -> Option<StyleSpec> {
    let mut spec = current.clone();

    egui::ComboBox::from_id_salt(("line_style", name))
        .selected_text(spec.line_style.label())
        .show_ui(ui, |ui| {
            for style in LineStyle::ALL {
                ui.selectable_value(&mut spec.line_style, style, style.label());
            }
        });

    egui::ComboBox::from_id_salt(("marker", name))
        .selected_text(spec.marker.label())
        .show_ui(ui, |ui| {
            for marker in Marker::ALL {
                ui.selectable_value(&mut spec.marker, marker, marker.label());
            }
        });

    ui.horizontal(|ui| {
        ui.label("Color");
        egui::ComboBox::from_id_salt(("color", name))
            .selected_text(spec.color.as_str())
            .show_ui(ui, |ui| {
                for (color_name, _) in NAMED_COLORS {
                    ui.selectable_value(&mut spec.color, color_name.to_string(), color_name);
                }
            });
        let mut rgb = spec.rgb();
        if ui.color_edit_button_srgb(&mut rgb).changed() {
            spec.color = color_to_hex(rgb);
        }
    });

    (spec != *current).then_some(spec)
}
