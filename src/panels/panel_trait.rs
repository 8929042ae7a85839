use egui::Ui;

use crate::data::session::{Session, ViewCommand};

#[derive(Debug, Clone, Copy)]
pub struct PanelState {
    pub title: &'static str,
    pub icon: Option<&'static str>,
    pub visible: bool,
}

impl PanelState {
    pub fn new(title: &'static str, icon: &'static str) -> Self {
        Self {
            title,
            icon: Some(icon),
            visible: false,
        }
    }
}

/// A side panel or menu of the viewer.
///
/// Panels never mutate the [`Session`] directly: they read it and push
/// [`ViewCommand`]s, which the app applies after the frame is laid out.
pub trait Panel {
    fn state(&self) -> &PanelState;
    fn state_mut(&mut self) -> &mut PanelState;

    fn title(&self) -> &'static str {
        self.state().title
    }

    fn icon_only(&self) -> Option<&'static str> {
        self.state().icon
    }

    fn title_and_icon(&self) -> String {
        match self.icon_only() {
            Some(icon) => format!("{} {}", icon, self.title()),
            None => self.title().to_string(),
        }
    }

    // Optional hooks with default empty impls
    fn render_menu(&mut self, _ui: &mut Ui, _session: &Session, _commands: &mut Vec<ViewCommand>) {}
    fn render_panel(&mut self, _ui: &mut Ui, _session: &Session, _commands: &mut Vec<ViewCommand>) {
    }
}
