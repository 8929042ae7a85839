pub mod export_ui;
pub mod panel_trait;
pub mod samples_ui;
pub mod styles_ui;

pub use export_ui::ExportPanel;
pub use panel_trait::{Panel, PanelState};
pub use samples_ui::SamplesPanel;
pub use styles_ui::StylesPanel;
