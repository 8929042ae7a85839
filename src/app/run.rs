//! Top-level entry point for running the viewer as a native window.

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::session::Session;

use super::viewer_app::ViewerApp;

/// Window icon: three offset traces on a white tile.
const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="64" height="64" viewBox="0 0 64 64">
<rect width="64" height="64" rx="10" fill="#ffffff"/>
<polyline points="6,50 18,30 28,38 40,16 58,24" fill="none" stroke="#1f77b4" stroke-width="4"/>
<polyline points="6,56 20,44 32,48 44,32 58,38" fill="none" stroke="#2ca02c" stroke-width="4"/>
<polyline points="6,42 16,20 30,26 42,8 58,12" fill="none" stroke="#ff7f0e" stroke-width="4"/>
</svg>"##;

/// Open the viewer on `session` and block until the window is closed.
pub fn run_viewer(session: Session, cfg: ViewerConfig) -> eframe::Result<()> {
    let title = cfg.title.clone();
    let mut viewport = egui::ViewportBuilder::default()
        .with_title(&title)
        .with_inner_size(egui::vec2(cfg.window_size[0], cfg.window_size[1]));
    if let Some(icon) = load_app_icon_svg() {
        viewport = viewport.with_icon(icon);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app = ViewerApp::new(session, cfg);
    eframe::run_native(&title, opts, Box::new(|_cc| Ok(Box::new(app))))
}

/// Render [`ICON_SVG`] to an [`egui::IconData`].
fn load_app_icon_svg() -> Option<egui::IconData> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(ICON_SVG, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    Some(egui::IconData {
        rgba: pixmap.take(),
        width: size.width(),
        height: size.height(),
    })
}
