//! The eframe application: top bar, side panels, status line and the plot.

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::category::MetricCategory;
use crate::data::session::{Session, ViewCommand};
use crate::gmx::GmxRunner;
use crate::panels::{ExportPanel, Panel, SamplesPanel, StylesPanel};
use crate::persistence::{self, ViewStateSerde, DEFAULT_STATE_FILE};
use crate::plot::ComposedPlot;
use crate::workdir::{has_results, validate_folder};

use super::plot_view::show_plot;

pub struct ViewerApp {
    pub session: Session,
    /// Recomposed only when a command changes the view.
    plot: ComposedPlot,
    runner: GmxRunner,
    right_side_panels: Vec<Box<dyn Panel>>,
    export_panel: ExportPanel,
    status: String,
    /// Files of the current view that failed to parse, one note each.
    skipped: Vec<String>,
    /// Set by the Analyse button; the run starts on the next frame so the
    /// status line is painted first.
    analysis_requested: bool,
}

impl ViewerApp {
    pub fn new(mut session: Session, cfg: ViewerConfig) -> Self {
        session.export_settings = cfg.export;
        let mut app = Self {
            status: format!("Opened {}", session.workdir().display()),
            skipped: Vec::new(),
            plot: ComposedPlot::Empty(Default::default()),
            session,
            runner: GmxRunner::new(cfg.gmx_path),
            right_side_panels: vec![
                Box::new(SamplesPanel::default()),
                Box::new(StylesPanel::default()),
            ],
            export_panel: ExportPanel::default(),
            analysis_requested: false,
        };
        app.recompose();
        app
    }

    pub fn plot(&self) -> &ComposedPlot {
        &self.plot
    }

    /// Status message followed by a note per skipped file.
    pub fn status_line(&self) -> String {
        let mut line = self.status.clone();
        for note in &self.skipped {
            if !line.is_empty() {
                line.push_str(" | ");
            }
            line.push_str(note);
        }
        line
    }

    fn recompose(&mut self) {
        let (plot, skipped) = self.session.compose_with_skipped();
        self.plot = plot;
        self.skipped = skipped.iter().map(ToString::to_string).collect();
    }

    /// Apply `commands` in order and recompose once.
    pub fn apply_commands(&mut self, commands: Vec<ViewCommand>) {
        if commands.is_empty() {
            return;
        }
        for command in commands {
            let export_path = match &command {
                ViewCommand::Export { path, .. } => Some(path.clone()),
                _ => None,
            };
            match self.session.apply(command) {
                Ok(()) => {
                    if let Some(path) = export_path {
                        self.status = format!("Saved {}", path.display());
                        log::info!("{}", self.status);
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    self.status = e.to_string();
                }
            }
        }
        self.recompose();
    }

    fn run_analysis(&mut self) {
        let workdir = self.session.workdir().to_path_buf();
        let status = validate_folder(&workdir);
        if !status.is_valid() {
            self.status = format!("Cannot analyse: missing {}", status.missing.join(", "));
            log::warn!("{}", self.status);
            return;
        }
        match self.runner.run(&workdir) {
            Ok(report) => {
                self.status = report.summary();
                if !report.is_success() {
                    log::warn!("{}", self.status);
                }
            }
            Err(e) => {
                log::error!("analysis failed: {}", e);
                self.status = format!("Analysis failed: {e}");
            }
        }
        self.session.refresh();
        self.recompose();
    }

    fn save_view_state(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(DEFAULT_STATE_FILE)
            .add_filter("JSON", &["json"])
            .save_file()
        else {
            return;
        };
        let state = ViewStateSerde::capture(&self.session);
        self.status = match persistence::save_state_to_path(&state, &path) {
            Ok(()) => format!("Saved view state to {}", path.display()),
            Err(e) => {
                log::error!("{}", e);
                e.to_string()
            }
        };
    }

    fn load_view_state(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        else {
            return;
        };
        match persistence::load_state_from_path(&path) {
            Ok(state) => {
                state.apply_to(&mut self.session);
                self.recompose();
                self.status = format!("Loaded view state from {}", path.display());
            }
            Err(e) => {
                log::error!("{}", e);
                self.status = e.to_string();
            }
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui, commands: &mut Vec<ViewCommand>) {
        ui.horizontal(|ui| {
            if !has_results(self.session.workdir())
                && ui
                    .button("▶ Analyse")
                    .on_hover_text("Run the gmx analysis for this folder")
                    .clicked()
            {
                self.status = "Running analysis…".to_string();
                self.analysis_requested = true;
            }

            let current = self.session.category();
            egui::ComboBox::from_id_salt("category")
                .selected_text(current.display_name())
                .show_ui(ui, |ui| {
                    for category in MetricCategory::ALL {
                        if ui
                            .selectable_label(category == current, category.display_name())
                            .clicked()
                            && category != current
                        {
                            commands.push(ViewCommand::SelectCategory(category));
                        }
                    }
                });

            ui.separator();
            for panel in self.right_side_panels.iter_mut() {
                let label = panel.title_and_icon();
                let visible = &mut panel.state_mut().visible;
                if ui.selectable_label(*visible, label).clicked() {
                    *visible = !*visible;
                }
            }

            ui.separator();
            self.export_panel.render_menu(ui, &self.session, commands);

            ui.menu_button("💾 View", |ui| {
                if ui.button("Save view state…").clicked() {
                    self.save_view_state();
                    ui.close();
                }
                if ui.button("Load view state…").clicked() {
                    self.load_view_state();
                    ui.close();
                }
            });
        });
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.analysis_requested {
            self.analysis_requested = false;
            self.run_analysis();
        }

        let mut commands = Vec::new();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.render_top_bar(ui, &mut commands);
        });

        egui::TopBottomPanel::bottom("status_line").show(ctx, |ui| {
            ui.label(self.status_line());
        });

        if self.right_side_panels.iter().any(|p| p.state().visible) {
            egui::SidePanel::right("side_panels")
                .resizable(true)
                .default_width(240.0)
                .show(ctx, |ui| {
                    for panel in self.right_side_panels.iter_mut() {
                        if !panel.state().visible {
                            continue;
                        }
                        ui.strong(panel.title_and_icon());
                        panel.render_panel(ui, &self.session, &mut commands);
                        ui.separator();
                    }
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            show_plot(ui, &self.plot);
        });

        self.apply_commands(commands);

        if self.analysis_requested {
            ctx.request_repaint();
        }
    }
}
