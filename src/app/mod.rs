//! The viewer window.
//!
//! | Sub-module      | Responsibility |
//! | --------------- | -------------- |
//! | [`viewer_app`]  | [`ViewerApp`] (eframe), command dispatch and the analysis action |
//! | [`plot_view`]   | Drawing a composed chart with `egui_plot` |
//! | [`run`]         | [`run_viewer()`] entry point and icon loading |

mod plot_view;
mod run;
mod viewer_app;

pub use run::run_viewer;
pub use viewer_app::ViewerApp;
