//! mdplot crate root: re-exports and module wiring.
//!
//! A viewer for the `.xvg` files written by the GROMACS analysis tools. The
//! crate is split into cohesive modules:
//! - `data`: series parsing, residue segmentation, styles, visibility and the
//!   owned view [`Session`]
//! - `plot`: backend-neutral chart composition
//! - `export`: SVG/PNG/JPEG/PDF output of a composed chart
//! - `workdir`: simulation folder layout and comparison staging
//! - `gmx`: the external analysis run
//! - `config` / `persistence`: viewer configuration and saved view state
//! - `app` / `panels`: the egui window

pub mod app;
pub mod config;
pub mod data;
pub mod export;
pub mod gmx;
pub mod panels;
pub mod persistence;
pub mod plot;
pub mod workdir;

// Public re-exports for a compact external API
pub use app::{run_viewer, ViewerApp};
pub use config::{ConfigError, ViewerConfig};
pub use data::category::MetricCategory;
pub use data::session::{Session, SessionError, ViewCommand};
pub use data::trace_look::{LineStyle, Marker, StyleSpec};
pub use export::{ExportFormat, ExportSettings};
pub use gmx::{GmxRunner, RunReport};
pub use plot::{compose, ComposedPlot};
