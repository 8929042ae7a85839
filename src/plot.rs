//! Plot composition.
//!
//! Turns the parsed series of one category into a backend-neutral [`ComposedPlot`]:
//! - splitting residue RMSF series into per-chain segments
//! - dropping hidden samples
//! - resolving each line's style
//! - computing axis ranges and legend/layout flags
//!
//! The same composed geometry is drawn on screen by `app::plot_view` and written
//! to image files by [`crate::export`].

use crate::data::category::{AxisMeta, MetricCategory};
use crate::data::segments::segment;
use crate::data::trace_look::{StyleBook, StyleSpec};
use crate::data::visibility::VisibilitySet;
use crate::data::xvg::RawSeries;
use crate::workdir::DataFile;

pub const EMPTY_PLOT_MESSAGE: &str = "No samples selected for display";
pub const LINE_WIDTH: f64 = 1.5;
pub const MARKER_SIZE: f64 = 4.0;
/// Roughly this many markers are drawn per line.
pub const MARKERS_PER_LINE: usize = 20;
const RANGE_PADDING: f64 = 0.05;

/// A parsed file ready for composition.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub file: DataFile,
    pub series: RawSeries,
}

/// One drawn line.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLine {
    /// Legend label: the logical name, or the segment label for residue series.
    pub label: String,
    pub logical_name: String,
    pub points: Vec<[f64; 2]>,
    pub style: StyleSpec,
    /// Draw a marker on every n-th point.
    pub marker_every: usize,
}

impl PlotLine {
    /// Points that carry a marker.
    pub fn marker_points(&self) -> impl Iterator<Item = &[f64; 2]> {
        self.points.iter().step_by(self.marker_every.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub category: Option<MetricCategory>,
    pub meta: AxisMeta,
    pub lines: Vec<PlotLine>,
    pub show_legend: bool,
    pub grid: bool,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

/// Placeholder shown instead of axes when nothing is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyPlotNotice {
    pub message: &'static str,
}

impl Default for EmptyPlotNotice {
    fn default() -> Self {
        Self {
            message: EMPTY_PLOT_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComposedPlot {
    Chart(Chart),
    Empty(EmptyPlotNotice),
}

impl ComposedPlot {
    pub fn is_empty(&self) -> bool {
        matches!(self, ComposedPlot::Empty(_))
    }

    pub fn lines(&self) -> &[PlotLine] {
        match self {
            ComposedPlot::Chart(chart) => &chart.lines,
            ComposedPlot::Empty(_) => &[],
        }
    }
}

pub fn marker_every(point_count: usize) -> usize {
    (point_count / MARKERS_PER_LINE).max(1)
}

/// Compose the chart for `series`, given in category file-list order.
///
/// Hidden samples are skipped entirely. Every segment of a residue series is its
/// own line but shares the style of its file. Chart metadata comes from the
/// category of the last drawn series.
pub fn compose(
    series: &[LoadedSeries],
    styles: &StyleBook,
    visibility: &VisibilitySet,
) -> ComposedPlot {
    let mut lines = Vec::new();
    let mut category = None;

    for loaded in series {
        let name = &loaded.file.logical_name;
        if !visibility.is_visible(name) || loaded.series.is_empty() {
            continue;
        }
        let style = styles.resolve(name, loaded.file.index);
        category = loaded.series.category;

        if loaded.series.category == Some(MetricCategory::RmsfResidue) {
            for seg in segment(name, &loaded.series) {
                lines.push(PlotLine {
                    marker_every: marker_every(seg.points.len()),
                    label: seg.label,
                    logical_name: name.clone(),
                    points: seg.points,
                    style: style.clone(),
                });
            }
        } else {
            lines.push(PlotLine {
                label: name.clone(),
                logical_name: name.clone(),
                points: loaded.series.points.clone(),
                style,
                marker_every: marker_every(loaded.series.len()),
            });
        }
    }

    if lines.is_empty() {
        return ComposedPlot::Empty(EmptyPlotNotice::default());
    }

    let x_range = padded_range(lines.iter().flat_map(|l| l.points.iter().map(|p| p[0])));
    let y_range = padded_range(lines.iter().flat_map(|l| l.points.iter().map(|p| p[1])));
    ComposedPlot::Chart(Chart {
        category,
        meta: category
            .map(MetricCategory::axis_meta)
            .unwrap_or(AxisMeta::UNRESOLVED),
        show_legend: lines.len() > 1,
        grid: true,
        x_range,
        y_range,
        lines,
    })
}

/// Finite min/max of `values`, widened by 5% on both sides.
pub fn padded_range(values: impl Iterator<Item = f64>) -> AxisRange {
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values.filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return AxisRange { min: 0.0, max: 1.0 };
    }
    if min == max {
        let half = if min == 0.0 { 0.5 } else { min.abs() * 0.05 };
        return AxisRange {
            min: min - half,
            max: max + half,
        };
    }
    let pad = (max - min) * RANGE_PADDING;
    AxisRange {
        min: min - pad,
        max: max + pad,
    }
}
