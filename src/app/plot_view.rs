//! On-screen rendering of a [`ComposedPlot`] with `egui_plot`.

use egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::data::trace_look::{LineStyle, Marker};
use crate::plot::{Chart, ComposedPlot, PlotLine, LINE_WIDTH, MARKER_SIZE};

pub fn show_plot(ui: &mut Ui, plot: &ComposedPlot) {
    match plot {
        ComposedPlot::Chart(chart) => show_chart(ui, chart),
        ComposedPlot::Empty(notice) => {
            ui.centered_and_justified(|ui| {
                ui.heading(notice.message);
            });
        }
    }
}

fn show_chart(ui: &mut Ui, chart: &Chart) {
    if !chart.meta.title.is_empty() {
        ui.vertical_centered(|ui| {
            ui.heading(chart.meta.title);
        });
    }

    let mut plot = Plot::new("xvg_plot")
        .x_axis_label(chart.meta.x_label)
        .y_axis_label(chart.meta.y_label)
        .show_grid(chart.grid)
        .include_x(chart.x_range.min)
        .include_x(chart.x_range.max)
        .include_y(chart.y_range.min)
        .include_y(chart.y_range.max);
    if chart.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for line in &chart.lines {
            let [r, g, b] = line.style.rgb();
            let color = Color32::from_rgb(r, g, b);
            // same-name layers share one legend entry
            for style in egui_line_styles(line.style.line_style) {
                plot_ui.line(
                    Line::new(line.label.as_str(), PlotPoints::from(line.points.clone()))
                        .color(color)
                        .width(LINE_WIDTH as f32)
                        .style(style),
                );
            }
            if let Some(points) = marker_points(line, color) {
                plot_ui.points(points);
            }
        }
    });
}

fn marker_points(line: &PlotLine, color: Color32) -> Option<Points<'static>> {
    let (shape, radius) = egui_marker(line.style.marker)?;
    let pts: Vec<[f64; 2]> = line.marker_points().copied().collect();
    if pts.is_empty() {
        return None;
    }
    Some(
        Points::new(line.label.clone(), pts)
            .shape(shape)
            .radius(radius)
            .filled(true)
            .color(color),
    )
}

/// Dash length of the on-screen dash-dot stroke; dots repeat at the same pitch
/// so one lands in every gap.
const DASH_DOT_PITCH: f32 = 12.0;

/// Stroke layers drawn for a line style. Empty for `None` (markers only).
fn egui_line_styles(style: LineStyle) -> Vec<egui_plot::LineStyle> {
    match style {
        LineStyle::Solid => vec![egui_plot::LineStyle::Solid],
        LineStyle::Dashed => vec![egui_plot::LineStyle::Dashed { length: 8.0 }],
        // egui_plot has no dash-dot: a long dash with a dotted layer on top
        LineStyle::DashDot => vec![
            egui_plot::LineStyle::Dashed {
                length: DASH_DOT_PITCH,
            },
            egui_plot::LineStyle::Dotted {
                spacing: DASH_DOT_PITCH,
            },
        ],
        LineStyle::Dotted => vec![egui_plot::LineStyle::Dotted { spacing: 4.0 }],
        LineStyle::None => Vec::new(),
    }
}

/// Closest egui shape and radius for a marker.
fn egui_marker(marker: Marker) -> Option<(MarkerShape, f32)> {
    let radius = MARKER_SIZE as f32 * 0.75;
    let shape = match marker {
        Marker::None => return None,
        Marker::Point => return Some((MarkerShape::Circle, radius * 0.5)),
        Marker::Circle => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::Diamond | Marker::Pentagon => MarkerShape::Diamond,
        Marker::TriangleUp => MarkerShape::Up,
        Marker::TriangleDown => MarkerShape::Down,
        Marker::TriangleLeft => MarkerShape::Left,
        Marker::TriangleRight => MarkerShape::Right,
        Marker::Star => MarkerShape::Asterisk,
        Marker::Plus => MarkerShape::Plus,
        Marker::Cross => MarkerShape::Cross,
    };
    Some((shape, radius))
}
