//! Image export of a composed plot.
//!
//! Charts are drawn with plotters. SVG export uses the SVG backend and PDF
//! converts that same SVG document with svg2pdf. PNG and JPEG draw on a bitmap
//! backend sized from the figure inches and DPI.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use plotters::coord::{CoordTranslate, Shift};
use plotters::element::{DynElement, IntoDynElement};
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, DottedLineSeries};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::trace_look::{LineStyle, Marker};
use crate::plot::{Chart, ComposedPlot, EmptyPlotNotice, PlotLine, LINE_WIDTH, MARKER_SIZE};

/// CSS pixels per inch; the unit of the SVG backend.
const SVG_PIXELS_PER_INCH: f64 = 96.0;
const POINTS_PER_INCH: f64 = 72.0;

const FONT_FAMILY: &str = "sans-serif";
const TITLE_SIZE: f64 = 14.0;
const LABEL_SIZE: f64 = 11.0;
const TICK_SIZE: f64 = 9.0;
const LEGEND_SIZE: f64 = 8.0;
const NOTICE_SIZE: f64 = 12.0;
const MARGIN: f64 = 10.0;
const X_LABEL_AREA: f64 = 30.0;
const Y_LABEL_AREA: f64 = 42.0;
const TICK_COUNT: usize = 7;
const LEGEND_SAMPLE: f64 = 18.0;

const AXES_BACKGROUND: RGBColor = RGBColor(0xf8, 0xf9, 0xfa);
const GRID_COLOR: RGBColor = RGBColor(0xb0, 0xb0, 0xb0);
const LEGEND_BORDER: RGBColor = RGBColor(0xcc, 0xcc, 0xcc);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Png,
    Jpeg,
    Pdf,
    Svg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Png,
        ExportFormat::Jpeg,
        ExportFormat::Pdf,
        ExportFormat::Svg,
    ];

    pub fn from_path(path: &Path) -> Option<ExportFormat> {
        let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            "pdf" => Some(ExportFormat::Pdf),
            "svg" => Some(ExportFormat::Svg),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Svg => "svg",
        }
    }

    /// Name and extensions for a file dialog filter.
    pub fn filter(self) -> (&'static str, &'static [&'static str]) {
        match self {
            ExportFormat::Png => ("PNG", &["png"]),
            ExportFormat::Jpeg => ("JPG", &["jpg", "jpeg"]),
            ExportFormat::Pdf => ("PDF", &["pdf"]),
            ExportFormat::Svg => ("SVG", &["svg"]),
        }
    }
}

/// Figure size and raster resolution of exported images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width_in: 6.0,
            height_in: 4.0,
            dpi: 500,
        }
    }
}

impl ExportSettings {
    pub fn pixel_size(&self) -> (u32, u32) {
        inches_to_pixels(self.width_in, self.height_in, f64::from(self.dpi.max(1)))
    }

    /// Size of the SVG document in CSS pixels.
    pub fn svg_size(&self) -> (u32, u32) {
        inches_to_pixels(self.width_in, self.height_in, SVG_PIXELS_PER_INCH)
    }
}

fn inches_to_pixels(width_in: f64, height_in: f64, per_inch: f64) -> (u32, u32) {
    (
        (width_in * per_inch).round().max(1.0) as u32,
        (height_in * per_inch).round().max(1.0) as u32,
    )
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("cannot tell the image format of {0}; use .png, .jpg, .pdf or .svg")]
    UnknownFormat(PathBuf),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing the chart failed: {0}")]
    Draw(String),
    #[error("invalid SVG document: {0}")]
    Svg(String),
    #[error("could not allocate a {0}x{1} image")]
    Allocation(u32, u32),
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF conversion failed: {0}")]
    Pdf(String),
}

fn draw_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> ExportError {
    ExportError::Draw(e.to_string())
}

/// Save `plot` to `path`. The format is taken from `format`, or from the file
/// extension when `None`.
pub fn save(
    plot: &ComposedPlot,
    path: &Path,
    format: Option<ExportFormat>,
    settings: &ExportSettings,
) -> Result<(), ExportError> {
    let format = format
        .or_else(|| ExportFormat::from_path(path))
        .ok_or_else(|| ExportError::UnknownFormat(path.to_path_buf()))?;

    match format {
        ExportFormat::Svg => write_bytes(path, render_svg(plot, settings)?.as_bytes())?,
        ExportFormat::Pdf => write_bytes(path, &svg_to_pdf(&render_svg(plot, settings)?)?)?,
        ExportFormat::Png => {
            render_bitmap(plot, settings)?.save_with_format(path, ImageFormat::Png)?;
        }
        ExportFormat::Jpeg => {
            render_bitmap(plot, settings)?.save_with_format(path, ImageFormat::Jpeg)?;
        }
    }
    log::info!("exported plot to {} ({:?})", path.display(), format);
    Ok(())
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Draw `plot` as an SVG document of [`ExportSettings::svg_size`].
pub fn render_svg(plot: &ComposedPlot, settings: &ExportSettings) -> Result<String, ExportError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, settings.svg_size()).into_drawing_area();
        draw_plot(&root, plot, Scale::per_inch(SVG_PIXELS_PER_INCH)).map_err(draw_error)?;
    }
    Ok(svg)
}

/// Draw `plot` on an RGB bitmap of [`ExportSettings::pixel_size`].
pub fn render_bitmap(plot: &ComposedPlot, settings: &ExportSettings) -> Result<RgbImage, ExportError> {
    let (width, height) = settings.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let scale = Scale::per_inch(f64::from(settings.dpi.max(1)));
        draw_plot(&root, plot, scale).map_err(draw_error)?;
    }
    RgbImage::from_raw(width, height, buffer).ok_or(ExportError::Allocation(width, height))
}

fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, ExportError> {
    let mut options = svg2pdf::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = svg2pdf::usvg::Tree::from_str(svg, &options)
        .map_err(|e| ExportError::Svg(e.to_string()))?;
    let mut page = svg2pdf::PageOptions::default();
    // usvg reports sizes in CSS pixels
    page.dpi = SVG_PIXELS_PER_INCH as f32;
    svg2pdf::to_pdf(&tree, svg2pdf::ConversionOptions::default(), page)
        .map_err(|e| ExportError::Pdf(format!("{e:?}")))
}

/// Backend pixels per typographic point.
#[derive(Debug, Clone, Copy)]
struct Scale(f64);

impl Scale {
    fn per_inch(pixels: f64) -> Self {
        Scale(pixels / POINTS_PER_INCH)
    }

    fn px(self, points: f64) -> f64 {
        points * self.0
    }

    fn px_i32(self, points: f64) -> i32 {
        self.px(points).round().max(1.0) as i32
    }

    fn px_u32(self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }
}

fn draw_plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    plot: &ComposedPlot,
    scale: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    match plot {
        ComposedPlot::Empty(notice) => draw_notice(root, notice, scale)?,
        ComposedPlot::Chart(chart) => draw_chart(root, chart, scale)?,
    }
    root.present()
}

/// Framed placeholder text in place of the axes.
fn draw_notice<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    notice: &EmptyPlotNotice,
    scale: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (w, h) = root.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);
    root.draw(&Rectangle::new(
        [(w / 10, h / 10), (w * 9 / 10, h * 9 / 10)],
        BLACK.stroke_width(scale.px_u32(1.0)),
    ))?;
    let style = (FONT_FAMILY, scale.px(NOTICE_SIZE))
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(notice.message, (w / 2, h / 2), style))
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
    scale: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let mut builder = ChartBuilder::on(root);
    builder
        .margin(scale.px_u32(MARGIN))
        .x_label_area_size(scale.px_u32(X_LABEL_AREA))
        .y_label_area_size(scale.px_u32(Y_LABEL_AREA));
    if !chart.meta.title.is_empty() {
        builder.caption(
            chart.meta.title,
            (FONT_FAMILY, scale.px(TITLE_SIZE)).into_font(),
        );
    }
    let mut ctx = builder.build_cartesian_2d(
        chart.x_range.min..chart.x_range.max,
        chart.y_range.min..chart.y_range.max,
    )?;
    ctx.plotting_area().fill(&AXES_BACKGROUND)?;

    let mut mesh = ctx.configure_mesh();
    mesh.x_desc(chart.meta.x_label)
        .y_desc(chart.meta.y_label)
        .axis_desc_style((FONT_FAMILY, scale.px(LABEL_SIZE)).into_font())
        .label_style((FONT_FAMILY, scale.px(TICK_SIZE)).into_font())
        .x_labels(TICK_COUNT)
        .y_labels(TICK_COUNT)
        .axis_style(BLACK.stroke_width(scale.px_u32(0.8)));
    if chart.grid {
        mesh.bold_line_style(GRID_COLOR.mix(0.7).stroke_width(scale.px_u32(0.6)))
            .light_line_style(WHITE.mix(0.0));
    } else {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    for line in &chart.lines {
        draw_line(&mut ctx, line, scale)?;
    }

    if chart.show_legend {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.9))
            .border_style(LEGEND_BORDER)
            .label_font((FONT_FAMILY, scale.px(LEGEND_SIZE)).into_font())
            .position(SeriesLabelPosition::UpperRight)
            .margin(scale.px_u32(6.0))
            .draw()?;
    }
    Ok(())
}

/// Stroke (solid, dashed or dash-dot) followed by the subsampled markers. The
/// marker series carries the legend entry.
fn draw_line<'a, DB, CT>(
    ctx: &mut ChartContext<'a, DB, CT>,
    line: &PlotLine,
    scale: Scale,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend + 'a,
    CT: CoordTranslate<From = (f64, f64)>,
{
    let [r, g, b] = line.style.rgb();
    let color = RGBColor(r, g, b);
    let stroke = color.stroke_width(scale.px_u32(LINE_WIDTH));
    let points: Vec<(f64, f64)> = line
        .points
        .iter()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .map(|p| (p[0], p[1]))
        .collect();
    let dash = |len: f64| scale.px_u32(len * LINE_WIDTH);

    match (line.style.line_style, line.style.line_style.dash_pattern()) {
        (LineStyle::None, _) => {}
        (_, Some(&[on, off])) => {
            ctx.draw_series(DashedLineSeries::new(
                points.clone(),
                dash(on),
                dash(off),
                stroke,
            ))?;
        }
        (_, Some(&[on, gap, dot, tail])) => {
            let period = on + gap + dot + tail;
            ctx.draw_series(DashedLineSeries::new(
                points.clone(),
                dash(on),
                dash(period - on),
                stroke,
            ))?;
            let dot_radius = (scale.px_i32(dot * LINE_WIDTH) / 2).max(1);
            ctx.draw_series(DottedLineSeries::new(
                points.clone(),
                dash(on + gap + dot / 2.0),
                dash(period),
                move |c: (i32, i32)| Circle::new(c, dot_radius, color.filled()),
            ))?;
        }
        _ => {
            ctx.draw_series(LineSeries::new(points, stroke))?;
        }
    }

    let marker = line.style.marker;
    let glyph_size = scale.px_i32(MARKER_SIZE);
    let sample = scale.px_i32(LEGEND_SAMPLE);
    let with_stroke = line.style.line_style != LineStyle::None;
    ctx.draw_series(
        line.marker_points()
            .filter(|p| marker != Marker::None && p[0].is_finite() && p[1].is_finite())
            .map(|p| EmptyElement::at((p[0], p[1])) + marker_glyph(marker, glyph_size, color)),
    )?
    .label(line.label.as_str())
    .legend(move |(x, y)| {
        let glyph = EmptyElement::at((x + sample / 2, y)) + marker_glyph(marker, glyph_size, color);
        if with_stroke {
            (glyph + PathElement::new(vec![(-sample / 2, 0), (sample / 2, 0)], stroke)).into_dyn()
        } else {
            glyph.into_dyn()
        }
    });
    Ok(())
}

/// `marker` centred on the pixel offset `(0, 0)`, `size` pixels across.
fn marker_glyph<'a, DB: DrawingBackend + 'a>(
    marker: Marker,
    size: i32,
    color: RGBColor,
) -> DynElement<'a, DB, (i32, i32)> {
    let r = (size / 2).max(1);
    let big = f64::from(r) * 1.2;
    let fill = color.filled();
    let stroke = color.stroke_width((size / 4).max(1) as u32);
    match marker {
        Marker::None => EmptyElement::at((0, 0)).into_dyn(),
        Marker::Point => Circle::new((0, 0), (r / 2).max(1), fill).into_dyn(),
        Marker::Circle => Circle::new((0, 0), r, fill).into_dyn(),
        Marker::Square => Rectangle::new([(-r, -r), (r, r)], fill).into_dyn(),
        Marker::Diamond => Polygon::new(polygon(&[big], 4, 0.0), fill).into_dyn(),
        Marker::TriangleUp => TriangleMarker::new((0, 0), big.round() as i32, fill).into_dyn(),
        Marker::TriangleDown => Polygon::new(polygon(&[big], 3, 180.0), fill).into_dyn(),
        Marker::TriangleLeft => Polygon::new(polygon(&[big], 3, 270.0), fill).into_dyn(),
        Marker::TriangleRight => Polygon::new(polygon(&[big], 3, 90.0), fill).into_dyn(),
        Marker::Pentagon => Polygon::new(polygon(&[f64::from(r) * 1.1], 5, 0.0), fill).into_dyn(),
        Marker::Star => {
            let outer = f64::from(r) * 1.3;
            Polygon::new(polygon(&[outer, outer * 0.42], 10, 0.0), fill).into_dyn()
        }
        Marker::Plus => (EmptyElement::at((0, 0))
            + PathElement::new(vec![(-r, 0), (r, 0)], stroke)
            + PathElement::new(vec![(0, -r), (0, r)], stroke))
        .into_dyn(),
        Marker::Cross => Cross::new((0, 0), r, stroke).into_dyn(),
    }
}

/// Vertices of a regular polygon around the origin, cycling through `radii`.
/// Rotation is clockwise from twelve o'clock.
fn polygon(radii: &[f64], count: usize, rotation_deg: f64) -> Vec<(i32, i32)> {
    (0..count)
        .map(|i| {
            let r = radii[i % radii.len()];
            let a = (rotation_deg + 360.0 * i as f64 / count as f64).to_radians();
            ((r * a.sin()).round() as i32, (-r * a.cos()).round() as i32)
        })
        .collect()
}
