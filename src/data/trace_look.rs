//! Visual styling for plotted samples: line pattern, marker glyph and color.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Line pattern of a trace. `None` draws no connecting line at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    Solid,
    Dashed,
    DashDot,
    Dotted,
    None,
}

impl LineStyle {
    pub const ALL: [LineStyle; 5] = [
        LineStyle::Solid,
        LineStyle::Dashed,
        LineStyle::DashDot,
        LineStyle::Dotted,
        LineStyle::None,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LineStyle::Solid => "Solid",
            LineStyle::Dashed => "Dashed",
            LineStyle::DashDot => "Dash-dot",
            LineStyle::Dotted => "Dotted",
            LineStyle::None => "None",
        }
    }

    /// SVG `stroke-dasharray` in units of the line width, `None` for solid lines.
    pub fn dash_pattern(self) -> Option<&'static [f64]> {
        match self {
            LineStyle::Solid | LineStyle::None => None,
            LineStyle::Dashed => Some(&[3.7, 1.6]),
            LineStyle::DashDot => Some(&[6.4, 1.6, 1.0, 1.6]),
            LineStyle::Dotted => Some(&[1.0, 1.65]),
        }
    }
}

/// Marker glyph drawn on sampled points. `None` draws no markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marker {
    None,
    Point,
    Circle,
    Square,
    Diamond,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Pentagon,
    Star,
    Plus,
    Cross,
}

impl Marker {
    pub const ALL: [Marker; 13] = [
        Marker::None,
        Marker::Point,
        Marker::Circle,
        Marker::Square,
        Marker::Diamond,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::TriangleLeft,
        Marker::TriangleRight,
        Marker::Pentagon,
        Marker::Star,
        Marker::Plus,
        Marker::Cross,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Marker::None => "None",
            Marker::Point => "Point",
            Marker::Circle => "Circle",
            Marker::Square => "Square",
            Marker::Diamond => "Diamond",
            Marker::TriangleUp => "Triangle up",
            Marker::TriangleDown => "Triangle down",
            Marker::TriangleLeft => "Triangle left",
            Marker::TriangleRight => "Triangle right",
            Marker::Pentagon => "Pentagon",
            Marker::Star => "Star",
            Marker::Plus => "Plus",
            Marker::Cross => "Cross",
        }
    }
}

/// Marker cycle for samples without an override.
pub const DEFAULT_MARKERS: [Marker; 8] = [
    Marker::Circle,
    Marker::Square,
    Marker::TriangleUp,
    Marker::Diamond,
    Marker::TriangleDown,
    Marker::TriangleLeft,
    Marker::TriangleRight,
    Marker::Pentagon,
];

/// Line-style cycle for samples without an override. Every default is solid.
pub const DEFAULT_LINE_STYLES: [LineStyle; 7] = [LineStyle::Solid; 7];

/// Color cycle for samples without an override.
pub const DEFAULT_COLORS: [&str; 12] = [
    "#1f77b4", "#2ca02c", "#ff7f0e", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf", "#1a55ff", "#8b008b", "#d62728",
];

/// Color names offered by the style editor.
pub const NAMED_COLORS: [(&str, [u8; 3]); 13] = [
    ("blue", [0, 0, 255]),
    ("green", [0, 128, 0]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("gray", [128, 128, 128]),
    ("olive", [128, 128, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("black", [0, 0, 0]),
    ("red", [255, 0, 0]),
];

/// Resolve a color name or `#rrggbb` string to RGB.
pub fn parse_color(color: &str) -> Option<[u8; 3]> {
    let c = color.trim();
    if let Some(hex) = c.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some([channel(0)?, channel(2)?, channel(4)?]);
    }
    NAMED_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(c))
        .map(|(_, rgb)| *rgb)
}

pub fn color_to_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}

/// Rendering style of one sample.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSpec {
    pub line_style: LineStyle,
    pub marker: Marker,
    pub color: String,
}

impl StyleSpec {
    /// Default style for the sample at `index` in the category's file list.
    pub fn for_index(index: usize) -> Self {
        Self {
            line_style: DEFAULT_LINE_STYLES[index % DEFAULT_LINE_STYLES.len()],
            marker: DEFAULT_MARKERS[index % DEFAULT_MARKERS.len()],
            color: DEFAULT_COLORS[index % DEFAULT_COLORS.len()].to_string(),
        }
    }

    /// RGB of the style's color. Unknown colors fall back to gray.
    pub fn rgb(&self) -> [u8; 3] {
        parse_color(&self.color).unwrap_or([128, 128, 128])
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("unknown color {0:?}; use a color name or #rrggbb")]
    UnknownColor(String),
}

/// Per-sample style overrides with the index-derived defaults as fallback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleBook {
    overrides: BTreeMap<String, StyleSpec>,
}

impl StyleBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Style for `logical_name`. An override is returned verbatim; otherwise the
    /// default for `index` (the sample's position in the un-filtered file list).
    pub fn resolve(&self, logical_name: &str, index: usize) -> StyleSpec {
        self.overrides
            .get(logical_name)
            .cloned()
            .unwrap_or_else(|| StyleSpec::for_index(index))
    }

    pub fn set_override(&mut self, logical_name: &str, spec: StyleSpec) -> Result<(), StyleError> {
        if parse_color(&spec.color).is_none() {
            return Err(StyleError::UnknownColor(spec.color));
        }
        self.overrides.insert(logical_name.to_string(), spec);
        Ok(())
    }

    pub fn clear_override(&mut self, logical_name: &str) -> Option<StyleSpec> {
        self.overrides.remove(logical_name)
    }

    pub fn override_for(&self, logical_name: &str) -> Option<&StyleSpec> {
        self.overrides.get(logical_name)
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&String, &StyleSpec)> {
        self.overrides.iter()
    }
}
