use mdplot::data::trace_look::{
    color_to_hex, parse_color, LineStyle, Marker, StyleBook, StyleError, StyleSpec,
    DEFAULT_COLORS, DEFAULT_MARKERS,
};

#[test]
fn defaults_follow_the_index() {
    let book = StyleBook::new();
    let first = book.resolve("a", 0);
    assert_eq!(first.line_style, LineStyle::Solid);
    assert_eq!(first.marker, Marker::Circle);
    assert_eq!(first.color, "#1f77b4");

    let third = book.resolve("c", 2);
    assert_eq!(third.marker, Marker::TriangleUp);
    assert_eq!(third.color, "#ff7f0e");
}

#[test]
fn defaults_wrap_around_each_cycle() {
    let book = StyleBook::new();
    let s = book.resolve("late", 12);
    assert_eq!(s.color, DEFAULT_COLORS[0]);
    assert_eq!(s.marker, DEFAULT_MARKERS[12 % 8]);
}

#[test]
fn override_wins_regardless_of_index() {
    let mut book = StyleBook::new();
    let spec = StyleSpec {
        line_style: LineStyle::Dashed,
        marker: Marker::Star,
        color: "red".to_string(),
    };
    book.set_override("holo", spec.clone()).unwrap();
    assert_eq!(book.resolve("holo", 0), spec);
    assert_eq!(book.resolve("holo", 7), spec);
    // other names keep their defaults
    assert_eq!(book.resolve("apo", 1), StyleSpec::for_index(1));
}

#[test]
fn clearing_restores_the_default() {
    let mut book = StyleBook::new();
    book.set_override("holo", StyleSpec::for_index(5)).unwrap();
    assert!(book.clear_override("holo").is_some());
    assert_eq!(book.resolve("holo", 0), StyleSpec::for_index(0));
    assert!(book.override_for("holo").is_none());
}

#[test]
fn unknown_color_is_rejected() {
    let mut book = StyleBook::new();
    let spec = StyleSpec {
        color: "ultraviolet".to_string(),
        ..StyleSpec::for_index(0)
    };
    assert_eq!(
        book.set_override("holo", spec),
        Err(StyleError::UnknownColor("ultraviolet".to_string()))
    );
    assert!(book.override_for("holo").is_none());
}

#[test]
fn colors_parse_by_name_and_hex() {
    assert_eq!(parse_color("red"), Some([255, 0, 0]));
    assert_eq!(parse_color("Orange"), Some([255, 165, 0]));
    assert_eq!(parse_color("#1f77b4"), Some([0x1f, 0x77, 0xb4]));
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("#gg0000"), None);
    assert_eq!(color_to_hex([0x1f, 0x77, 0xb4]), "#1f77b4");
}

#[test]
fn dash_patterns() {
    assert!(LineStyle::Solid.dash_pattern().is_none());
    assert!(LineStyle::None.dash_pattern().is_none());
    assert_eq!(LineStyle::DashDot.dash_pattern().map(<[f64]>::len), Some(4));
}
