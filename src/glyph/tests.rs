use super::outline::split_contours;
use super::*;
use kurbo::{Point, Shape};

fn glyph(name: &str) -> Glyph {
    Glyph::new(Name::new(name).unwrap(), 0xE000)
}

fn assert_rect_near(actual: Rect, expected: Rect) {
    let close = |a: f64, b: f64| (a - b).abs() < 1e-6;
    assert!(
        close(actual.x0, expected.x0)
            && close(actual.y0, expected.y0)
            && close(actual.x1, expected.x1)
            && close(actual.y1, expected.y1),
        "{actual:?} != {expected:?}"
    );
}

#[test]
fn new_glyph_is_empty() {
    let glyph = glyph("home");
    assert_eq!(glyph.name(), "home");
    assert_eq!(glyph.codepoint, 0xE000);
    assert!(glyph.is_empty());
    assert_eq!(glyph.contour_count(), 0);
}

#[test]
fn import_ring() {
    let mut glyph = glyph("ring");
    glyph
        .import_outlines("testdata/normalized/ring.svg", &FontInfo::default(), Default::default())
        .unwrap();

    assert_eq!(glyph.width, 1000.0);
    assert_eq!(glyph.contour_count(), 2);
    let unit = 1000.0 / 24.0;
    assert_rect_near(
        glyph.outline.bounding_box(),
        Rect::new(2.0 * unit, 2.0 * unit, 22.0 * unit, 22.0 * unit),
    );

    let contours = split_contours(&glyph.outline);
    assert!(contours[0].area() < 0.0, "outer contour should be clockwise");
    assert!(contours[1].area() > 0.0, "hole should be counter-clockwise");
}

#[test]
fn import_wide_drawing() {
    let mut glyph = glyph("wide");
    let xml = include_str!("../../testdata/normalized/wide.svg");
    glyph.import_svg(xml, &FontInfo::default(), Default::default()).unwrap();

    assert_eq!(glyph.width, 2000.0);
    assert_eq!(glyph.contour_count(), 1);
    assert_rect_near(glyph.outline.bounding_box(), Rect::new(500.0, 0.0, 1500.0, 1000.0));
    assert!(glyph.outline.area() < 0.0);
}

#[test]
fn metrics_follow_font_info() {
    let info = FontInfo::default().units_per_em(2048).vertical_metrics(1800, 248);
    let mut glyph = glyph("ring");
    let xml = include_str!("../../testdata/normalized/ring.svg");
    glyph.import_svg(xml, &info, Default::default()).unwrap();

    assert_eq!(glyph.width, 2048.0);
    let unit = 2048.0 / 24.0;
    assert_rect_near(
        glyph.outline.bounding_box(),
        Rect::new(2.0 * unit, 1800.0 - 22.0 * unit, 22.0 * unit, 1800.0 - 2.0 * unit),
    );
}

#[test]
fn missing_view_box_uses_em_square() {
    let mut glyph = glyph("square");
    let xml = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0H500V500H0Z"/></svg>"#;
    glyph.import_svg(xml, &FontInfo::default(), Default::default()).unwrap();

    assert_eq!(glyph.width, 1000.0);
    assert_eq!(glyph.outline.elements()[0], PathEl::MoveTo(Point::new(0.0, 1000.0)));
    assert_rect_near(glyph.outline.bounding_box(), Rect::new(0.0, 500.0, 500.0, 1000.0));
}

#[test]
fn import_options() {
    // counter-clockwise once flipped into font units
    let xml = r#"<svg viewBox="0 0 10 10"><path d="M1 1V9H9V1Z"/><path d="M1 1V9H9V1Z"/></svg>"#;
    let info = FontInfo::default();

    let mut cleaned = glyph("twice");
    cleaned.import_svg(xml, &info, ImportOptions::default()).unwrap();
    assert_eq!(cleaned.contour_count(), 1);
    assert!(cleaned.outline.area() < 0.0);

    let raw_options = ImportOptions { remove_overlap: false, correct_direction: false };
    let mut raw = glyph("twice");
    raw.import_svg(xml, &info, raw_options).unwrap();
    assert_eq!(raw.contour_count(), 2);
    assert!(raw.outline.area() > 0.0);
}

#[test]
fn reimport_replaces_outline() {
    let info = FontInfo::default();
    let mut glyph = glyph("ring");
    let ring = include_str!("../../testdata/normalized/ring.svg");
    let wide = include_str!("../../testdata/normalized/wide.svg");
    glyph.import_svg(ring, &info, Default::default()).unwrap();
    glyph.import_svg(wide, &info, Default::default()).unwrap();
    assert_eq!(glyph.contour_count(), 1);
}

#[test]
fn import_errors() {
    let info = FontInfo::default();
    let mut glyph = glyph("broken");

    let err = glyph
        .import_outlines("testdata/normalized/blank.svg", &info, Default::default())
        .unwrap_err();
    assert!(matches!(err, ImportError::Empty));

    let err = glyph
        .import_outlines("testdata/normalized/nope.svg", &info, Default::default())
        .unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));

    let err = glyph.import_svg("<html/>", &info, Default::default()).unwrap_err();
    assert!(matches!(err, ImportError::NotSvg));
    assert!(glyph.is_empty());
}
