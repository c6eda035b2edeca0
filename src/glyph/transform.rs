//! SVG coordinate systems: `transform` lists and `viewBox` rectangles.

use kurbo::{Affine, Rect};

use crate::error::ImportError;

/// Parse an SVG `transform` attribute into a single affine map.
///
/// Transform functions are applied in the order written, so
/// `translate(10) scale(2)` scales first and then translates.
pub(crate) fn parse_transform(src: &str) -> Result<Affine, ImportError> {
    let bad = || ImportError::Transform(src.to_owned());
    let mut result = Affine::IDENTITY;
    let mut rest = src.trim();
    while !rest.is_empty() {
        let open = rest.find('(').ok_or_else(bad)?;
        let close = rest.find(')').ok_or_else(bad)?;
        if close < open {
            return Err(bad());
        }
        let function = rest[..open].trim();
        let args = parse_numbers(&rest[open + 1..close]).ok_or_else(bad)?;
        let affine = match (function, args.as_slice()) {
            ("matrix", &[a, b, c, d, e, f]) => Affine::new([a, b, c, d, e, f]),
            ("translate", &[x]) => Affine::translate((x, 0.0)),
            ("translate", &[x, y]) => Affine::translate((x, y)),
            ("scale", &[s]) => Affine::scale(s),
            ("scale", &[x, y]) => Affine::scale_non_uniform(x, y),
            ("rotate", &[angle]) => Affine::rotate(angle.to_radians()),
            ("rotate", &[angle, cx, cy]) => {
                Affine::translate((cx, cy))
                    * Affine::rotate(angle.to_radians())
                    * Affine::translate((-cx, -cy))
            }
            ("skewX", &[angle]) => Affine::new([1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0]),
            ("skewY", &[angle]) => Affine::new([1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0]),
            _ => return Err(bad()),
        };
        result = result * affine;
        rest = rest[close + 1..].trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }
    Ok(result)
}

/// Parse a `viewBox` attribute: `min-x min-y width height`.
pub(crate) fn parse_view_box(src: &str) -> Result<Rect, ImportError> {
    match parse_numbers(src).as_deref() {
        Some(&[x, y, w, h]) if w > 0.0 && h > 0.0 => Ok(Rect::new(x, y, x + w, y + h)),
        _ => Err(ImportError::Dimension("viewBox", src.to_owned())),
    }
}

/// Parse a `width` or `height` attribute.
///
/// Absolute units are taken as user units; percentages carry no size and
/// yield `None`.
pub(crate) fn parse_length(attr: &'static str, src: &str) -> Result<Option<f64>, ImportError> {
    let src = src.trim();
    if src.ends_with('%') {
        return Ok(None);
    }
    let number = src.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    match number.trim().parse::<f64>() {
        Ok(value) if value > 0.0 => Ok(Some(value)),
        _ => Err(ImportError::Dimension(attr, src.to_owned())),
    }
}

/// The map from SVG user space (y down) into font units (y up).
///
/// `view_box` is scaled uniformly so that its height spans `units_per_em`,
/// with its top edge at `ascent`.
pub(crate) fn user_to_font(view_box: Rect, units_per_em: u16, ascent: u16) -> Affine {
    let scale = f64::from(units_per_em) / view_box.height();
    Affine::new([
        scale,
        0.0,
        0.0,
        -scale,
        -view_box.x0 * scale,
        f64::from(ascent) + view_box.y0 * scale,
    ])
}

/// Split a list of numbers separated by whitespace and/or commas.
///
/// As in SVG, a sign also starts a new number (`1-2` is `1, -2`), except in
/// an exponent.
fn parse_numbers(src: &str) -> Option<Vec<f64>> {
    let mut numbers = Vec::new();
    let mut start = None;
    let mut prev = ' ';
    for (i, c) in src.char_indices() {
        let separator = c.is_whitespace() || c == ',';
        let new_sign = (c == '-' || c == '+') && !matches!(prev, 'e' | 'E');
        if separator || new_sign {
            if let Some(s) = start.take() {
                numbers.push(src[s..i].parse().ok()?);
            }
        }
        if !separator && start.is_none() {
            start = Some(i);
        }
        prev = c;
    }
    if let Some(s) = start {
        numbers.push(src[s..].parse().ok()?);
    }
    Some(numbers)
}
