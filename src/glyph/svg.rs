//! Reading outlines from a normalized SVG artifact.
//!
//! A normalized artifact contains filled paths only, so we need a small
//! subset of SVG: the root `viewBox` (or `width`/`height`), the `transform`
//! of every ancestor, and the `d` attribute of each `path`.

use std::borrow::Cow;

use kurbo::{Affine, BezPath, Rect};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::transform::{parse_length, parse_transform, parse_view_box};
use crate::error::ImportError;

/// Elements whose contents are never rendered directly.
static NOT_RENDERED: &[&[u8]] =
    &[b"defs", b"clipPath", b"mask", b"symbol", b"pattern", b"marker", b"metadata"];

/// The drawable content of an SVG document, in user units.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SvgOutline {
    /// The document's view box, if it declares a size.
    pub(crate) view_box: Option<Rect>,
    /// Every rendered path, with ancestor transforms applied.
    pub(crate) paths: Vec<BezPath>,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    transform: Affine,
    hidden: bool,
}

pub(crate) fn parse_svg(xml: &str) -> Result<SvgOutline, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut outline = SvgOutline { view_box: None, paths: Vec::new() };
    let mut stack: Vec<Frame> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event().map_err(ImportError::Xml)? {
            Event::Start(start) => {
                let frame = enter_element(&start, stack.last(), &mut seen_root, &mut outline)?;
                stack.push(frame);
            }
            Event::Empty(start) => {
                enter_element(&start, stack.last(), &mut seen_root, &mut outline)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Eof => break,
            _other => (),
        }
    }

    if !seen_root {
        return Err(ImportError::NotSvg);
    }
    Ok(outline)
}

fn enter_element(
    start: &BytesStart,
    parent: Option<&Frame>,
    seen_root: &mut bool,
    outline: &mut SvgOutline,
) -> Result<Frame, ImportError> {
    let name = start.local_name();
    let name = name.as_ref();

    let parent = match parent {
        Some(parent) => *parent,
        None if *seen_root => return Err(ImportError::NotSvg),
        None if name == b"svg" => {
            *seen_root = true;
            outline.view_box = root_view_box(start)?;
            return Ok(Frame { transform: Affine::IDENTITY, hidden: false });
        }
        None => return Err(ImportError::NotSvg),
    };

    let mut frame = Frame {
        transform: parent.transform,
        hidden: parent.hidden || NOT_RENDERED.iter().any(|n| *n == name),
    };
    if let Some(transform) = attribute(start, b"transform")? {
        frame.transform = frame.transform * parse_transform(&transform)?;
    }
    if is_display_none(start)? {
        frame.hidden = true;
    }

    if name == b"path" && !frame.hidden {
        if let Some(data) = attribute(start, b"d")? {
            let path = BezPath::from_svg(&data).map_err(ImportError::PathData)?;
            outline.paths.push(frame.transform * path);
        }
    }
    Ok(frame)
}

fn root_view_box(start: &BytesStart) -> Result<Option<Rect>, ImportError> {
    if let Some(view_box) = attribute(start, b"viewBox")? {
        return parse_view_box(&view_box).map(Some);
    }
    let width = match attribute(start, b"width")? {
        Some(width) => parse_length("width", &width)?,
        None => None,
    };
    let height = match attribute(start, b"height")? {
        Some(height) => parse_length("height", &height)?,
        None => None,
    };
    Ok(width.zip(height).map(|(w, h)| Rect::new(0.0, 0.0, w, h)))
}

fn is_display_none(start: &BytesStart) -> Result<bool, ImportError> {
    if attribute(start, b"display")?.is_some_and(|v| v.trim() == "none") {
        return Ok(true);
    }
    Ok(attribute(start, b"style")?.is_some_and(|style| {
        style.split(';').any(|decl| {
            let mut parts = decl.splitn(2, ':');
            matches!(
                (parts.next().map(str::trim), parts.next().map(str::trim)),
                (Some("display"), Some("none"))
            )
        })
    }))
}

fn attribute<'a>(start: &'a BytesStart, key: &[u8]) -> Result<Option<Cow<'a, str>>, ImportError> {
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ImportError::Xml(e.into()))?;
        if attr.key.as_ref() == key {
            return attr.unescape_value().map(Some).map_err(ImportError::Xml);
        }
    }
    Ok(None)
}
