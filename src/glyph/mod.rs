//! Data related to individual glyphs.

mod outline;
mod svg;
mod transform;
#[cfg(test)]
mod tests;

use std::path::Path;

use kurbo::{BezPath, PathEl, Rect};

use crate::error::ImportError;
use crate::fontinfo::{FontInfo, ImportOptions};
use crate::name::Name;

/// A glyph: one icon, mapped to one codepoint.
///
/// The outline is in font units, with y pointing up and the baseline at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// The name of the glyph.
    pub(crate) name: Name,
    /// The codepoint this glyph is mapped to.
    pub codepoint: u32,
    /// Advance width.
    pub width: f64,
    /// The glyph outline, as closed contours.
    pub outline: BezPath,
}

impl Glyph {
    /// Returns a new, empty [`Glyph`] with the given `name` and `codepoint`.
    pub fn new(name: Name, codepoint: u32) -> Self {
        Glyph { name, codepoint, width: 0.0, outline: BezPath::new() }
    }

    /// Returns the name of the glyph.
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Returns the number of contours in the outline.
    pub fn contour_count(&self) -> usize {
        self.outline.elements().iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count()
    }

    /// Returns true if the glyph has no outline.
    pub fn is_empty(&self) -> bool {
        self.outline.elements().is_empty()
    }

    /// Replace this glyph's outline with the drawing in the SVG file at `path`.
    ///
    /// The drawing's view box (or, lacking one, the em square) is scaled so
    /// that its height spans the em, and the advance width follows from its
    /// aspect ratio. Contours are then cleaned up according to `options`.
    pub fn import_outlines(
        &mut self,
        path: impl AsRef<Path>,
        info: &FontInfo,
        options: ImportOptions,
    ) -> Result<(), ImportError> {
        let xml = std::fs::read_to_string(path.as_ref()).map_err(ImportError::Io)?;
        self.import_svg(&xml, info, options)
    }

    pub(crate) fn import_svg(
        &mut self,
        xml: &str,
        info: &FontInfo,
        options: ImportOptions,
    ) -> Result<(), ImportError> {
        let svg = svg::parse_svg(xml)?;
        let em = f64::from(info.units_per_em);
        let view_box = svg.view_box.unwrap_or_else(|| Rect::new(0.0, 0.0, em, em));
        let to_font = transform::user_to_font(view_box, info.units_per_em, info.ascent);

        let mut contours = Vec::new();
        for mut path in svg.paths {
            path.apply_affine(to_font);
            contours.extend(outline::split_contours(&path));
        }
        if options.remove_overlap {
            contours = outline::remove_overlaps(contours);
        }
        if options.correct_direction {
            outline::correct_directions(&mut contours);
        }
        if contours.is_empty() {
            return Err(ImportError::Empty);
        }

        log::trace!("glyph '{}': {} contours", self.name, contours.len());
        self.width = (view_box.width() * em / view_box.height()).round();
        self.outline = contours.into_iter().flatten().collect();
        Ok(())
    }
}
