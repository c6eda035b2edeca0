//! Compiling the font object to a binary font file.

use std::io::Write;
use std::path::Path;

use kurbo::{BezPath, CubicBez, PathEl, Point};
use write_fonts::tables::cmap::Cmap;
use write_fonts::tables::glyf::{Bbox, GlyfLocaBuilder, SimpleGlyph};
use write_fonts::tables::head::Head;
use write_fonts::tables::hhea::Hhea;
use write_fonts::tables::hmtx::{Hmtx, LongMetric};
use write_fonts::tables::loca::LocaFormat;
use write_fonts::tables::maxp::Maxp;
use write_fonts::tables::name::{Name as NameTable, NameRecord};
use write_fonts::tables::os2::Os2;
use write_fonts::tables::post::Post;
use write_fonts::types::{FWord, Fixed, GlyphId, NameId, UfWord};
use write_fonts::FontBuilder;

use crate::error::CompileError;
use crate::{Error, Font, FontInfo};

/// Maximum distance, in font units, between a cubic and its quadratic
/// approximation.
const CUBIC_TO_QUAD_ACCURACY: f64 = 1.0;

const NOTDEF: &str = ".notdef";

/// A binary font container we know how to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// TrueType outlines in an sfnt container (`.ttf`).
    TrueType,
}

impl OutputFormat {
    /// Determine the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("ttf") => Ok(OutputFormat::TrueType),
            _ => Err(Error::UnsupportedFormat(path.to_owned())),
        }
    }
}

/// A glyph ready to be written: compiled outline plus metrics.
struct CompiledGlyph<'a> {
    name: &'a str,
    advance: u16,
    glyph: SimpleGlyph,
}

impl CompiledGlyph<'_> {
    fn is_empty(&self) -> bool {
        self.glyph.contours.is_empty()
    }

    fn num_points(&self) -> usize {
        self.glyph.contours.iter().map(|c| c.len()).sum()
    }

    /// `count` as a `maxp` value, or an error naming this glyph.
    fn limit(&self, what: &str, count: usize) -> Result<u16, CompileError> {
        u16::try_from(count).map_err(|_| CompileError::MalformedGlyph {
            name: self.name.to_owned(),
            reason: format!("too many {what} ({count})"),
        })
    }

    fn left_side_bearing(&self) -> i16 {
        if self.is_empty() {
            0
        } else {
            self.glyph.bbox.x_min
        }
    }

    fn right_side_bearing(&self) -> i16 {
        (i32::from(self.advance) - i32::from(self.glyph.bbox.x_max)).clamp(-0x8000, 0x7FFF) as i16
    }
}

/// Compile `font` to the bytes of a TrueType font file.
///
/// `.notdef` is always glyph 0; the font's glyphs follow in order.
pub fn compile_ttf(font: &Font) -> Result<Vec<u8>, CompileError> {
    let info = &font.info;
    let num_glyphs = font.len() + 1;
    if num_glyphs > usize::from(u16::MAX) {
        return Err(CompileError::TooManyGlyphs(num_glyphs));
    }

    let mut glyphs = Vec::with_capacity(num_glyphs);
    glyphs.push(notdef_glyph(info)?);
    for glyph in font.glyphs() {
        let path = to_quadratic(&glyph.outline);
        let simple = SimpleGlyph::from_bezpath(&path).map_err(|e| CompileError::MalformedGlyph {
            name: glyph.name().to_string(),
            reason: format!("{e:?}"),
        })?;
        glyphs.push(CompiledGlyph {
            name: glyph.name().as_str(),
            advance: glyph.width.round().clamp(0.0, f64::from(u16::MAX)) as u16,
            glyph: simple,
        });
    }

    let (mut max_points, mut max_contours) = (0, 0);
    for glyph in &glyphs {
        max_points = max_points.max(glyph.limit("points", glyph.num_points())?);
        max_contours = max_contours.max(glyph.limit("contours", glyph.glyph.contours.len())?);
    }

    let mut builder = GlyfLocaBuilder::new();
    for glyph in &glyphs {
        builder
            .add_glyph(&glyph.glyph)
            .map_err(|source| CompileError::Glyf { name: glyph.name.to_owned(), source })?;
    }
    let (glyf, loca, loca_format) = builder.build();

    let cmap = Cmap::from_mappings(cmap_entries(font)).map_err(CompileError::Cmap)?;
    let bbox = glyphs.iter().filter(|g| !g.is_empty()).map(|g| g.glyph.bbox).reduce(Bbox::union);
    let bbox = bbox.unwrap_or_default();

    let head = Head {
        font_revision: Fixed::from_f64(info.version),
        units_per_em: info.units_per_em,
        x_min: bbox.x_min,
        y_min: bbox.y_min,
        x_max: bbox.x_max,
        y_max: bbox.y_max,
        lowest_rec_ppem: 8,
        index_to_loc_format: match loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        },
        ..Default::default()
    };

    let hhea = horizontal_header(info, &glyphs);
    let hmtx = Hmtx {
        h_metrics: glyphs
            .iter()
            .map(|g| LongMetric { advance: g.advance, side_bearing: g.left_side_bearing() })
            .collect(),
        left_side_bearings: Vec::new(),
    };

    let maxp = Maxp {
        num_glyphs: num_glyphs as u16,
        max_points: Some(max_points),
        max_contours: Some(max_contours),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let os2 = os2_table(font, &glyphs, bbox);
    let name = name_table(info);
    let post = Post {
        underline_position: FWord::new(-(i16::try_from(info.units_per_em / 10).unwrap_or(0))),
        underline_thickness: FWord::new(i16::try_from(info.units_per_em / 20).unwrap_or(0)),
        ..Post::new_v2(glyphs.iter().map(|g| g.name))
    };

    let mut builder = FontBuilder::new();
    builder
        .add_table(&head)?
        .add_table(&hhea)?
        .add_table(&maxp)?
        .add_table(&os2)?
        .add_table(&hmtx)?
        .add_table(&cmap)?
        .add_table(&glyf)?
        .add_table(&loca)?
        .add_table(&name)?
        .add_table(&post)?;
    Ok(builder.build())
}

/// Write `data` to `path` through a temporary file in the same directory.
///
/// Either the whole file is replaced or `path` is left as it was.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<(), Error> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    file.write_all(data).map_err(|e| Error::io(file.path(), e))?;
    file.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// The `.notdef` glyph: a hollow box half an em wide.
fn notdef_glyph(info: &FontInfo) -> Result<CompiledGlyph<'static>, CompileError> {
    let em = f64::from(info.units_per_em);
    let advance = (em / 2.0).round();
    let margin = (em / 20.0).round();
    let (left, right, top) = (margin, advance - margin, (em * 0.7).round());

    let mut path = BezPath::new();
    // outer, clockwise
    path.move_to((left, 0.0));
    path.line_to((left, top));
    path.line_to((right, top));
    path.line_to((right, 0.0));
    path.close_path();
    // inner, counter-clockwise
    path.move_to((left + margin, margin));
    path.line_to((right - margin, margin));
    path.line_to((right - margin, top - margin));
    path.line_to((left + margin, top - margin));
    path.close_path();

    let glyph = SimpleGlyph::from_bezpath(&path).map_err(|e| CompileError::MalformedGlyph {
        name: NOTDEF.into(),
        reason: format!("{e:?}"),
    })?;
    Ok(CompiledGlyph { name: NOTDEF, advance: advance as u16, glyph })
}

/// Replace every cubic segment with quadratic approximations.
fn to_quadratic(path: &BezPath) -> BezPath {
    let mut result = BezPath::new();
    let mut current = Point::ZERO;
    let mut start = Point::ZERO;
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                start = p;
                current = p;
                result.move_to(p);
            }
            PathEl::LineTo(p) => {
                current = p;
                result.line_to(p);
            }
            PathEl::QuadTo(p1, p2) => {
                current = p2;
                result.quad_to(p1, p2);
            }
            PathEl::CurveTo(p1, p2, p3) => {
                let cubic = CubicBez::new(current, p1, p2, p3);
                for (_, _, quad) in cubic.to_quads(CUBIC_TO_QUAD_ACCURACY) {
                    result.quad_to(quad.p1, quad.p2);
                }
                current = p3;
            }
            PathEl::ClosePath => {
                current = start;
                result.close_path();
            }
        }
    }
    result
}

/// The character map entries for `font`.
///
/// Codepoints that cannot be encoded (surrogates, or anything beyond the
/// BMP for a BMP-only font) keep their glyph but get no entry.
fn cmap_entries(font: &Font) -> Vec<(char, GlyphId)> {
    let mut entries = Vec::with_capacity(font.len());
    for (i, glyph) in font.glyphs().enumerate() {
        let gid = GlyphId::new(i as u32 + 1);
        match char::from_u32(glyph.codepoint) {
            Some(ch) if font.info.encoding.contains(glyph.codepoint) => entries.push((ch, gid)),
            _ => log::warn!(
                "glyph '{}': codepoint 0x{:04X} cannot be encoded, leaving it unmapped",
                glyph.name(),
                glyph.codepoint
            ),
        }
    }
    entries
}

fn horizontal_header(info: &FontInfo, glyphs: &[CompiledGlyph]) -> Hhea {
    let inked = || glyphs.iter().filter(|g| !g.is_empty());
    let advance_width_max = glyphs.iter().map(|g| g.advance).max().unwrap_or(0);
    let min_lsb = inked().map(|g| g.left_side_bearing()).min().unwrap_or(0);
    let min_rsb = inked().map(|g| g.right_side_bearing()).min().unwrap_or(0);
    let x_max_extent = inked().map(|g| g.glyph.bbox.x_max).max().unwrap_or(0);

    Hhea {
        ascender: FWord::new(clamp_i16(i32::from(info.ascent))),
        descender: FWord::new(clamp_i16(-i32::from(info.descent))),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(advance_width_max),
        min_left_side_bearing: FWord::new(min_lsb),
        min_right_side_bearing: FWord::new(min_rsb),
        x_max_extent: FWord::new(x_max_extent),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: glyphs.len() as u16,
    }
}

fn os2_table(font: &Font, glyphs: &[CompiledGlyph], bbox: Bbox) -> Os2 {
    let info = &font.info;
    let advances: Vec<u32> =
        glyphs.iter().map(|g| u32::from(g.advance)).filter(|a| *a != 0).collect();
    let avg_width = match advances.len() {
        0 => 0,
        n => advances.iter().sum::<u32>() / n as u32,
    };
    let bmp = |cp: u32| cp.min(0xFFFF) as u16;
    let first = font.glyphs().map(|g| g.codepoint).min().map_or(0, bmp);
    let last = font.glyphs().map(|g| g.codepoint).max().map_or(0, bmp);

    Os2 {
        x_avg_char_width: clamp_i16(avg_width as i32),
        us_weight_class: 400,
        us_width_class: 5,
        us_first_char_index: first,
        us_last_char_index: last,
        s_typo_ascender: clamp_i16(i32::from(info.ascent)),
        s_typo_descender: clamp_i16(-i32::from(info.descent)),
        s_typo_line_gap: 0,
        us_win_ascent: info.ascent.max(bbox.y_max.max(0) as u16),
        us_win_descent: info.descent.max(bbox.y_min.min(0).unsigned_abs()),
        ..Default::default()
    }
}

fn name_table(info: &FontInfo) -> NameTable {
    let version = info.version_string();
    let font_name = info.font_name();
    let unique_id = format!("{};{}", version, font_name);
    let entries = [
        (NameId::FAMILY_NAME, info.get_family_name().to_owned()),
        (NameId::SUBFAMILY_NAME, info.get_style_name().to_owned()),
        (NameId::UNIQUE_ID, unique_id),
        (NameId::FULL_NAME, info.full_name()),
        (NameId::VERSION_STRING, version),
        (NameId::POSTSCRIPT_NAME, font_name),
    ];

    let mut table = NameTable::default();
    for (name_id, value) in entries {
        // Windows, Unicode BMP, English (US)
        table.name_record.push(NameRecord::new(3, 1, 0x409, name_id, value.into()));
    }
    table.name_record.sort();
    table
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
