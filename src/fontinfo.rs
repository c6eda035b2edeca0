//! Font metadata and import settings.

use std::borrow::Cow;

/// The family name used when none is configured.
pub const DEFAULT_FAMILY_NAME: &str = "IconFX";

/// The encoding scheme of a font's character map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Full Unicode, including code points beyond the Basic Multilingual Plane.
    #[default]
    UnicodeFull,
    /// The Basic Multilingual Plane only.
    UnicodeBmp,
}

impl Encoding {
    /// Returns true if `codepoint` can be mapped under this encoding.
    pub fn contains(self, codepoint: u32) -> bool {
        match self {
            Encoding::UnicodeFull => char::from_u32(codepoint).is_some(),
            Encoding::UnicodeBmp => codepoint <= 0xFFFF && char::from_u32(codepoint).is_some(),
        }
    }
}

/// Metadata describing the generated font.
///
/// The defaults describe an "IconFX Regular" font on a 1000 unit em, with
/// the whole em above the baseline. Font name and full name are derived from
/// the family and style names.
///
/// You construct `FontInfo` using builder semantics:
///
/// ```
/// # use iconfx::FontInfo;
/// let info = FontInfo::default().family_name("Glyphicons").units_per_em(2048);
/// assert_eq!(info.font_name(), "Glyphicons-Regular");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    pub(crate) family_name: Cow<'static, str>,
    pub(crate) style_name: Cow<'static, str>,
    /// The encoding scheme of the character map.
    pub encoding: Encoding,
    /// Units per em.
    pub units_per_em: u16,
    /// Ascent above the baseline, in font units.
    pub ascent: u16,
    /// Descent below the baseline, in font units, as a positive number.
    pub descent: u16,
    /// The font revision, written to `head` and the version string.
    pub version: f64,
}

impl Default for FontInfo {
    fn default() -> Self {
        FontInfo {
            family_name: DEFAULT_FAMILY_NAME.into(),
            style_name: "Regular".into(),
            encoding: Encoding::UnicodeFull,
            units_per_em: 1000,
            ascent: 1000,
            descent: 0,
            version: 1.0,
        }
    }
}

impl FontInfo {
    /// Builder-style method to set the family name.
    pub fn family_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.family_name = name.into();
        self
    }

    /// Builder-style method to set the style (subfamily) name.
    pub fn style_name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.style_name = name.into();
        self
    }

    /// Builder-style method to set the em size.
    pub fn units_per_em(mut self, upem: u16) -> Self {
        self.units_per_em = upem;
        self
    }

    /// Builder-style method to set ascent and descent.
    pub fn vertical_metrics(mut self, ascent: u16, descent: u16) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self
    }

    /// The family name, e.g. "IconFX".
    pub fn get_family_name(&self) -> &str {
        &self.family_name
    }

    /// The style name, e.g. "Regular".
    pub fn get_style_name(&self) -> &str {
        &self.style_name
    }

    /// The PostScript font name, `<family>-<style>`.
    ///
    /// Spaces are not allowed in PostScript names and are removed.
    pub fn font_name(&self) -> String {
        format!("{}-{}", self.family_name, self.style_name).replace(' ', "")
    }

    /// The full name, `<family> <style>`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.family_name, self.style_name)
    }

    /// The version string written to the name table, e.g. "Version 1.000".
    pub fn version_string(&self) -> String {
        format!("Version {:.3}", self.version)
    }
}

/// Options applied when importing a normalized drawing as a glyph outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    /// Drop degenerate and duplicate contours.
    pub remove_overlap: bool,
    /// Wind outer contours clockwise and holes counter-clockwise.
    pub correct_direction: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions { remove_overlap: true, correct_direction: true }
    }
}
