//! The in-memory icon font.

use std::path::Path;

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::fontinfo::FontInfo;
use crate::glyph::Glyph;
use crate::name::Name;
use crate::write::{self, OutputFormat};
use crate::Error;

/// An icon font: metadata and glyphs, keyed by codepoint.
///
/// Glyphs keep the order in which they were created, which is also their
/// order in the generated font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    /// Font metadata.
    pub info: FontInfo,
    glyphs: IndexMap<u32, Glyph>,
}

impl Font {
    /// Returns a new, empty [`Font`] described by `info`.
    pub fn new(info: FontInfo) -> Self {
        Font { info, glyphs: IndexMap::new() }
    }

    /// Returns the glyph slot for `codepoint`, labeled `name`.
    ///
    /// If the slot already exists it is relabeled and returned as-is;
    /// otherwise a new empty glyph is appended.
    pub fn create_glyph(&mut self, codepoint: u32, name: Name) -> &mut Glyph {
        match self.glyphs.entry(codepoint) {
            Entry::Occupied(entry) => {
                let glyph = entry.into_mut();
                glyph.name = name;
                glyph
            }
            Entry::Vacant(entry) => entry.insert(Glyph::new(name, codepoint)),
        }
    }

    /// Returns the glyph mapped to `codepoint`, if any.
    pub fn get_glyph(&self, codepoint: u32) -> Option<&Glyph> {
        self.glyphs.get(&codepoint)
    }

    /// Returns the glyph named `name`, if any.
    pub fn get_glyph_by_name(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.values().find(|glyph| glyph.name() == &name)
    }

    /// Returns an iterator over the glyphs, in creation order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    /// Returns the number of glyphs, not counting `.notdef`.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns true if the font has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Serialize the font to `path`.
    ///
    /// The container format is chosen by the path's extension. The file is
    /// written atomically: on failure, any existing file at `path` is left
    /// untouched.
    pub fn generate(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let format = OutputFormat::from_path(path)?;
        let data = match format {
            OutputFormat::TrueType => write::compile_ttf(self)?,
        };
        write::write_atomic(path, &data)?;
        log::info!("Wrote {} glyphs to '{}'", self.len(), path.display());
        Ok(())
    }
}
