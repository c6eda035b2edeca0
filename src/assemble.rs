//! Building an icon font from a directory of drawings.

use std::path::{Path, PathBuf};

use crate::codepoints::CodepointTable;
use crate::command::{CommandRunner, SystemRunner};
use crate::error::Error;
use crate::font::Font;
use crate::fontinfo::{FontInfo, ImportOptions};
use crate::normalize::{Freshness, Normalizer};
use crate::write::OutputFormat;

/// The locations an icon font build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPaths {
    /// The codepoint table.
    pub codepoints: PathBuf,
    /// The directory holding one `<name>.svg` drawing per icon.
    pub svg_dir: PathBuf,
    /// The directory holding normalized drawings.
    pub build_dir: PathBuf,
    /// The font file to write.
    pub output: PathBuf,
}

impl Default for BuildPaths {
    fn default() -> Self {
        BuildPaths {
            codepoints: "iconfx.codepoints".into(),
            svg_dir: "svg".into(),
            build_dir: "build".into(),
            output: "iconfx.ttf".into(),
        }
    }
}

/// A summary of a completed build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of glyphs written, not counting `.notdef`.
    pub glyphs: usize,
    /// Number of drawings that were (re)normalized.
    pub regenerated: usize,
    /// Number of drawings whose normalized copy was reused.
    pub fresh: usize,
}

/// Turns a codepoint table and its drawings into a font file.
///
/// ```no_run
/// use iconfx::{Assembler, BuildPaths};
///
/// let report = Assembler::default().build(&BuildPaths::default())?;
/// println!("{} glyphs", report.glyphs);
/// # Ok::<(), iconfx::Error>(())
/// ```
#[derive(Debug)]
pub struct Assembler<R = SystemRunner> {
    info: FontInfo,
    options: ImportOptions,
    normalizer: Normalizer<R>,
}

impl Default for Assembler<SystemRunner> {
    fn default() -> Self {
        Assembler::new(Normalizer::default())
    }
}

impl<R: CommandRunner> Assembler<R> {
    /// Create an assembler that normalizes drawings with `normalizer`.
    pub fn new(normalizer: Normalizer<R>) -> Self {
        Assembler { info: FontInfo::default(), options: ImportOptions::default(), normalizer }
    }

    /// Builder-style method to set the font metadata.
    pub fn font_info(mut self, info: FontInfo) -> Self {
        self.info = info;
        self
    }

    /// Builder-style method to set the outline import options.
    pub fn import_options(mut self, options: ImportOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns a reference to the normalizer.
    pub fn normalizer(&self) -> &Normalizer<R> {
        &self.normalizer
    }

    /// Load the codepoint table at `paths.codepoints` and assemble the font.
    pub fn build(&mut self, paths: &BuildPaths) -> Result<BuildReport, Error> {
        OutputFormat::from_path(&paths.output)?;
        let table = CodepointTable::load(&paths.codepoints)?;
        self.assemble(&table, &paths.svg_dir, &paths.build_dir, &paths.output)
    }

    /// Build the font described by `table` and write it to `output`.
    ///
    /// Each icon's drawing `svg_dir/<name>.svg` is normalized into
    /// `build_dir/<name>.svg` and imported at its codepoint, in table order.
    /// The first error aborts the build before anything is written to
    /// `output`; normalized drawings produced so far are kept.
    pub fn assemble(
        &mut self,
        table: &CodepointTable,
        svg_dir: &Path,
        build_dir: &Path,
        output: &Path,
    ) -> Result<BuildReport, Error> {
        OutputFormat::from_path(output)?;

        let mut font = Font::new(self.info.clone());
        let mut report = BuildReport::default();

        for entry in table.iter() {
            let file_name = entry.name.svg_file_name();
            let source = svg_dir.join(&file_name);
            let cache = build_dir.join(&file_name);

            log::info!("Processing '{}'", source.display());
            match self.normalizer.normalize(&source, &cache)? {
                Freshness::Fresh => report.fresh += 1,
                Freshness::Regenerated => report.regenerated += 1,
            }

            let glyph = font.create_glyph(entry.codepoint, entry.name.clone());
            glyph.import_outlines(&cache, &self.info, self.options).map_err(|source| {
                Error::GlyphImport { name: entry.name.clone(), path: cache.clone(), source }
            })?;
        }

        font.generate(output)?;
        report.glyphs = font.len();
        log::debug!("{report:?}");
        Ok(report)
    }
}
