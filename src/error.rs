//! Error types.

use std::path::PathBuf;
use std::process::ExitStatus;

use crate::Name;

/// Errors that abort an icon font build.
///
/// Nothing is recovered internally: every variant ends the run. Normalized
/// artifacts written before the failure stay in the build directory and are
/// reused by the next run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A line of the codepoint table could not be parsed.
    #[error("failed to load codepoints from '{}'", .path.display())]
    LoadCodepoints {
        /// The path of the table.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: CodepointsError,
    },
    /// An icon named in the codepoint table has no source drawing.
    #[error("missing icon source '{}'", .0.display())]
    MissingSource(PathBuf),
    /// The external vector-graphics tool failed.
    #[error(transparent)]
    ExternalTool(#[from] ExternalToolError),
    /// A normalized artifact could not be imported as a glyph outline.
    #[error("failed to import outlines for glyph '{name}' from '{}'", .path.display())]
    GlyphImport {
        /// The glyph being imported.
        name: Name,
        /// The normalized artifact.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: ImportError,
    },
    /// The output path has an extension we cannot generate.
    #[error("unsupported output format for '{}', expected a '.ttf' path", .0.display())]
    UnsupportedFormat(PathBuf),
    /// The font object could not be compiled.
    #[error("failed to compile font")]
    Compile(#[source] CompileError),
    /// An I/O error involving a particular path.
    #[error("failed to access '{}'", .path.display())]
    Io {
        /// The path involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// An error that occurs while parsing a codepoint table.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CodepointsError {
    /// Failed to read the file.
    #[error("failed to read file")]
    Io(#[source] std::io::Error),
    /// A non-empty, non-comment line did not match `NAME = 0xHHHH`.
    #[error("can't parse line {line_number}: '{line}'")]
    Parse {
        /// The 1-based line number.
        line_number: usize,
        /// The offending line, trimmed.
        line: String,
    },
    /// The same numeric codepoint was assigned twice.
    #[error("duplicate codepoint: {0} (0x{0:04X})")]
    DuplicateCodepoint(u32),
}

/// An error raised when the external vector-graphics tool fails.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExternalToolError {
    /// The tool could not be started at all.
    #[error("failed to run '{program}'")]
    Spawn {
        /// The program we tried to run.
        program: String,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The tool ran and exited with a non-zero status.
    #[error(
        "'{program}' failed converting '{}' ({status}): {}",
        .icon.display(),
        tool_output(.stdout, .stderr)
    )]
    Failed {
        /// The program that was run.
        program: String,
        /// The icon being converted.
        icon: PathBuf,
        /// The exit status.
        status: ExitStatus,
        /// Captured standard output.
        stdout: String,
        /// Captured standard error.
        stderr: String,
    },
}

/// An error that occurs while importing a normalized SVG artifact.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ImportError {
    /// Failed to read the artifact.
    #[error("failed to read file")]
    Io(#[source] std::io::Error),
    /// The artifact is not well-formed XML.
    #[error("failed to read or parse XML structure")]
    Xml(#[source] quick_xml::Error),
    /// The document does not start with an `svg` element.
    #[error("the root element must be 'svg'")]
    NotSvg,
    /// A `d` attribute could not be parsed.
    #[error("invalid path data")]
    PathData(#[source] kurbo::SvgParseError),
    /// A `transform` attribute could not be parsed.
    #[error("invalid transform '{0}'")]
    Transform(String),
    /// A `viewBox`, `width` or `height` attribute could not be parsed.
    #[error("invalid '{0}' attribute '{1}'")]
    Dimension(&'static str, String),
    /// The artifact contains no usable contours.
    #[error("no outlines found")]
    Empty,
}

/// An error that occurs while compiling the font object to binary tables.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompileError {
    /// A glyph outline could not be converted to a TrueType glyph.
    #[error("glyph '{name}' has a malformed outline: {reason}")]
    MalformedGlyph {
        /// The glyph name.
        name: String,
        /// A description of the problem.
        reason: String,
    },
    /// The glyf table rejected a glyph.
    #[error("glyph '{name}' could not be added to the glyf table")]
    Glyf {
        /// The glyph name.
        name: String,
        /// The underlying error.
        #[source]
        source: write_fonts::error::Error,
    },
    /// Two codepoints mapped to different glyphs.
    #[error("conflicting cmap entries")]
    Cmap(#[source] write_fonts::tables::cmap::CmapConflict),
    /// A table failed to compile.
    #[error(transparent)]
    Table(#[from] write_fonts::BuilderError),
    /// There are more glyphs than a font can hold.
    #[error("too many glyphs: {0}")]
    TooManyGlyphs(usize),
}

/// Lines of standard output shown when the tool printed nothing on stderr.
const STDOUT_TAIL_LINES: usize = 5;

/// The part of a failed tool's output worth showing: stderr, or failing
/// that the last few lines of stdout.
fn tool_output(stdout: &str, stderr: &str) -> String {
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_owned();
    }
    let lines: Vec<&str> = stdout.trim().lines().collect();
    lines[lines.len().saturating_sub(STDOUT_TAIL_LINES)..].join("\n")
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}

#[doc(hidden)]
impl From<CompileError> for Error {
    fn from(src: CompileError) -> Error {
        Error::Compile(src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_output_prefers_stderr() {
        assert_eq!(tool_output("progress\n", "  bad action\n"), "bad action");
        assert_eq!(tool_output("", ""), "");
    }

    #[test]
    fn tool_output_falls_back_to_stdout_tail() {
        let stdout = (1..=8).map(|i| format!("line {i}\n")).collect::<String>();
        assert_eq!(tool_output(&stdout, " \n"), "line 4\nline 5\nline 6\nline 7\nline 8");
        assert_eq!(tool_output("only line\n", ""), "only line");
    }
}
