//! Building TrueType icon fonts from directories of SVG drawings.
//!
//! A *codepoint table* lists icons by name and assigns each a codepoint.
//! Every icon's drawing is first normalized by an external vector-graphics
//! tool (strokes converted to filled paths, everything unioned), then its
//! outline is imported as a glyph, and finally the font is compiled.
//!
//! # Basic usage:
//!
//! ```no_run
//! use iconfx::{Assembler, CodepointTable, FontInfo};
//! use std::path::Path;
//!
//! let table = CodepointTable::load("iconfx.codepoints")?;
//! let mut assembler = Assembler::default().font_info(FontInfo::default().family_name("MyIcons"));
//! let report = assembler.assemble(
//!     &table,
//!     Path::new("svg"),
//!     Path::new("build"),
//!     Path::new("MyIcons.ttf"),
//! )?;
//! assert_eq!(report.glyphs, table.len());
//! # Ok::<(), iconfx::Error>(())
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

mod assemble;
mod codepoints;
mod command;
pub mod error;
mod font;
mod fontinfo;
mod glyph;
mod name;
mod normalize;
mod write;

pub use assemble::{Assembler, BuildPaths, BuildReport};
pub use codepoints::{CodepointEntry, CodepointTable};
pub use command::{CommandRunner, SystemRunner};
pub use error::Error;
pub use font::Font;
pub use fontinfo::{Encoding, FontInfo, ImportOptions, DEFAULT_FAMILY_NAME};
pub use glyph::Glyph;
pub use name::Name;
pub use normalize::{invocation_args, Freshness, Normalizer, ACTIONS, DEFAULT_PROGRAM};
pub use write::{compile_ttf, OutputFormat};
