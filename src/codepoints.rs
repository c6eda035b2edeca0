//! The codepoint table.
//!
//! A codepoint table is a line-oriented text file assigning icon names to
//! code points:
//!
//! ```text
//! # navigation
//! arrow_left = 0xE000
//! arrow_right = 0xE001
//! ```
//!
//! We want to preserve file order (so that builds are reproducible) and ensure
//! each code point is assigned once, so the table is backed by an `IndexMap`.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::error::{CodepointsError, Error};
use crate::name::{leading_name_len, Name};

/// The number of hex digits in a codepoint value.
const HEX_DIGITS: usize = 4;

/// One line of a codepoint table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodepointEntry {
    /// The icon name.
    pub name: Name,
    /// The code point assigned to the icon.
    pub codepoint: u32,
}

/// An ordered mapping from code point to icon name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodepointTable(IndexMap<u32, Name>);

impl CodepointTable {
    /// Load a codepoint table from the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map_err(CodepointsError::Io)
            .and_then(|text| text.parse())
            .map_err(|source| Error::LoadCodepoints { path: path.to_owned(), source })
    }

    /// Insert an entry, failing if its code point is already assigned.
    ///
    /// Only the numeric value is checked; the same name may appear twice.
    pub fn insert(&mut self, entry: CodepointEntry) -> Result<(), CodepointsError> {
        if self.0.contains_key(&entry.codepoint) {
            return Err(CodepointsError::DuplicateCodepoint(entry.codepoint));
        }
        self.0.insert(entry.codepoint, entry.name);
        Ok(())
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the name assigned to `codepoint`, if any.
    pub fn get(&self, codepoint: u32) -> Option<&Name> {
        self.0.get(&codepoint)
    }

    /// Iterate over the entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = CodepointEntry> + '_ {
        self.0
            .iter()
            .map(|(codepoint, name)| CodepointEntry { name: name.clone(), codepoint: *codepoint })
    }
}

impl FromStr for CodepointTable {
    type Err = CodepointsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut table = CodepointTable::default();
        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = parse_line(line).ok_or_else(|| CodepointsError::Parse {
                line_number: i + 1,
                line: line.to_owned(),
            })?;
            table.insert(entry)?;
        }
        Ok(table)
    }
}

/// Match `NAME\s*=\s*0xHHHH` at the start of `line`.
///
/// Anything after the four hex digits is ignored.
fn parse_line(line: &str) -> Option<CodepointEntry> {
    let name_len = leading_name_len(line);
    let name = Name::new(&line[..name_len])?;
    let rest = line[name_len..].trim_start().strip_prefix('=')?;
    let digits = rest.trim_start().strip_prefix("0x")?;
    let digits = digits.get(..HEX_DIGITS)?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let codepoint = u32::from_str_radix(digits, 16).ok()?;
    Some(CodepointEntry { name, codepoint })
}

impl std::fmt::Display for CodepointEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = 0x{:04X}", self.name, self.codepoint)
    }
}

impl<'a> IntoIterator for &'a CodepointTable {
    type Item = (&'a u32, &'a Name);

    type IntoIter = indexmap::map::Iter<'a, u32, Name>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
