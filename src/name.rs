//! Icon and glyph names

use std::sync::Arc;

/// The name of an icon, used both to locate its drawing and to label its glyph.
///
/// A name is one or more ASCII letters, digits or underscores. The codepoint
/// table is the only place names come from, so its line pattern is where they
/// are checked; file lookups use the name as-is.
///
/// Like all names in this crate it is cheap to clone and derefs to a `&str`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Name(Arc<str>);

impl Name {
    /// Creates a new `Name` if the given value is a valid icon name.
    pub fn new(name: &str) -> Option<Name> {
        is_valid(name).then(|| Name(name.into()))
    }

    /// Returns a string slice containing the name.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// The file name of this icon's drawing, `<name>.svg`.
    pub fn svg_file_name(&self) -> String {
        format!("{}.svg", self.0)
    }
}

/// Returns the length of the icon name at the start of `text`, if any.
pub(crate) fn leading_name_len(text: &str) -> usize {
    text.bytes().take_while(|b| b.is_ascii_alphanumeric() || *b == b'_').count()
}

fn is_valid(name: &str) -> bool {
    !name.is_empty() && leading_name_len(name) == name.len()
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

impl std::ops::Deref for Name {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

// so that assert_eq! macros work
impl PartialEq<str> for Name {
    fn eq(&self, other: &str) -> bool {
        self.0.as_ref() == other
    }
}

impl<'a> PartialEq<&'a str> for Name {
    fn eq(&self, other: &&'a str) -> bool {
        self.0.as_ref() == *other
    }
}

impl<'a> PartialEq<Name> for &'a str {
    fn eq(&self, other: &Name) -> bool {
        other == self
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::borrow::Borrow<str> for Name {
    fn borrow(&self) -> &str {
        self.0.as_ref()
    }
}
