//! Label value type.

use serde::{Deserialize, Serialize};

/// A repository or issue label.
///
/// `name` is the key within a repository; `color` is a six digit hex
/// string without the leading `#`, as GitHub stores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    /// Label name (e.g. "answering: answered")
    pub name: String,
    /// Hex colour without the leading `#`
    #[serde(default)]
    pub color: String,
}

impl Label {
    /// Create a label from a name and a colour.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }

    /// Create a label known only by name.
    ///
    /// Issue-level label lists sometimes come back without colours; the
    /// issue reconciler only compares names.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }

    /// Case-insensitive name comparison, as used for repository defaults.
    pub fn same_name_ignoring_case(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }

    /// Colour comparison ignoring hex digit case.
    pub fn same_color(&self, other: &Self) -> bool {
        self.color.eq_ignore_ascii_case(&other.color)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.color.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} (#{})", self.name, self.color)
        }
    }
}
