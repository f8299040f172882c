//! File type filters.

use std::fmt;
use std::str::FromStr;

/// A labelled group of file extensions, e.g. `Images: png, jpg`.
///
/// Extensions are stored bare, without a leading dot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileFilter {
    label: String,
    extensions: Vec<String>,
}

impl FileFilter {
    /// Create a filter; a leading `.` on any extension is dropped.
    pub fn new<I, S>(label: impl Into<String>, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        FileFilter {
            label: label.into(),
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// The label shown to the user.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The bare extensions, in the order given.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// A filter without extensions matches nothing and is never shown.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Glob patterns (`*.ext`) for each extension.
    pub fn patterns(&self) -> impl Iterator<Item = String> + '_ {
        self.extensions.iter().map(|e| format!("*.{}", e))
    }
}

impl fmt::Display for FileFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.extensions.join(","))
    }
}

/// Parses the `Label:ext,ext` form used on the command line.
impl FromStr for FileFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (label, exts) = s.split_once(':').ok_or_else(|| {
            format!("invalid filter '{}'; expected 'Label:ext1,ext2'", s)
        })?;

        let label = label.trim();
        if label.is_empty() {
            return Err(format!("invalid filter '{}'; the label is empty", s));
        }

        let filter = FileFilter::new(label, exts.split(','));
        if filter.extensions.is_empty() {
            return Err(format!("invalid filter '{}'; no extensions given", s));
        }
        Ok(filter)
    }
}
