pub const SEPARATOR: char = '/';

/// A single name returned by a listing, relative to its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A child that has children of its own; the trailing
    ///  separator has already been stripped
    Dir(String),
    /// A child that holds a secret
    Leaf(String),
}

impl Entry {
    /// Classify a raw listing name by its terminal character
    pub fn classify(name: &str) -> Self {
        match name.strip_suffix(SEPARATOR) {
            Some(dir) => Entry::Dir(dir.to_string()),
            None => Entry::Leaf(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entry::Dir(name) | Entry::Leaf(name) => name,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Dir(_))
    }
}

/// Join a child name onto a parent path with a single separator.
pub fn join(parent: &str, child: &str) -> String {
    let parent = parent.trim_end_matches(SEPARATOR);
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}{}{}", parent, SEPARATOR, child)
    }
}

/// Collapse a path to its non-empty segments: no leading, trailing
///  or doubled separators.
pub fn normalize(path: &str) -> String {
    path.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
