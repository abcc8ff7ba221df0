//! Immutable project file mapping.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Relative path → text content for every decodable file in a project.
///
/// Keys are sanitized, forward-slash separated relative paths. The map sits
/// behind an `Arc`, so cloning a set is cheap and writing to a clone never
/// touches the original. Iteration is in lexicographic path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFileSet {
    files: Arc<BTreeMap<String, String>>,
}

impl ProjectFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate `(path, content)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Sum of all content lengths in bytes.
    pub fn total_size(&self) -> usize {
        self.files.values().map(String::len).sum()
    }

    /// Return a new set with `path` set to `content`.
    pub fn with_file(&self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.files).insert(path.into(), content.into());
        next
    }

    /// Return a new set with every entry of `writes` applied.
    pub fn with_files<I, K, V>(&self, writes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut next = self.clone();
        let map = Arc::make_mut(&mut next.files);
        for (path, content) in writes {
            map.insert(path.into(), content.into());
        }
        next
    }

    /// Whether both sets point at the same underlying map.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.files, &other.files)
    }
}

impl<K, V> FromIterator<(K, V)> for ProjectFileSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            files: Arc::new(
                iter.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<BTreeMap<String, String>> for ProjectFileSet {
    fn from(files: BTreeMap<String, String>) -> Self {
        Self {
            files: Arc::new(files),
        }
    }
}
