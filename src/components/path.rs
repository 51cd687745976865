use super::{Constrained, PathKind, UriComponent};
use crate::compat::{Cow, String, ToString, format};
use crate::error::{Error, Result};
use crate::resolver::remove_dot_segments;
use crate::uri::Uri;
use core::fmt;

/// URI path. Always present, possibly empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(pub(crate) Constrained<PathKind>);

impl Default for Path {
    fn default() -> Self {
        Self::from_stored(String::new())
    }
}

impl Path {
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the path contains control characters.
    pub fn new(path: &str) -> Result<Self> {
        Constrained::new(Some(path)).map(Self)
    }

    pub(crate) fn from_stored(path: String) -> Self {
        Self(Constrained::from_stored(Some(path)))
    }

    pub fn from_uri(uri: &Uri) -> Self {
        uri.path().clone()
    }

    pub fn value(&self) -> &str {
        self.0.value().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.value().starts_with('/')
    }

    pub fn has_trailing_slash(&self) -> bool {
        self.value().ends_with('/')
    }

    /// Path segments, without the leading slash of an absolute path.
    /// The empty path has a single empty segment.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        let path = self.value();
        path.strip_prefix('/').unwrap_or(path).split('/')
    }

    /// The last segment
    pub fn basename(&self) -> &str {
        let path = self.value();
        path.rfind('/').map_or(path, |pos| &path[pos + 1..])
    }

    /// Extension of the last segment, without its leading dot
    pub fn extension(&self) -> Option<&str> {
        let basename = self.basename();
        // strip parameters ("file.txt;v=1")
        let basename = basename.split(';').next().unwrap_or(basename);
        match basename.rfind('.') {
            Some(0) | None => None,
            Some(pos) => Some(&basename[pos + 1..]),
        }
    }

    /// Replace the extension of the last segment. An empty extension
    /// removes it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the extension contains `/` or
    /// starts with `.`, or if the last segment is empty or a dot segment.
    pub fn with_extension(&self, extension: &str) -> Result<Self> {
        if extension.starts_with('.') || extension.contains('/') {
            return Err(Error::InvalidPath(extension.to_string()));
        }

        let path = self.value();
        let basename = self.basename();
        if matches!(basename, "" | "." | "..") {
            if extension.is_empty() {
                return Ok(self.clone());
            }
            return Err(Error::InvalidPath(path.to_string()));
        }

        let dirname = &path[..path.len() - basename.len()];
        let (name, params) = match basename.find(';') {
            Some(pos) => basename.split_at(pos),
            None => (basename, ""),
        };
        let stem = match name.rfind('.') {
            Some(pos) if pos > 0 => &name[..pos],
            _ => name,
        };

        let new_path = if extension.is_empty() {
            format!("{dirname}{stem}{params}")
        } else {
            format!("{dirname}{stem}.{extension}{params}")
        };
        Self::new(&new_path)
    }

    /// The path with `.` and `..` segments removed
    pub fn without_dot_segments(&self) -> Self {
        match remove_dot_segments(self.value()) {
            Cow::Borrowed(_) => self.clone(),
            Cow::Owned(path) => Self::from_stored(path),
        }
    }
}

impl UriComponent for Path {
    fn to_encoded(&self) -> Option<Cow<'_, str>> {
        self.0.encoded()
    }

    fn uri_component(&self) -> String {
        self.0.uri_component()
    }

    fn is_present(&self) -> bool {
        true
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::compat::Vec;

    #[test]
    fn test_segments() {
        let path = Path::new("/a/b/c").unwrap();
        assert_eq!(path.segments().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert!(path.is_absolute());
        assert_eq!(Path::new("a/").unwrap().segments().collect::<Vec<_>>(), ["a", ""]);
        assert_eq!(Path::default().segments().collect::<Vec<_>>(), [""]);
    }

    #[test]
    fn test_basename_and_extension() {
        let path = Path::new("/path/to/file.tar.gz").unwrap();
        assert_eq!(path.basename(), "file.tar.gz");
        assert_eq!(path.extension(), Some("gz"));
        assert_eq!(Path::new("/path/.hidden").unwrap().extension(), None);
        assert_eq!(Path::new("/path/").unwrap().basename(), "");
        assert_eq!(Path::new("/f.txt;v=1").unwrap().extension(), Some("txt"));
    }

    #[test]
    fn test_with_extension() {
        let path = Path::new("/path/file.txt").unwrap();
        assert_eq!(path.with_extension("csv").unwrap().value(), "/path/file.csv");
        assert_eq!(path.with_extension("").unwrap().value(), "/path/file");
        assert_eq!(
            Path::new("/path/file").unwrap().with_extension("md").unwrap().value(),
            "/path/file.md"
        );
        assert_eq!(
            Path::new("/f.txt;v=1").unwrap().with_extension("csv").unwrap().value(),
            "/f.csv;v=1"
        );
        assert!(path.with_extension(".csv").is_err());
        assert!(path.with_extension("a/b").is_err());
        assert!(Path::new("/path/").unwrap().with_extension("csv").is_err());
    }

    #[test]
    fn test_without_dot_segments() {
        let path = Path::new("/a/b/../c/./d").unwrap();
        assert_eq!(path.without_dot_segments().value(), "/a/c/d");
        assert_eq!(Path::new("/%2e%2E/a").unwrap().without_dot_segments().value(), "/a");
    }

    #[test]
    fn test_encoding() {
        let path = Path::new("/a b/c?d").unwrap();
        assert_eq!(path.to_string(), "/a%20b/c%3Fd");
        assert_eq!(Path::new("/%2F").unwrap().value(), "/%2F");
    }
}
