//! Reference resolution and relativization (RFC 3986 section 5).

use crate::compat::{Cow, String, ToString, Vec, format};
use crate::components::{Host, Path, Port, Query, Scheme, UriComponent, UserInfo};
use crate::error::Result;
use crate::uri::Uri;

/// Remove `.` and `..` segments from a path.
///
/// Segments are reduced left to right: `..` drops the previous segment,
/// `.` is dropped. A trailing dot segment leaves a trailing slash and an
/// absolute input stays absolute.
pub fn remove_dot_segments(path: &str) -> Cow<'_, str> {
    if memchr::memchr(b'.', path.as_bytes()).is_none() {
        return Cow::Borrowed(path);
    }

    let mut output: Vec<&str> = Vec::new();
    let mut last_is_dot = false;
    for segment in path.split('/') {
        last_is_dot = matches!(segment, "." | "..");
        match segment {
            ".." => {
                output.pop();
            }
            "." => {}
            _ => output.push(segment),
        }
    }

    let mut result = output.join("/");
    if last_is_dot {
        result.push('/');
    }
    if path.starts_with('/') && !result.starts_with('/') {
        result.insert(0, '/');
    }

    Cow::Owned(result)
}

/// Remove the last segment of a path, keeping its trailing slash
fn pop_last_segment(path: &str) -> &str {
    path.rfind('/').map_or("", |pos| &path[..=pos])
}

/// Merge a relative-path reference with the base path
fn merge_paths(base: &Uri, reference_path: &str) -> String {
    if base.host().is_present() && base.path().is_empty() {
        return format!("/{reference_path}");
    }
    format!("{}{reference_path}", pop_last_segment(base.path().value()))
}

/// A path that would be read as an authority gets a `/.` prefix
fn guard_path(path: String, has_authority: bool) -> String {
    if !has_authority && path.starts_with("//") {
        return format!("/.{path}");
    }
    path
}

/// Resolve `reference` against `base`.
///
/// # Errors
///
/// Returns an error if the resolved components cannot form a URI.
pub fn resolve(base: &Uri, reference: &Uri) -> Result<Uri> {
    if reference.scheme().is_present() {
        tracing::trace!("reference has a scheme");
        let path = remove_dot_segments(reference.path().value()).into_owned();
        return Uri::from_parts(
            reference.scheme().clone(),
            reference.user_info().clone(),
            reference.host().clone(),
            *reference.port(),
            Path::from_stored(guard_path(path, reference.host().is_present())),
            reference.query().clone(),
            reference.fragment().clone(),
        );
    }

    if reference.host().is_present() && reference.authority() != base.authority() {
        tracing::trace!("reference has its own authority");
        let path = remove_dot_segments(reference.path().value()).into_owned();
        return Uri::from_parts(
            base.scheme().clone(),
            reference.user_info().clone(),
            reference.host().clone(),
            *reference.port(),
            Path::from_stored(path),
            reference.query().clone(),
            reference.fragment().clone(),
        );
    }

    let reference_path = reference.path().value();
    let (path, query) = if reference_path.is_empty() {
        tracing::trace!("merging with an empty reference path");
        let query = if reference.query().is_present() {
            reference.query()
        } else {
            base.query()
        };
        (base.path().value().to_string(), query.clone())
    } else if reference_path.starts_with('/') {
        tracing::trace!("reference path is absolute");
        (reference_path.to_string(), reference.query().clone())
    } else {
        tracing::trace!("merging relative reference path");
        (merge_paths(base, reference_path), reference.query().clone())
    };

    let fragment = if reference_path.is_empty()
        && !reference.query().is_present()
        && !reference.fragment().is_present()
    {
        base.fragment().clone()
    } else {
        reference.fragment().clone()
    };

    let path = remove_dot_segments(&path).into_owned();
    let has_authority = base.host().is_present();

    Uri::from_parts(
        base.scheme().clone(),
        base.user_info().clone(),
        base.host().clone(),
        *base.port(),
        Path::from_stored(guard_path(path, has_authority)),
        query,
        fragment,
    )
}

/// Check if a URI is a relative-path reference
fn is_relative_path(uri: &Uri) -> bool {
    !uri.scheme().is_present() && !uri.host().is_present() && !uri.path().is_absolute()
}

/// Compute the shortest reference that resolves to `target` against `base`.
///
/// The target is returned unchanged when it is a relative-path reference
/// or when its scheme or authority differ from the base.
///
/// # Errors
///
/// Returns an error if the relative components cannot form a URI.
pub fn relativize(base: &Uri, target: &Uri) -> Result<Uri> {
    if is_relative_path(target)
        || target.scheme() != base.scheme()
        || target.authority() != base.authority()
    {
        tracing::debug!(%target, %base, "target cannot be made relative");
        return Ok(target.clone());
    }

    let target_path = target.path().value();
    let base_path = base.path().value();

    let (path, query) = if target_path != base_path {
        (relativize_path(target_path, base_path), target.query().clone())
    } else if target.query() == base.query() {
        (String::new(), Query::absent())
    } else if !target.query().is_present() {
        (format_path_with_empty_base_query(target_path), Query::absent())
    } else {
        (String::new(), target.query().clone())
    };

    Uri::from_parts(
        Scheme::absent(),
        UserInfo::default(),
        Host::default(),
        Port::new(None),
        Path::from_stored(path),
        query,
        target.fragment().clone(),
    )
}

/// Path segments without the leading slash of an absolute path
fn segments(path: &str) -> Vec<&str> {
    path.strip_prefix('/').unwrap_or(path).split('/').collect()
}

fn relativize_path(path: &str, base_path: &str) -> String {
    let mut base_segments = segments(base_path);
    let mut target_segments = segments(path);
    let target_basename = target_segments.pop().unwrap_or_default();
    base_segments.pop();

    let common = base_segments
        .iter()
        .zip(&target_segments)
        .take_while(|(base, target)| base == target)
        .count();

    let mut relative = "../".repeat(base_segments.len() - common);
    for segment in &target_segments[common..] {
        relative.push_str(segment);
        relative.push('/');
    }
    relative.push_str(target_basename);

    format_path(relative, base_path)
}

fn format_path_with_empty_base_query(path: &str) -> String {
    let basename = path.rfind('/').map_or(path, |pos| &path[pos + 1..]);
    if basename.is_empty() {
        return "./".to_string();
    }
    format_path(basename.to_string(), path)
}

/// Make a relative path safe to resolve: a colon in the first segment or
/// a leading slash would change how the path is read.
fn format_path(path: String, base_path: &str) -> String {
    if path.is_empty() {
        if matches!(base_path, "" | "/") {
            return base_path.to_string();
        }
        return "./".to_string();
    }

    if path.starts_with('/') {
        return format!("./{path}");
    }

    let Some(colon) = path.find(':') else {
        return path;
    };
    match path.find('/') {
        Some(slash) if slash < colon => path,
        _ => format!("./{path}"),
    }
}
