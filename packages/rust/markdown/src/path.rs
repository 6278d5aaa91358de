//! Classification of markdown link destinations.

use url::Url;

/// Addressing scheme of a link destination.
///
/// `Relative` and `RootAbsolute` carry the destination with any `#fragment`
/// or `?query` removed; the other variants carry it unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRef<'a> {
    /// `./x` or `../x`, relative to the referring document's directory.
    Relative(&'a str),
    /// `/type/.../slug`, addressed by content type and slug.
    RootAbsolute(&'a str),
    /// Absolute URL (`https:`, `mailto:`, `//host/...`).
    External(&'a str),
    /// Bare relative paths, pure anchors, empty destinations.
    Unsupported(&'a str),
}

/// Classify a link destination by its prefix.
pub fn classify_path(dest: &str) -> PathRef<'_> {
    if dest.starts_with("//") {
        return PathRef::External(dest);
    }
    if dest.starts_with("./") || dest.starts_with("../") {
        return PathRef::Relative(strip_suffixes(dest));
    }
    if dest.starts_with('/') {
        return PathRef::RootAbsolute(strip_suffixes(dest));
    }
    if Url::parse(dest).is_ok() {
        return PathRef::External(dest);
    }
    PathRef::Unsupported(dest)
}

/// Drop everything from the first `#` or `?`.
fn strip_suffixes(dest: &str) -> &str {
    match dest.find(['#', '?']) {
        Some(pos) => &dest[..pos],
        None => dest,
    }
}
