//! Cross-reference extraction from markdown bodies.
//!
//! Two inline grammars are recognized:
//! - bracketed titles, `[[Some Title]]`
//! - markdown links, `[label](path)`, where only the path matters
//!
//! Scanning is pure: calling [`extract_references`] again on the same body
//! yields the same sequence.

mod path;

use std::sync::LazyLock;

use regex::Regex;

pub use path::{PathRef, classify_path};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A candidate cross-reference found in a document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference<'a> {
    /// Inner text of `[[...]]`, kept literally.
    Title(&'a str),
    /// Path portion of `[label](...)`, with any link title and angle brackets removed.
    Path(&'a str),
}

// ---------------------------------------------------------------------------
// Regex patterns (compiled once)
// ---------------------------------------------------------------------------

/// Matches `[[Title]]` on a single line, shortest inner text.
static TITLE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[(.*?)\]\]").expect("title reference regex"));

/// Matches `[label](path)` on a single line, shortest label and path.
static PATH_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]\((.*?)\)").expect("path reference regex"));

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Lazily scan `body` for references: all bracketed titles first, then all
/// markdown link paths.
pub fn extract_references(body: &str) -> impl Iterator<Item = Reference<'_>> + '_ {
    let titles = TITLE_REF_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| Reference::Title(m.as_str()));

    let paths = PATH_REF_RE
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| Reference::Path(link_destination(m.as_str())));

    titles.chain(paths)
}

/// Reduce a raw link target to its destination.
///
/// `./a.md "Title"` becomes `./a.md`; `<./with space.md>` and `./with space.md`
/// both become `./with space.md`. Only a trailing part that opens with `"`,
/// `'` or `(` is treated as a link title.
fn link_destination(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(inner) = trimmed.strip_prefix('<') {
        if let Some(end) = inner.find('>') {
            return &inner[..end];
        }
    }

    let title_start = trimmed
        .char_indices()
        .zip(trimmed.chars().skip(1))
        .find(|((_, c), next)| c.is_whitespace() && matches!(next, '"' | '\'' | '('))
        .map(|((pos, _), _)| pos);

    match title_start {
        Some(pos) => trimmed[..pos].trim_end(),
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(body: &str) -> Vec<Reference<'_>> {
        extract_references(body).collect()
    }

    #[test]
    fn finds_bracketed_titles() {
        let refs = collect("See [[Rust Notes]] and [[Galaxy]].");
        assert_eq!(
            refs,
            [Reference::Title("Rust Notes"), Reference::Title("Galaxy")]
        );
    }

    #[test]
    fn finds_markdown_link_paths() {
        let refs = collect("Read [the post](../blog/post.md) or [home](/portfolio/site).");
        assert_eq!(
            refs,
            [
                Reference::Path("../blog/post.md"),
                Reference::Path("/portfolio/site")
            ]
        );
    }

    #[test]
    fn both_grammars_in_one_body_titles_first() {
        let refs = collect("[a](./a.md)\n[[B]]\n");
        assert_eq!(refs, [Reference::Title("B"), Reference::Path("./a.md")]);
    }

    #[test]
    fn title_inner_text_is_literal() {
        let refs = collect("[[ spaced title ]]");
        assert_eq!(refs, [Reference::Title(" spaced title ")]);
    }

    #[test]
    fn references_do_not_span_lines() {
        assert!(collect("[[broken\nlink]]").is_empty());
        assert!(collect("[label](./a\n.md)").is_empty());
    }

    #[test]
    fn repeated_references_are_all_yielded() {
        let refs = collect("[[X]] [[X]] [x](./x.md) [x](./x.md)");
        assert_eq!(refs.len(), 4);
    }

    #[test]
    fn link_title_and_angle_brackets_are_removed() {
        let refs = collect(r#"[a](./a.md "A title") [b](<./b c.md>) [e]()"#);
        assert_eq!(
            refs,
            [
                Reference::Path("./a.md"),
                Reference::Path("./b c.md"),
                Reference::Path("")
            ]
        );
    }

    #[test]
    fn unquoted_spaces_stay_in_the_destination() {
        let refs = collect("[x](./my post.md) [y](./my post.md 'Post') [z](./a.md (Paren))");
        assert_eq!(
            refs,
            [
                Reference::Path("./my post.md"),
                Reference::Path("./my post.md"),
                Reference::Path("./a.md")
            ]
        );
    }

    #[test]
    fn images_are_scanned_like_links() {
        let refs = collect("![diagram](./diagram.png)");
        assert_eq!(refs, [Reference::Path("./diagram.png")]);
    }

    #[test]
    fn scanning_is_restartable() {
        let body = "[[One]] [two](./two.md)";
        assert_eq!(collect(body), collect(body));
    }
}
