//! YAML front-matter splitting and field extraction.
//!
//! A block is recognized only when the very first line is `---`. It ends at
//! the next line that is `---` or `...`.

use serde_yaml::Value;

use galaxy_shared::{GalaxyError, Result};

/// Recognized front-matter fields. Everything else in the block is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// A document split into its metadata and body.
#[derive(Debug)]
pub struct Split<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
    /// Set when a block was present but could not be used.
    pub error: Option<GalaxyError>,
}

/// Split `input` into front-matter and body.
///
/// Never fails: a malformed block yields default metadata plus the error
/// that caused the fallback, so the caller can log it.
pub fn split(input: &str) -> Split<'_> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let Some((block, body)) = locate_block(input) else {
        let error = opens_block(input)
            .then(|| GalaxyError::front_matter("unterminated front-matter block"));
        return Split {
            front_matter: FrontMatter::default(),
            body: input,
            error,
        };
    };

    match parse(block) {
        Ok(front_matter) => Split {
            front_matter,
            body,
            error: None,
        },
        Err(e) => Split {
            front_matter: FrontMatter::default(),
            body,
            error: Some(e),
        },
    }
}

/// Parse the YAML text of a front-matter block.
pub fn parse(block: &str) -> Result<FrontMatter> {
    if block.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let value: Value = serde_yaml::from_str(block)
        .map_err(|e| GalaxyError::front_matter(format!("invalid YAML: {e}")))?;

    let map = match value {
        Value::Mapping(map) => map,
        Value::Null => return Ok(FrontMatter::default()),
        _ => return Err(GalaxyError::front_matter("front-matter is not a mapping")),
    };

    let field = |key: &str| map.get(key).and_then(scalar_text);

    Ok(FrontMatter {
        title: field("title"),
        category: field("category"),
        description: field("description"),
    })
}

fn opens_block(input: &str) -> bool {
    input
        .lines()
        .next()
        .is_some_and(|line| line.trim_end() == "---")
}

/// Return `(block, body)` slices when `input` starts with a complete block.
fn locate_block(input: &str) -> Option<(&str, &str)> {
    if !opens_block(input) {
        return None;
    }

    let block_start = input.find('\n')? + 1;
    let mut offset = block_start;

    for line in input[block_start..].split_inclusive('\n') {
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            let block = &input[block_start..offset];
            let body = &input[offset + line.len()..];
            return Some((block, body));
        }
        offset += line.len();
    }

    None
}

/// Render a scalar YAML value as text. Empty strings count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => return None,
    };

    (!text.is_empty()).then_some(text)
}
