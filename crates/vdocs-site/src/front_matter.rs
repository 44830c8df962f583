//! Front matter splitting.
//!
//! Source documents start with a YAML block fenced by `---` lines. The
//! closing fence may also be `...`. Everything after the closing fence is the
//! page body, passed through untouched.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::yaml::kind;

static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A---[ \t]*\r?\n(.*?)^(?:---|\.\.\.)[ \t]*\r?$\n?").unwrap()
});

/// A source document split into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontMatter {
    /// Parsed front matter, in document order.
    pub metadata: Mapping,
    /// Content after the closing fence.
    pub body: String,
}

/// Error splitting front matter.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The document doesn't start with a fenced YAML block.
    #[error("no front matter block found")]
    Missing,
    /// The fenced block isn't a YAML mapping.
    #[error("invalid front matter: {0}")]
    Invalid(String),
}

/// Split raw document content into front matter and body.
///
/// An empty block (`---\n---\n`) yields empty metadata.
///
/// # Errors
///
/// Returns [`FrontMatterError::Missing`] if there is no leading fenced block,
/// or [`FrontMatterError::Invalid`] if the block isn't a YAML mapping.
pub fn split_front_matter(content: &str) -> Result<FrontMatter, FrontMatterError> {
    let caps = FRONT_MATTER_RE
        .captures(content)
        .ok_or(FrontMatterError::Missing)?;
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    let body_start = caps.get(0).map_or(0, |m| m.end());

    let metadata = if yaml.trim().is_empty() {
        Mapping::new()
    } else {
        match serde_yaml::from_str::<Value>(yaml) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(Value::Null) => Mapping::new(),
            Ok(other) => {
                return Err(FrontMatterError::Invalid(format!(
                    "expected a mapping, found {}",
                    kind(&other)
                )));
            }
            Err(e) => return Err(FrontMatterError::Invalid(e.to_string())),
        }
    };

    Ok(FrontMatter {
        metadata,
        body: content[body_start..].to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(fm: &FrontMatter) -> Option<&str> {
        fm.metadata.get("title").and_then(Value::as_str)
    }

    #[test]
    fn test_split_simple() {
        let fm = split_front_matter("---\ntitle: Home\n---\n# Hello").unwrap();

        assert_eq!(title(&fm), Some("Home"));
        assert_eq!(fm.body, "# Hello");
    }

    #[test]
    fn test_split_preserves_body_verbatim() {
        let content = "---\ntitle: Install\n---\n\n## Steps\n\n---\n\nMore text\n";
        let fm = split_front_matter(content).unwrap();

        assert_eq!(fm.body, "\n## Steps\n\n---\n\nMore text\n");
    }

    #[test]
    fn test_split_dots_closing_fence() {
        let fm = split_front_matter("---\ntitle: Dots\n...\nbody").unwrap();

        assert_eq!(title(&fm), Some("Dots"));
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_split_crlf() {
        let fm = split_front_matter("---\r\ntitle: Windows\r\n---\r\nbody").unwrap();

        assert_eq!(title(&fm), Some("Windows"));
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_split_empty_block() {
        let fm = split_front_matter("---\n---\nbody").unwrap();

        assert!(fm.metadata.is_empty());
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_split_keeps_key_order() {
        let fm = split_front_matter("---\nz: 1\na: 2\nm: 3\n---\n").unwrap();

        let keys: Vec<_> = fm.metadata.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(fm.body, "");
    }

    #[test]
    fn test_split_missing_block() {
        let err = split_front_matter("# Just markdown\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_split_unclosed_block() {
        let err = split_front_matter("---\ntitle: Open\n# Body").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_split_block_not_at_start() {
        let err = split_front_matter("\n---\ntitle: Late\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_split_scalar_block_is_invalid() {
        let err = split_front_matter("---\njust a string\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Invalid(_)));
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn test_split_malformed_yaml_is_invalid() {
        let err = split_front_matter("---\ntitle: [broken\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Invalid(_)));
    }
}
