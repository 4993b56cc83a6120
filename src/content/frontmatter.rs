//! Front-matter splitting

use indexmap::IndexMap;
use serde_yaml::Value;

use super::error::FrontMatterError;

/// Raw key/value pairs decoded from a metadata block, in source order
pub type RawMetadata = IndexMap<String, Value>;

const YAML_FENCE: &str = "---";
const JSON_FENCE: &str = ";;;";

/// Splits a document into its metadata block and body
pub struct FrontMatter;

impl FrontMatter {
    /// Split `content` into decoded metadata and the untouched body.
    ///
    /// Two block styles are recognised:
    ///
    /// ```text
    /// ---                     ;;;
    /// title: Hello            {"title": "Hello"}
    /// ---                     ;;;
    /// body...                 body...
    /// ```
    pub fn split(content: &str) -> Result<(RawMetadata, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}');
        let content = skip_blank_lines(content);

        if let Some(rest) = strip_fence_line(content, YAML_FENCE) {
            let (block, body) = find_closing(rest, YAML_FENCE)?;
            return Ok((Self::parse_yaml(block)?, body));
        }

        if let Some(rest) = strip_fence_line(content, JSON_FENCE) {
            let (block, body) = find_closing(rest, JSON_FENCE)?;
            return Ok((Self::parse_json(block)?, body));
        }

        Err(FrontMatterError::Missing)
    }

    fn parse_yaml(block: &str) -> Result<RawMetadata, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(RawMetadata::new());
        }
        let value: Value = serde_yaml::from_str(block)?;
        into_metadata(value)
    }

    fn parse_json(block: &str) -> Result<RawMetadata, FrontMatterError> {
        if block.trim().is_empty() {
            return Ok(RawMetadata::new());
        }
        let json: serde_json::Value = serde_json::from_str(block)?;
        // JSON is a subset of the YAML data model
        let value = serde_yaml::to_value(json)?;
        into_metadata(value)
    }
}

/// Drop leading lines holding only whitespace; an indented line is kept whole
fn skip_blank_lines(mut content: &str) -> &str {
    while let Some(pos) = content.find('\n') {
        if !content[..pos].trim().is_empty() {
            return content;
        }
        content = &content[pos + 1..];
    }
    if content.trim().is_empty() {
        ""
    } else {
        content
    }
}

/// If the first line of `content` is exactly `fence`, return what follows it
fn strip_fence_line<'a>(content: &'a str, fence: &str) -> Option<&'a str> {
    let (line, rest) = match content.find('\n') {
        Some(pos) => (&content[..pos], &content[pos + 1..]),
        None => (content, ""),
    };
    (line.trim_end() == fence).then_some(rest)
}

/// Find the line closing the block; returns (block, body)
fn find_closing<'a>(
    rest: &'a str,
    fence: &'static str,
) -> Result<(&'a str, &'a str), FrontMatterError> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            return Ok((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated(fence))
}

fn into_metadata(value: Value) -> Result<RawMetadata, FrontMatterError> {
    match value {
        Value::Null => Ok(RawMetadata::new()),
        Value::Mapping(mapping) => {
            let mut metadata = RawMetadata::with_capacity(mapping.len());
            for (key, value) in mapping {
                match key {
                    Value::String(key) => {
                        metadata.insert(key, value);
                    }
                    other => return Err(FrontMatterError::NonStringKey(describe(&other))),
                }
            }
            Ok(metadata)
        }
        other => Err(FrontMatterError::NotAMapping(describe(&other))),
    }
}

/// Human name of a raw value's shape, used in error messages
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "text",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml_frontmatter() {
        let content = r#"---
author: Davide Ceschia
pubDatetime: 2023-03-20
title: Zero-Cost Abstractions in Rust
tags:
  - rust
  - go
---
Body starts here.
"#;

        let (meta, body) = FrontMatter::split(content).unwrap();
        assert_eq!(meta["author"], Value::from("Davide Ceschia"));
        assert_eq!(meta["pubDatetime"], Value::from("2023-03-20"));
        assert!(matches!(meta["tags"], Value::Sequence(ref s) if s.len() == 2));
        assert_eq!(body, "Body starts here.\n");
    }

    #[test]
    fn test_keys_keep_source_order() {
        let content = "---\ntitle: a\nauthor: b\ndraft: true\n---\nx";
        let (meta, _) = FrontMatter::split(content).unwrap();
        let keys: Vec<_> = meta.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "author", "draft"]);
    }

    #[test]
    fn test_body_is_passed_through() {
        let content = "---\ntitle: a\n---\n\n## Heading\n\n---\n\nmore  \n";
        let (_, body) = FrontMatter::split(content).unwrap();
        assert_eq!(body, "\n## Heading\n\n---\n\nmore  \n");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: a\r\n---\r\nbody\r\n";
        let (meta, body) = FrontMatter::split(content).unwrap();
        assert_eq!(meta["title"], Value::from("a"));
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_json_frontmatter() {
        let content = r#";;;
{"title": "Test Post", "featured": true, "tags": ["a", "b"]}
;;;
This is content.
"#;

        let (meta, body) = FrontMatter::split(content).unwrap();
        assert_eq!(meta["title"], Value::from("Test Post"));
        assert_eq!(meta["featured"], Value::Bool(true));
        let keys: Vec<_> = meta.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "featured", "tags"]);
        assert_eq!(body, "This is content.\n");
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = FrontMatter::split("---\n---\nbody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_missing_block() {
        let err = FrontMatter::split("# Just markdown\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));

        // A thematic break with text on the same line is not a fence
        let err = FrontMatter::split("--- not a fence\ntitle: a\n---\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_leading_blank_lines() {
        let (meta, body) = FrontMatter::split("\n  \r\n\t\n---\ntitle: a\n---\nbody").unwrap();
        assert_eq!(meta["title"], Value::from("a"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_indented_fence_is_not_a_block() {
        let err = FrontMatter::split("   ---\ntitle: a\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));

        let err = FrontMatter::split("\n\t;;;\n{\"title\": \"a\"}\n;;;\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));

        let err = FrontMatter::split("  \n ").unwrap_err();
        assert!(matches!(err, FrontMatterError::Missing));
    }

    #[test]
    fn test_unterminated_block() {
        let err = FrontMatter::split("---\ntitle: a\nbody without fence\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Unterminated("---")));
    }

    #[test]
    fn test_block_must_be_mapping() {
        let err = FrontMatter::split("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("list")));

        let err = FrontMatter::split("---\n1: one\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NonStringKey("number")));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = FrontMatter::split("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));

        let err = FrontMatter::split(";;;\n{\"title\": }\n;;;\n").unwrap_err();
        assert!(matches!(err, FrontMatterError::Json(_)));
    }
}
