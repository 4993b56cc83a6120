//! Post models

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::error::ValidationError;
use super::frontmatter::RawMetadata;
use super::schema::PostSchema;

/// A validated blog post: typed metadata plus the opaque body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    /// Post author
    pub author: String,

    /// Publication date (`pubDatetime`)
    pub pub_datetime: DateTime<FixedOffset>,

    /// Last modification date (`modDatetime`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mod_datetime: Option<DateTime<FixedOffset>>,

    /// Post title
    pub title: String,

    /// URL-safe identifier (`postSlug`)
    #[serde(rename = "postSlug")]
    pub slug: String,

    /// Whether the post is highlighted on listings
    pub featured: bool,

    /// Drafts never appear in the published view
    pub draft: bool,

    /// Post tags. Equality ignores order.
    pub tags: IndexSet<String>,

    /// Social card image; `None` when empty
    pub og_image: Option<String>,

    /// Canonical URL when the post is syndicated
    #[serde(rename = "canonicalURL", skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,

    /// Short summary
    pub description: String,

    /// Document content after the metadata block
    #[serde(skip)]
    pub body: String,

    /// Unrecognised front-matter keys, kept apart from the schema fields
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl PostRecord {
    /// Parse with the default schema (naive dates read as UTC)
    pub fn parse(metadata: &RawMetadata, body: &str) -> Result<Self, ValidationError> {
        PostSchema::default().parse(metadata, body)
    }

    /// Calendar date of publication in the post's own offset
    pub fn publication_date(&self) -> NaiveDate {
        self.pub_datetime.date_naive()
    }

    /// Modification date if present, else publication date
    pub fn last_touched(&self) -> DateTime<FixedOffset> {
        self.mod_datetime.unwrap_or(self.pub_datetime)
    }

    pub fn has_image(&self) -> bool {
        self.og_image.is_some()
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// A record together with where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Source path, relative to the content directory
    pub source: String,

    #[serde(flatten)]
    pub record: PostRecord,
}

impl Document {
    pub fn new(source: impl Into<String>, record: PostRecord) -> Self {
        Self {
            source: source.into(),
            record,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::TimeZone;

    /// A minimal valid record for tests elsewhere in the crate
    pub(crate) fn sample(slug: &str) -> PostRecord {
        PostRecord {
            author: "Davide Ceschia".to_string(),
            pub_datetime: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2023, 3, 20, 0, 0, 0)
                .unwrap(),
            mod_datetime: None,
            title: format!("Post {}", slug),
            slug: slug.to_string(),
            featured: false,
            draft: false,
            tags: IndexSet::new(),
            og_image: None,
            canonical_url: None,
            description: "A post".to_string(),
            body: "Body".to_string(),
            extra: IndexMap::new(),
        }
    }

    #[test]
    fn test_tags_compare_as_set() {
        let mut a = sample("a");
        let mut b = sample("a");
        a.tags = ["rust", "go"].into_iter().map(String::from).collect();
        b.tags = ["go", "rust"].into_iter().map(String::from).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_last_touched() {
        let mut post = sample("a");
        assert_eq!(post.last_touched(), post.pub_datetime);
        let later = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2023, 4, 1, 0, 0, 0)
            .unwrap();
        post.mod_datetime = Some(later);
        assert_eq!(post.last_touched(), later);
        assert_eq!(
            post.publication_date(),
            NaiveDate::from_ymd_opt(2023, 3, 20).unwrap()
        );
    }

    #[test]
    fn test_serialize_uses_front_matter_keys() {
        let mut post = sample("zero-cost-abstractions");
        post.tags.insert("rust".to_string());
        let json = serde_json::to_value(Document::new("zero-cost.md", post)).unwrap();
        assert_eq!(json["source"], "zero-cost.md");
        assert_eq!(json["postSlug"], "zero-cost-abstractions");
        assert_eq!(json["tags"][0], "rust");
        assert!(json["ogImage"].is_null());
        assert!(json.get("body").is_none());
        assert!(json.get("modDatetime").is_none());
    }

    #[test]
    fn test_unknown_keys_cannot_shadow_document_fields() {
        let mut post = sample("objects");
        post.extra
            .insert("source".to_string(), serde_yaml::Value::from("elsewhere.md"));
        post.extra
            .insert("body".to_string(), serde_yaml::Value::from("fake body"));
        let json = serde_json::to_value(Document::new("objects.md", post)).unwrap();
        assert_eq!(json["source"], "objects.md");
        assert!(json.get("body").is_none());
        assert_eq!(json["extra"]["source"], "elsewhere.md");
        assert_eq!(json["extra"]["body"], "fake body");

        let json = serde_json::to_value(Document::new("plain.md", sample("plain"))).unwrap();
        assert!(json.get("extra").is_none());
    }
}
