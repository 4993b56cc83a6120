//! Error types for front-matter splitting and post validation

use std::fmt;
use thiserror::Error;

/// A field of the post metadata block, named by its raw key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Author,
    PubDatetime,
    ModDatetime,
    Title,
    PostSlug,
    Featured,
    Draft,
    Tags,
    OgImage,
    CanonicalUrl,
    Description,
    /// The document text after the metadata block
    Body,
}

impl Field {
    /// Key as written in the metadata block
    pub fn key(self) -> &'static str {
        match self {
            Field::Author => "author",
            Field::PubDatetime => "pubDatetime",
            Field::ModDatetime => "modDatetime",
            Field::Title => "title",
            Field::PostSlug => "postSlug",
            Field::Featured => "featured",
            Field::Draft => "draft",
            Field::Tags => "tags",
            Field::OgImage => "ogImage",
            Field::CanonicalUrl => "canonicalURL",
            Field::Description => "description",
            Field::Body => "body",
        }
    }

    /// All keys the schema understands
    pub const KNOWN: [Field; 11] = [
        Field::Author,
        Field::PubDatetime,
        Field::ModDatetime,
        Field::Title,
        Field::PostSlug,
        Field::Featured,
        Field::Draft,
        Field::Tags,
        Field::OgImage,
        Field::CanonicalUrl,
        Field::Description,
    ];

    pub fn is_known_key(key: &str) -> bool {
        Self::KNOWN.iter().any(|f| f.key() == key)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The shape a field was expected to have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Date,
    Boolean,
    TextList,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Text => "text",
            Kind::Date => "date",
            Kind::Boolean => "boolean",
            Kind::TextList => "list of non-empty text",
        })
    }
}

/// Why a metadata block and body do not form a valid post
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(Field),

    #[error("malformed date in `{field}`: {value:?}")]
    MalformedDate { field: Field, value: String },

    #[error("field `{field}` should be {expected}, found {found}")]
    TypeMismatch {
        field: Field,
        expected: Kind,
        found: &'static str,
    },

    #[error("invalid slug {0:?}: expected lowercase words separated by hyphens")]
    InvalidSlug(String),
}

/// Two documents declare the same `postSlug`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate slug {slug:?} declared by {first} and {second}")]
pub struct DuplicateSlugError {
    pub slug: String,
    /// Identifier of the earlier document
    pub first: String,
    /// Identifier of the colliding document
    pub second: String,
}

/// The metadata block could not be located or decoded
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("no front-matter block found")]
    Missing,

    #[error("front-matter opened with {0:?} is never closed")]
    Unterminated(&'static str),

    #[error("invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front-matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("front-matter keys must be text, found {0}")]
    NonStringKey(&'static str),
}

/// Anything that stops a single document from loading
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot read directory entry: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
