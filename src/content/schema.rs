//! Post record schema
//!
//! Turns a decoded metadata block plus body text into a [`PostRecord`].
//! Fields are checked in a fixed order and the first problem found is
//! returned, so the same input always reports the same error.

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use indexmap::{IndexMap, IndexSet};
use serde_yaml::Value;

use super::error::{Field, Kind, ValidationError};
use super::frontmatter::{describe, RawMetadata};
use super::post::PostRecord;
use crate::helpers::{is_valid_slug, parse_datetime};

/// Validates metadata blocks against the post schema
#[derive(Debug, Clone, Copy)]
pub struct PostSchema {
    /// Zone for dates written without an offset
    pub timezone: Tz,
}

impl Default for PostSchema {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::UTC,
        }
    }
}

impl PostSchema {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// Validate `metadata` and `body`, producing a typed record
    pub fn parse(&self, metadata: &RawMetadata, body: &str) -> Result<PostRecord, ValidationError> {
        let author = required_text(metadata, Field::Author)?;
        let pub_datetime = self.required_date(metadata, Field::PubDatetime)?;
        let mod_datetime = self.optional_date(metadata, Field::ModDatetime)?;
        let title = required_text(metadata, Field::Title)?;

        let slug = required_text(metadata, Field::PostSlug)?;
        if !is_valid_slug(&slug) {
            return Err(ValidationError::InvalidSlug(slug));
        }

        let featured = optional_bool(metadata, Field::Featured)?;
        let draft = optional_bool(metadata, Field::Draft)?;
        let tags = tags(metadata)?;
        let og_image = optional_text(metadata, Field::OgImage)?;
        let canonical_url = optional_text(metadata, Field::CanonicalUrl)?;
        let description = required_text(metadata, Field::Description)?;

        if body.trim().is_empty() {
            return Err(ValidationError::MissingField(Field::Body));
        }

        let extra: IndexMap<String, Value> = metadata
            .iter()
            .filter(|(key, _)| !Field::is_known_key(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if !extra.is_empty() {
            tracing::debug!(
                "Keeping unrecognised front-matter keys: {:?}",
                extra.keys().collect::<Vec<_>>()
            );
        }

        Ok(PostRecord {
            author,
            pub_datetime,
            mod_datetime,
            title,
            slug,
            featured,
            draft,
            tags,
            og_image,
            canonical_url,
            description,
            body: body.to_string(),
            extra,
        })
    }

    fn required_date(
        &self,
        metadata: &RawMetadata,
        field: Field,
    ) -> Result<DateTime<FixedOffset>, ValidationError> {
        self.optional_date(metadata, field)?
            .ok_or(ValidationError::MissingField(field))
    }

    fn optional_date(
        &self,
        metadata: &RawMetadata,
        field: Field,
    ) -> Result<Option<DateTime<FixedOffset>>, ValidationError> {
        match lookup(metadata, field) {
            None => Ok(None),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => parse_datetime(s, self.timezone).map(Some).ok_or_else(|| {
                ValidationError::MalformedDate {
                    field,
                    value: s.clone(),
                }
            }),
            Some(other) => Err(mismatch(field, Kind::Date, other)),
        }
    }
}

/// Present, non-null value for `field`
fn lookup(metadata: &RawMetadata, field: Field) -> Option<&Value> {
    match metadata.get(field.key()) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn mismatch(field: Field, expected: Kind, found: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        field,
        expected,
        found: describe(found),
    }
}

fn required_text(metadata: &RawMetadata, field: Field) -> Result<String, ValidationError> {
    optional_text(metadata, field)?.ok_or(ValidationError::MissingField(field))
}

/// Text value, with blank text treated as absent
fn optional_text(metadata: &RawMetadata, field: Field) -> Result<Option<String>, ValidationError> {
    match lookup(metadata, field) {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(field, Kind::Text, other)),
    }
}

fn optional_bool(metadata: &RawMetadata, field: Field) -> Result<bool, ValidationError> {
    match lookup(metadata, field) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(mismatch(field, Kind::Boolean, other)),
    }
}

fn tags(metadata: &RawMetadata) -> Result<IndexSet<String>, ValidationError> {
    let items = match lookup(metadata, Field::Tags) {
        None => return Ok(IndexSet::new()),
        Some(Value::Sequence(items)) => items,
        Some(other) => return Err(mismatch(Field::Tags, Kind::TextList, other)),
    };

    items
        .iter()
        .map(|item| match item {
            Value::String(tag) if !tag.trim().is_empty() => Ok(tag.clone()),
            other => Err(mismatch(Field::Tags, Kind::TextList, other)),
        })
        .collect()
}
