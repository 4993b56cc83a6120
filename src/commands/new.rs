//! Create a new post

use anyhow::{Context, Result};
use chrono::Utc;
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;

use crate::content::{Field, PostSchema, RawMetadata};
use crate::helpers::{is_valid_slug, slugify_title};
use crate::Site;

/// Options for a new post
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: String,
    /// Defaults to the slugified title
    pub slug: Option<String>,
    pub tags: Vec<String>,
    /// Defaults to the title
    pub description: Option<String>,
    pub draft: bool,
}

impl NewPost {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Default::default()
        }
    }
}

/// Write a scaffolded post into the content directory, returning its path
pub fn create_post(site: &Site, post: &NewPost) -> Result<PathBuf> {
    let slug = match &post.slug {
        Some(slug) => slug.clone(),
        None => slugify_title(&post.title),
    };
    if !is_valid_slug(&slug) {
        anyhow::bail!(
            "Invalid slug {:?}: use lowercase words separated by hyphens",
            slug
        );
    }

    let existing = site.load()?;
    if let Some(doc) = existing.posts.get_by_slug(&slug) {
        anyhow::bail!("Slug {:?} is already used by {}", slug, doc.source);
    }

    let file_path = site.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let (meta, body) = scaffold(site, post, &slug)?;
    PostSchema::new(site.config.timezone()?)
        .parse(&meta, &body)
        .with_context(|| format!("Refusing to write an invalid post to {:?}", file_path))?;
    let content = format!("---\n{}---\n{}", serde_yaml::to_string(&meta)?, body);

    fs::create_dir_all(&site.content_dir)
        .with_context(|| format!("Cannot create {:?}", site.content_dir))?;
    fs::write(&file_path, content)?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Metadata block and body for a new post
fn scaffold(site: &Site, post: &NewPost, slug: &str) -> Result<(RawMetadata, String)> {
    let now = Utc::now().with_timezone(&site.config.timezone()?);

    let mut meta = RawMetadata::new();
    let mut set = |field: Field, value: Value| {
        meta.insert(field.key().to_string(), value);
    };
    set(Field::Author, Value::from(site.config.author.as_str()));
    set(
        Field::PubDatetime,
        Value::from(now.format("%Y-%m-%dT%H:%M:%S%:z").to_string()),
    );
    set(Field::Title, Value::from(post.title.as_str()));
    set(Field::PostSlug, Value::from(slug));
    set(Field::Featured, Value::Bool(false));
    set(Field::Draft, Value::Bool(post.draft));
    set(
        Field::Tags,
        Value::Sequence(post.tags.iter().map(|t| Value::from(t.as_str())).collect()),
    );
    set(Field::OgImage, Value::from(""));
    set(
        Field::Description,
        Value::from(post.description.as_deref().unwrap_or(&post.title)),
    );

    let scaffold_path = site.base_dir.join("scaffolds").join("post.md");
    let body = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)?.replace("{{ title }}", &post.title)
    } else {
        format!("## {}\n", post.title)
    };

    Ok((meta, format!("\n{}", body)))
}
