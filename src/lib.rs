//! postmatter: a front-matter schema checker for Markdown blog posts
//!
//! Each post starts with a metadata block (`author`, `pubDatetime`, `title`,
//! `postSlug`, `tags`, ...) followed by free-form body text. This crate
//! splits that block off, validates it into a typed [`content::PostRecord`]
//! and checks that slugs are unique across the whole collection.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::Result;
use std::path::Path;

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "postmatter.yml";

/// A blog source tree
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding the post documents
    pub content_dir: std::path::PathBuf,
}

impl Site {
    /// Open a site rooted at `base_dir`
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Validate every post under the content directory
    pub fn check(&self) -> Result<commands::check::CheckSummary> {
        commands::check::run(self)
    }

    /// Load every post, collecting per-document failures
    pub fn load(&self) -> Result<content::loader::LoadReport> {
        content::loader::ContentLoader::new(self)?.load()
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<std::path::PathBuf> {
        commands::new::create_post(self, &commands::new::NewPost::titled(title))
    }
}
