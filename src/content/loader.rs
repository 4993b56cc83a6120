//! Content loader - loads post documents from the content directory

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::DocumentError;
use super::{Document, FrontMatter, PostCollection, PostRecord, PostSchema};
use crate::Site;

/// A document that could not be turned into a post
#[derive(Debug)]
pub struct LoadFailure {
    /// Source path, relative to the content directory
    pub source: String,
    pub error: DocumentError,
}

/// Everything found while loading a content directory
#[derive(Debug, Default)]
pub struct LoadReport {
    pub posts: PostCollection,
    pub failures: Vec<LoadFailure>,
    /// Files skipped by an `ignore` pattern
    pub ignored: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Loads documents from the content directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    schema: PostSchema,
    ignore: Vec<glob::Pattern>,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Result<Self> {
        Ok(Self {
            site,
            schema: PostSchema::new(site.config.timezone()?),
            ignore: site.config.ignore_patterns()?,
        })
    }

    /// Load every document under the content directory
    pub fn load(&self) -> Result<LoadReport> {
        let mut report = LoadReport::default();
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            tracing::warn!("Content directory {:?} does not exist", content_dir);
            return Ok(report);
        }

        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in WalkDir::new(content_dir).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let source = self.source_name(err.path().unwrap_or(content_dir));
                    tracing::warn!("Skipping unreadable entry {}: {}", source, err);
                    report.failures.push(LoadFailure {
                        source,
                        error: err.into(),
                    });
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !self.is_content_file(path) {
                continue;
            }
            if self.is_ignored(path) {
                tracing::debug!("Ignoring {:?}", path);
                report.ignored += 1;
                continue;
            }
            paths.push(path.to_path_buf());
        }
        paths.sort();

        for path in paths {
            let source = self.source_name(&path);
            match self.load_document(&path) {
                Ok(record) => {
                    tracing::debug!("Loaded {} ({})", source, record.slug);
                    report.posts.push(Document::new(source, record));
                }
                Err(error) => {
                    tracing::debug!("Failed to load {}: {}", source, error);
                    report.failures.push(LoadFailure { source, error });
                }
            }
        }

        Ok(report)
    }

    /// Read, split and validate a single file
    pub fn load_document(&self, path: &Path) -> Result<PostRecord, DocumentError> {
        let content = fs::read_to_string(path)?;
        let (metadata, body) = FrontMatter::split(&content)?;
        Ok(self.schema.parse(&metadata, body)?)
    }

    fn is_content_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.site.config.is_content_extension(e))
            .unwrap_or(false)
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.site.content_dir).unwrap_or(path);
        self.ignore.iter().any(|p| p.matches_path(relative))
    }

    /// Path relative to the content directory, with `/` separators
    fn source_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.site.content_dir).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
