//! Site configuration (postmatter.yml)

use anyhow::{Context, Result};
use chrono::Duration;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Largest accepted `scheduled_post_margin`, in minutes (one year)
const MAX_SCHEDULED_MARGIN: i64 = 366 * 24 * 60;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Content
    pub content_dir: String,
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignore: Vec<String>,

    // Dates
    pub timezone: String,
    pub date_format: String,
    /// Minutes a scheduled post may be early and still count as published
    pub scheduled_post_margin: i64,

    // Writing
    pub author: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "src/content/blog".to_string(),
            extensions: vec!["md".to_string(), "mdx".to_string()],
            ignore: Vec::new(),

            timezone: "UTC".to_string(),
            date_format: "YYYY-MM-DD".to_string(),
            scheduled_post_margin: 15,

            author: "John Doe".to_string(),

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {:?}", path))?;
        config.timezone()?;
        config.ignore_patterns()?;
        config.scheduled_margin()?;
        Ok(config)
    }

    /// Timezone used for naive front-matter dates
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Unknown timezone {:?}: {}", self.timezone, e))
    }

    /// Compiled `ignore` globs
    pub fn ignore_patterns(&self) -> Result<Vec<glob::Pattern>> {
        self.ignore
            .iter()
            .map(|p| {
                glob::Pattern::new(p).with_context(|| format!("Invalid ignore pattern {:?}", p))
            })
            .collect()
    }

    /// `scheduled_post_margin` as a duration, between zero and one year
    pub fn scheduled_margin(&self) -> Result<Duration> {
        if !(0..=MAX_SCHEDULED_MARGIN).contains(&self.scheduled_post_margin) {
            anyhow::bail!(
                "scheduled_post_margin must be between 0 and {} minutes, got {}",
                MAX_SCHEDULED_MARGIN,
                self.scheduled_post_margin
            );
        }
        Duration::try_minutes(self.scheduled_post_margin)
            .ok_or_else(|| anyhow::anyhow!("scheduled_post_margin is out of range"))
    }

    /// Whether a file extension names a content document
    pub fn is_content_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }
}
