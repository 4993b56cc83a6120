//! Validate every post in the content directory

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::Path;
use std::time::Duration;

use crate::content::loader::LoadReport;
use crate::content::DuplicateSlugError;
use crate::{Site, CONFIG_FILE};

/// Outcome of a check run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Documents examined
    pub checked: usize,
    /// Documents that parsed into a valid post
    pub valid: usize,
    /// Documents that failed to load or validate
    pub invalid: usize,
    /// Slug collisions across valid documents
    pub duplicates: usize,
    /// Files skipped by an `ignore` pattern
    pub ignored: usize,
}

impl CheckSummary {
    pub fn is_ok(&self) -> bool {
        self.invalid == 0 && self.duplicates == 0
    }
}

impl std::fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} checked, {} valid, {} invalid, {} duplicate slug(s)",
            self.checked, self.valid, self.invalid, self.duplicates
        )?;
        if self.ignored > 0 {
            write!(f, ", {} ignored", self.ignored)?;
        }
        Ok(())
    }
}

/// Check the site and print every problem found
pub fn run(site: &Site) -> Result<CheckSummary> {
    let start = std::time::Instant::now();

    let report = site.load()?;
    let duplicates = report.posts.duplicate_slugs();
    print_problems(&report, &duplicates);

    let summary = summarize(&report, &duplicates);
    tracing::info!(
        "Checked {} documents in {:.2}s",
        summary.checked,
        start.elapsed().as_secs_f64()
    );
    println!("{}", summary);

    Ok(summary)
}

/// Count the results of a load
pub fn summarize(report: &LoadReport, duplicates: &[DuplicateSlugError]) -> CheckSummary {
    CheckSummary {
        checked: report.posts.len() + report.failures.len(),
        valid: report.posts.len(),
        invalid: report.failures.len(),
        duplicates: duplicates.len(),
        ignored: report.ignored,
    }
}

fn print_problems(report: &LoadReport, duplicates: &[DuplicateSlugError]) {
    for failure in &report.failures {
        tracing::error!("{}: {}", failure.source, failure.error);
        println!("✗ {}: {}", failure.source, failure.error);
    }
    for dup in duplicates {
        tracing::error!("{}", dup);
        println!("✗ {}", dup);
    }
}

/// Re-run the check whenever a document or the config file changes
pub async fn watch(site: &Site) -> Result<()> {
    let site = site.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&site)).await?
}

fn watch_blocking(site: &Site) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Editors tend to write a file several times in a row
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::Recursive)?;
        tracing::debug!("Watching: {:?}", site.content_dir);
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if relevant.is_empty() {
                    continue;
                }

                println!();
                for event in &relevant {
                    println!("File changed: {}", event.path.display());
                }

                // The config may be among the changed files
                match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                    Ok(summary) if summary.is_ok() => println!("✓ All posts are valid"),
                    Ok(_) => {}
                    Err(e) => tracing::error!("Check failed: {}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.contains("node_modules")
        && !path_str.ends_with('~')
}
