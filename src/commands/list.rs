//! List site content

use anyhow::Result;
use chrono::{DateTime, Duration, FixedOffset, Utc};
use std::str::FromStr;

use crate::content::{sort_by_date, Document, PostCollection};
use crate::helpers::format_date;
use crate::Site;

/// What `list` prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Posts,
    Drafts,
    Featured,
    Tags,
}

impl FromStr for ListKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "post" | "posts" => Ok(ListKind::Posts),
            "draft" | "drafts" => Ok(ListKind::Drafts),
            "featured" => Ok(ListKind::Featured),
            "tag" | "tags" => Ok(ListKind::Tags),
            _ => anyhow::bail!("Unknown type: {}. Available: post, draft, featured, tag", s),
        }
    }
}

/// List site content by type
pub fn run(site: &Site, kind: ListKind, all: bool, json: bool) -> Result<()> {
    let report = site.load()?;
    if !report.is_clean() {
        tracing::warn!(
            "{} document(s) failed to load and are not listed; run `postmatter check`",
            report.failures.len()
        );
    }

    let now = Utc::now().fixed_offset();
    let margin = site.config.scheduled_margin()?;
    let docs = select(&report.posts, kind, all, now, margin);

    if kind == ListKind::Tags {
        let tags = PostCollection::tag_counts(docs);
        if json {
            let tags: Vec<_> = tags
                .iter()
                .map(|(tag, count)| serde_json::json!({ "tag": tag, "count": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&tags)?);
        } else {
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&docs)?);
        return Ok(());
    }

    let heading = match kind {
        ListKind::Drafts => "Drafts",
        ListKind::Featured => "Featured",
        _ => "Posts",
    };
    println!("{} ({}):", heading, docs.len());
    for doc in docs {
        println!(
            "  {} - {} [{}]",
            format_date(&doc.record.pub_datetime, &site.config.date_format),
            doc.record.title,
            doc.source
        );
    }

    Ok(())
}

/// Documents shown for `kind`, newest first.
///
/// Unless `all` is set, posts and tags only cover the published view.
pub fn select(
    posts: &PostCollection,
    kind: ListKind,
    all: bool,
    now: DateTime<FixedOffset>,
    margin: Duration,
) -> Vec<&Document> {
    let mut docs = match kind {
        ListKind::Drafts => posts.drafts(),
        ListKind::Featured => posts.featured(),
        ListKind::Posts | ListKind::Tags if all => posts.documents().iter().collect(),
        ListKind::Posts | ListKind::Tags => posts.published(now, margin),
    };
    sort_by_date(&mut docs);
    docs
}
