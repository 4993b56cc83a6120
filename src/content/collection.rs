//! Collections of posts and the checks that span more than one document

use chrono::{DateTime, Duration, FixedOffset};
use std::collections::HashMap;

use super::error::DuplicateSlugError;
use super::post::{Document, PostRecord};

/// Confirm no two records share a slug.
///
/// Records are identified by position (`#0`, `#1`, ...).
pub fn validate_uniqueness(records: &[PostRecord]) -> Result<(), DuplicateSlugError> {
    let entries = records
        .iter()
        .enumerate()
        .map(|(i, record)| (format!("#{}", i), record.slug.as_str()));
    match find_duplicates(entries).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Every collision, in the order the colliding document appears.
///
/// A slug used three times yields two errors, both naming the first
/// occurrence.
fn find_duplicates<'a, I>(entries: I) -> Vec<DuplicateSlugError>
where
    I: IntoIterator<Item = (String, &'a str)>,
{
    let mut seen: HashMap<&'a str, String> = HashMap::new();
    let mut duplicates = Vec::new();

    for (id, slug) in entries {
        match seen.get(slug) {
            Some(first) => duplicates.push(DuplicateSlugError {
                slug: slug.to_string(),
                first: first.clone(),
                second: id,
            }),
            None => {
                seen.insert(slug, id);
            }
        }
    }

    duplicates
}

/// All successfully parsed documents of a site
#[derive(Debug, Clone, Default)]
pub struct PostCollection {
    documents: Vec<Document>,
}

impl PostCollection {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn push(&mut self, document: Document) {
        self.documents.push(document);
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get_by_slug(&self, slug: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.record.slug == slug)
    }

    /// Confirm no two documents share a slug, naming them by source path
    pub fn validate_uniqueness(&self) -> Result<(), DuplicateSlugError> {
        match self.duplicate_slugs().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every slug collision in the collection
    pub fn duplicate_slugs(&self) -> Vec<DuplicateSlugError> {
        find_duplicates(
            self.documents
                .iter()
                .map(|d| (d.source.clone(), d.record.slug.as_str())),
        )
    }

    /// Documents visible on the live site at `now`.
    ///
    /// Drafts are excluded, and so are posts scheduled later than
    /// `now + margin`. A cutoff past the representable range admits every
    /// date.
    pub fn published(&self, now: DateTime<FixedOffset>, margin: Duration) -> Vec<&Document> {
        let cutoff = now.checked_add_signed(margin);
        let admits_all = cutoff.is_none() && margin > Duration::zero();
        self.documents
            .iter()
            .filter(|d| !d.record.draft)
            .filter(|d| admits_all || cutoff.is_some_and(|c| d.record.pub_datetime <= c))
            .collect()
    }

    pub fn drafts(&self) -> Vec<&Document> {
        self.documents.iter().filter(|d| d.record.draft).collect()
    }

    pub fn featured(&self) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.record.featured && !d.record.draft)
            .collect()
    }

    /// Newest first by modification date, falling back to publication date
    pub fn sorted_by_date(&self) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self.documents.iter().collect();
        sort_by_date(&mut docs);
        docs
    }

    /// Tag usage across the given documents, most used first
    pub fn tag_counts<'a>(docs: impl IntoIterator<Item = &'a Document>) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for doc in docs {
            for tag in &doc.record.tags {
                *counts.entry(tag.as_str()).or_insert(0) += 1;
            }
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

/// Sort newest first; ties broken by title
pub fn sort_by_date(docs: &mut [&Document]) {
    docs.sort_by(|a, b| {
        b.record
            .last_touched()
            .cmp(&a.record.last_touched())
            .then_with(|| a.record.title.cmp(&b.record.title))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::tests::sample;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 0, 0)
            .unwrap()
    }

    fn doc(source: &str, slug: &str) -> Document {
        Document::new(source, sample(slug))
    }

    #[test]
    fn test_unique_records_pass() {
        let records = vec![sample("a"), sample("b"), sample("c")];
        assert_eq!(validate_uniqueness(&records), Ok(()));
        assert_eq!(validate_uniqueness(&[]), Ok(()));
    }

    #[test]
    fn test_duplicate_records_by_position() {
        let records = vec![
            sample("zero-cost-abstractions"),
            sample("objects"),
            sample("zero-cost-abstractions"),
        ];
        assert_eq!(
            validate_uniqueness(&records),
            Err(DuplicateSlugError {
                slug: "zero-cost-abstractions".to_string(),
                first: "#0".to_string(),
                second: "#2".to_string(),
            })
        );
    }

    #[test]
    fn test_duplicate_documents_by_source() {
        let collection = PostCollection::new(vec![
            doc("2023/zero-cost.md", "zero-cost-abstractions"),
            doc("drafts/zero-cost-v2.md", "zero-cost-abstractions"),
        ]);
        let err = collection.validate_uniqueness().unwrap_err();
        assert_eq!(err.slug, "zero-cost-abstractions");
        assert_eq!(err.first, "2023/zero-cost.md");
        assert_eq!(err.second, "drafts/zero-cost-v2.md");
    }

    #[test]
    fn test_all_duplicates_reported() {
        let collection = PostCollection::new(vec![
            doc("a.md", "x"),
            doc("b.md", "y"),
            doc("c.md", "x"),
            doc("d.md", "y"),
            doc("e.md", "x"),
        ]);
        let dups = collection.duplicate_slugs();
        assert_eq!(dups.len(), 3);
        assert_eq!((dups[0].first.as_str(), dups[0].second.as_str()), ("a.md", "c.md"));
        assert_eq!((dups[1].first.as_str(), dups[1].second.as_str()), ("b.md", "d.md"));
        assert_eq!((dups[2].first.as_str(), dups[2].second.as_str()), ("a.md", "e.md"));
    }

    #[test]
    fn test_published_excludes_drafts_and_scheduled() {
        let mut draft = doc("draft.md", "draft");
        draft.record.draft = true;

        let mut scheduled = doc("later.md", "later");
        scheduled.record.pub_datetime = utc(2023, 3, 21, 12);

        let mut almost = doc("almost.md", "almost");
        almost.record.pub_datetime = utc(2023, 3, 21, 0) + Duration::minutes(10);

        let live = doc("live.md", "live");

        let collection = PostCollection::new(vec![draft, scheduled, almost, live]);
        let now = utc(2023, 3, 21, 0);
        let slugs: Vec<_> = collection
            .published(now, Duration::minutes(15))
            .iter()
            .map(|d| d.record.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["almost", "live"]);

        assert_eq!(collection.drafts().len(), 1);
        assert_eq!(collection.published(now, Duration::zero()).len(), 1);
    }

    #[test]
    fn test_published_with_huge_margin() {
        let mut future = doc("future.md", "future");
        future.record.pub_datetime = utc(2030, 1, 1, 0);
        let mut draft = doc("draft.md", "draft");
        draft.record.draft = true;

        let collection = PostCollection::new(vec![future, draft]);
        let now = utc(2023, 3, 21, 0);
        let slugs: Vec<_> = collection
            .published(now, Duration::MAX)
            .iter()
            .map(|d| d.record.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["future"]);
        assert!(collection.published(now, Duration::MIN).is_empty());
    }

    #[test]
    fn test_sorted_by_date() {
        let mut old = doc("old.md", "old");
        old.record.pub_datetime = utc(2020, 1, 1, 0);
        let mut revised = doc("revised.md", "revised");
        revised.record.pub_datetime = utc(2019, 1, 1, 0);
        revised.record.mod_datetime = Some(utc(2024, 1, 1, 0));
        let mid = doc("mid.md", "mid");

        let collection = PostCollection::new(vec![old, mid, revised]);
        let order: Vec<_> = collection
            .sorted_by_date()
            .iter()
            .map(|d| d.record.slug.as_str())
            .collect();
        assert_eq!(order, vec!["revised", "mid", "old"]);
    }

    #[test]
    fn test_tag_counts() {
        let mut a = doc("a.md", "a");
        a.record.tags = ["rust", "go"].into_iter().map(String::from).collect();
        let mut b = doc("b.md", "b");
        b.record.tags = ["rust"].into_iter().map(String::from).collect();
        let c = doc("c.md", "c");

        let collection = PostCollection::new(vec![a, b, c]);
        let counts = PostCollection::tag_counts(collection.documents());
        assert_eq!(
            counts,
            vec![("rust".to_string(), 2), ("go".to_string(), 1)]
        );
    }

    #[test]
    fn test_featured_and_lookup() {
        let mut a = doc("a.md", "a");
        a.record.featured = true;
        let mut b = doc("b.md", "b");
        b.record.featured = true;
        b.record.draft = true;

        let collection = PostCollection::new(vec![a, b]);
        assert_eq!(collection.featured().len(), 1);
        assert_eq!(
            collection.get_by_slug("b").map(|d| d.source.as_str()),
            Some("b.md")
        );
        assert!(collection.get_by_slug("missing").is_none());
    }
}
