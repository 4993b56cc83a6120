//! Slug helper functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Lowercase ASCII words separated by single hyphens
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Check whether `s` is a URL-safe post slug
///
/// # Examples
/// ```ignore
/// is_valid_slug("zero-cost-abstractions") // -> true
/// is_valid_slug("Zero Cost")              // -> false
/// ```
pub fn is_valid_slug(s: &str) -> bool {
    SLUG_RE.is_match(s)
}

/// Turn a post title into a slug that passes [`is_valid_slug`]
pub fn slugify_title(title: &str) -> String {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slugs() {
        assert!(is_valid_slug("zero-cost-abstractions"));
        assert!(is_valid_slug("rust"));
        assert!(is_valid_slug("es2015-objects"));
    }

    #[test]
    fn test_invalid_slugs() {
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Zero-Cost"));
        assert!(!is_valid_slug("zero cost"));
        assert!(!is_valid_slug("-leading"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("snake_case"));
    }

    #[test]
    fn test_slugify_title() {
        assert_eq!(
            slugify_title("Zero-Cost Abstractions in Rust"),
            "zero-cost-abstractions-in-rust"
        );
        assert_eq!(slugify_title("  !!  "), "untitled");
        assert!(is_valid_slug(&slugify_title("JavaScript: Objects & Prototypes")));
    }
}
