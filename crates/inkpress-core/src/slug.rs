//! Slug derivation.
//!
//! Lowercases the title, keeps ASCII alphanumerics, and collapses every
//! other run of characters into a single hyphen. The slug is regenerated
//! from the title on every post save.

/// Derive a URL-safe slug from a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("Rust: a love story!"), "rust-a-love-story");
        assert_eq!(slugify("  spaced   out  "), "spaced-out");
    }

    #[test]
    fn test_case_and_digits() {
        assert_eq!(slugify("Top 10 Posts of 2024"), "top-10-posts-of-2024");
    }

    #[test]
    fn test_non_ascii_dropped() {
        assert_eq!(slugify("café au lait"), "caf-au-lait");
    }

    #[test]
    fn test_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
