use serde::{Deserialize, Serialize};

/// Matches the `groups.title` column width.
pub const GROUP_TITLE_MAX_LENGTH: usize = 200;
/// Matches the `groups.slug` column width.
pub const GROUP_SLUG_MAX_LENGTH: usize = 50;

/// Group entity - a named, slugged category that posts may belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

/// A group that has not been stored yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGroup {
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl NewGroup {
    /// Slugs appear in URLs: ASCII letters, digits, `-` and `_` only, at
    /// most [`GROUP_SLUG_MAX_LENGTH`] of them.
    pub fn has_valid_slug(&self) -> bool {
        !self.slug.is_empty()
            && self.slug.len() <= GROUP_SLUG_MAX_LENGTH
            && self
                .slug
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    pub fn has_valid_title(&self) -> bool {
        (1..=GROUP_TITLE_MAX_LENGTH).contains(&self.title.chars().count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(slug: &str) -> NewGroup {
        NewGroup {
            title: "Group".to_string(),
            slug: slug.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn test_slug_validation() {
        assert!(group("test_slug").has_valid_slug());
        assert!(group("rust-2024").has_valid_slug());
        assert!(!group("").has_valid_slug());
        assert!(!group("with space").has_valid_slug());
        assert!(!group("a/b").has_valid_slug());
        assert!(group(&"s".repeat(GROUP_SLUG_MAX_LENGTH)).has_valid_slug());
        assert!(!group(&"s".repeat(GROUP_SLUG_MAX_LENGTH + 1)).has_valid_slug());
    }

    #[test]
    fn test_title_length() {
        let titled = |title: String| NewGroup {
            title,
            ..group("cats")
        };

        assert!(titled("Cats".to_string()).has_valid_title());
        assert!(titled("ж".repeat(GROUP_TITLE_MAX_LENGTH)).has_valid_title());
        assert!(!titled("ж".repeat(GROUP_TITLE_MAX_LENGTH + 1)).has_valid_title());
        assert!(!titled(String::new()).has_valid_title());
    }
}
