//! Blog drafting: slugs, draft payloads and dashboard stats.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// URL slug for a post title.
///
/// Lowercases, collapses every run of non-alphanumerics into a single
/// hyphen and strips hyphens from the ends, so "Izimbongi: Then & Now!"
/// becomes "izimbongi-then-now".
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// A blog post row as read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub author_id: Uuid,
    pub published: bool,
}

/// Insert payload for a new post. Posts always start as drafts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlogDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub slug: String,
    pub author_id: Uuid,
    pub published: bool,
}

impl BlogDraft {
    /// Builds a draft with the slug derived from the title.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        excerpt: impl Into<String>,
        featured_image: Option<String>,
        author_id: Uuid,
    ) -> Self {
        let title = title.into();
        let slug = slugify(&title);
        Self {
            title,
            content: content.into(),
            excerpt: excerpt.into(),
            featured_image,
            slug,
            author_id,
            published: false,
        }
    }
}

/// Dashboard post counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostStats {
    pub total: usize,
    pub published: usize,
    pub drafts: usize,
}

impl PostStats {
    /// Tallies a post list the way the dashboard renders it.
    pub fn tally<'a, I>(posts: I) -> Self
    where
        I: IntoIterator<Item = &'a BlogPost>,
    {
        let mut stats = Self::default();
        for post in posts {
            stats.total += 1;
            if post.published {
                stats.published += 1;
            } else {
                stats.drafts += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, published: bool) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: title.to_string(),
            slug: slugify(title),
            excerpt: String::new(),
            content: String::new(),
            featured_image: None,
            author_id: Uuid::new_v4(),
            published,
        }
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Izimbongi: Then & Now!"), "izimbongi-then-now");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("track   #1"), "track-1");
    }

    #[test]
    fn test_slugify_strips_edges() {
        assert_eq!(slugify("  leading"), "leading");
        assert_eq!(slugify("trailing!!!"), "trailing");
        assert_eq!(slugify("--both--"), "both");
    }

    #[test]
    fn test_slugify_degenerate_titles() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("2024"), "2024");
    }

    #[test]
    fn test_draft_starts_unpublished_with_derived_slug() {
        let author = Uuid::new_v4();
        let draft = BlogDraft::new(
            "My First Story!",
            "content",
            "excerpt",
            None,
            author,
        );

        assert_eq!(draft.slug, "my-first-story");
        assert!(!draft.published);
        assert_eq!(draft.author_id, author);
    }

    #[test]
    fn test_draft_serializes_for_insert() {
        let draft = BlogDraft::new(
            "Title",
            "content",
            "excerpt",
            Some("https://assets.example/cover.jpg".into()),
            Uuid::nil(),
        );
        let row = serde_json::to_value(&draft).expect("draft serializes");

        assert_eq!(row["slug"], "title");
        assert_eq!(row["published"], false);
        assert_eq!(row["featured_image"], "https://assets.example/cover.jpg");
    }

    #[test]
    fn test_stats_tally() {
        let posts = vec![
            post("one", true),
            post("two", false),
            post("three", true),
            post("four", false),
            post("five", false),
        ];

        let stats = PostStats::tally(&posts);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.published, 2);
        assert_eq!(stats.drafts, 3);
    }

    #[test]
    fn test_stats_of_empty_list() {
        let posts: Vec<BlogPost> = Vec::new();
        let stats = PostStats::tally(&posts);
        assert_eq!(stats, PostStats::default());
    }
}
