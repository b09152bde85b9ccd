//! Saved and published posts.
//!
//! The store lives only as long as the page does. Records are prepended and
//! never edited or removed.

use std::fmt;

use chrono::{DateTime, Utc};
use quire_editor_core::{SmolStr, parse_tags};

/// Post identifier: the creation time in milliseconds, bumped forward when
/// two posts land on the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostId(i64);

impl PostId {
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Saved,
    Published,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Saved => "saved",
            PostStatus::Published => "published",
        }
    }

    /// Notification shown after the post is stored.
    pub fn success_message(self) -> &'static str {
        match self {
            PostStatus::Saved => "Post saved successfully!",
            PostStatus::Published => "Post published successfully!",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub tags: Vec<SmolStr>,
    /// Markup snapshot taken when the post was stored.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub status: PostStatus,
}

impl Post {
    /// Title for listings; blank titles read as "Untitled".
    pub fn display_title(&self) -> &str {
        let title = self.title.trim();
        if title.is_empty() { "Untitled" } else { title }
    }
}

/// Newest-first sequence of stored posts.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    last_id: Option<PostId>,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The `n` most recent posts, newest first.
    pub fn recent(&self, n: usize) -> &[Post] {
        &self.posts[..n.min(self.posts.len())]
    }

    /// Build a post from raw draft fields and put it at the front.
    pub fn create(
        &mut self,
        title: &str,
        raw_tags: &str,
        content: &str,
        status: PostStatus,
        now: DateTime<Utc>,
    ) -> &Post {
        let id = self.next_id(now);
        let post = Post {
            id,
            title: title.to_owned(),
            tags: parse_tags(raw_tags),
            content: content.to_owned(),
            created_at: now,
            status,
        };
        tracing::info!(id = %post.id, %status, tags = post.tags.len(), "stored post");
        self.posts.insert(0, post);
        &self.posts[0]
    }

    fn next_id(&mut self, now: DateTime<Utc>) -> PostId {
        let millis = now.timestamp_millis();
        let id = match self.last_id {
            Some(PostId(last)) if millis <= last => PostId(last + 1),
            _ => PostId(millis),
        };
        self.last_id = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn test_create_prepends() {
        let mut store = PostStore::new();
        store.create("first", "", "<p>1</p>", PostStatus::Saved, at(1_000));
        store.create("second", "a, b", "<p>2</p>", PostStatus::Published, at(2_000));
        assert_eq!(store.len(), 2);
        assert_eq!(store.posts()[0].title, "second");
        assert_eq!(store.posts()[0].tags, vec!["a", "b"]);
        assert_eq!(store.posts()[0].status, PostStatus::Published);
        assert_eq!(store.posts()[1].title, "first");
    }

    #[test]
    fn test_recent_is_bounded() {
        let mut store = PostStore::new();
        assert!(store.recent(3).is_empty());
        for i in 0..5 {
            store.create(&format!("post {i}"), "", "", PostStatus::Saved, at(i * 10));
        }
        let recent = store.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].title, "post 4");
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_ids_unique_within_one_millisecond() {
        let mut store = PostStore::new();
        let a = store.create("a", "", "", PostStatus::Saved, at(5_000)).id;
        let b = store.create("b", "", "", PostStatus::Saved, at(5_000)).id;
        let c = store.create("c", "", "", PostStatus::Saved, at(4_000)).id;
        assert_eq!(a.as_millis(), 5_000);
        assert_eq!(b.as_millis(), 5_001);
        assert_eq!(c.as_millis(), 5_002);
    }

    #[test]
    fn test_status_text() {
        assert_eq!(PostStatus::Saved.to_string(), "saved");
        assert_eq!(PostStatus::Published.to_string(), "published");
        assert_eq!(
            PostStatus::Published.success_message(),
            "Post published successfully!"
        );
    }

    #[test]
    fn test_display_title() {
        let mut store = PostStore::new();
        let post = store.create("   ", "", "", PostStatus::Saved, at(0));
        assert_eq!(post.display_title(), "Untitled");
    }
}
