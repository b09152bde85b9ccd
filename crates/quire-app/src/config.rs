use std::str::FromStr;

use quire_editor_core::SmolStr;

use crate::env;

const DEFAULT_RECENT_POSTS: usize = 3;
const DEFAULT_UNDO_DEPTH: usize = 100;
const DEFAULT_APP_TITLE: &str = "WYSIWYG Blog Editor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many of the newest posts the recent list shows.
    pub recent_posts_shown: usize,
    /// Maximum undo steps kept by the document history.
    pub undo_depth: usize,
    pub app_title: SmolStr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            recent_posts_shown: DEFAULT_RECENT_POSTS,
            undo_depth: DEFAULT_UNDO_DEPTH,
            app_title: SmolStr::new_static(DEFAULT_APP_TITLE),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_values(
            env::QUIRE_RECENT_POSTS,
            env::QUIRE_UNDO_DEPTH,
            env::QUIRE_APP_TITLE,
        )
    }

    fn from_values(recent_posts: &str, undo_depth: &str, app_title: &str) -> Self {
        let app_title = app_title.trim();
        Self {
            recent_posts_shown: parse_or("QUIRE_RECENT_POSTS", recent_posts, DEFAULT_RECENT_POSTS),
            undo_depth: parse_or("QUIRE_UNDO_DEPTH", undo_depth, DEFAULT_UNDO_DEPTH).max(1),
            app_title: if app_title.is_empty() {
                SmolStr::new_static(DEFAULT_APP_TITLE)
            } else {
                SmolStr::new(app_title)
            },
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(key: &str, raw: &str, default: T) -> T {
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(key, value = raw, %default, "invalid setting, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_blank_values() {
        assert_eq!(Config::from_values("", " ", ""), Config::default());
    }

    #[test]
    fn test_parses_values() {
        let config = Config::from_values("5", "20", "  My Blog ");
        assert_eq!(config.recent_posts_shown, 5);
        assert_eq!(config.undo_depth, 20);
        assert_eq!(config.app_title, "My Blog");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_values("many", "-1", "Blog");
        assert_eq!(config.recent_posts_shown, DEFAULT_RECENT_POSTS);
        assert_eq!(config.undo_depth, DEFAULT_UNDO_DEPTH);
    }

    #[test]
    fn test_zero_undo_depth_is_raised() {
        assert_eq!(Config::from_values("3", "0", "Blog").undo_depth, 1);
    }
}
