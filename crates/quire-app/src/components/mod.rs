pub mod dialog;
pub mod editor;
pub mod post_list;
pub mod url_prompt;

pub use editor::RichEditor;
pub use post_list::RecentPosts;
pub use url_prompt::UrlPrompt;
