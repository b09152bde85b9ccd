//! Pages of the app. There is one: the post editor.

mod editor;

pub use editor::EditorPage;
