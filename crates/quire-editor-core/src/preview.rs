//! Read-only rendering of a post draft.

use markdown_weaver_escape::{StrWrite, escape_html};
use smol_str::SmolStr;

use crate::render::HtmlWriter;
use crate::tags::parse_tags;

pub const UNTITLED_POST: &str = "Untitled Post";
pub const EMPTY_CONTENT_PLACEHOLDER: &str = "<p>Start writing your content...</p>";

/// The pieces of a preview, before they are turned into markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewModel<'a> {
    pub title: &'a str,
    pub tags: Vec<SmolStr>,
    /// Trusted markup produced by the document serializer.
    pub content: &'a str,
}

impl<'a> PreviewModel<'a> {
    pub fn new(title: &'a str, raw_tags: &str, content: &'a str) -> Self {
        let title = if title.is_empty() { UNTITLED_POST } else { title };
        let content = if content.is_empty() {
            EMPTY_CONTENT_PLACEHOLDER
        } else {
            content
        };
        Self {
            title,
            tags: parse_tags(raw_tags),
            content,
        }
    }

    pub fn write_to<W: StrWrite>(&self, w: &mut W) -> Result<(), W::Error> {
        w.write_str("<article class=\"preview\"><h1 class=\"preview-title\">")?;
        escape_html(&mut *w, self.title)?;
        w.write_str("</h1>")?;
        if !self.tags.is_empty() {
            w.write_str("<div class=\"preview-tags\">")?;
            for tag in &self.tags {
                w.write_str("<span class=\"tag-pill\">")?;
                escape_html(&mut *w, tag)?;
                w.write_str("</span>")?;
            }
            w.write_str("</div>")?;
        }
        w.write_str("<div class=\"preview-content\">")?;
        w.write_str(self.content)?;
        w.write_str("</div></article>")
    }
}

/// Render title, raw tag string and content snapshot as preview markup.
///
/// Title and tags are escaped; `content` is inserted verbatim since it is
/// serializer output.
pub fn render_preview(title: &str, raw_tags: &str, content: &str) -> String {
    let mut w = HtmlWriter::new();
    let Ok(()) = PreviewModel::new(title, raw_tags, content).write_to(&mut w);
    w.into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_uses_placeholders() {
        insta::assert_snapshot!(
            render_preview("", "", ""),
            @r#"<article class="preview"><h1 class="preview-title">Untitled Post</h1><div class="preview-content"><p>Start writing your content...</p></div></article>"#
        );
    }

    #[test]
    fn test_one_pill_per_tag() {
        insta::assert_snapshot!(
            render_preview("Hello", "rust, web", "<p>Body</p>"),
            @r#"<article class="preview"><h1 class="preview-title">Hello</h1><div class="preview-tags"><span class="tag-pill">rust</span><span class="tag-pill">web</span></div><div class="preview-content"><p>Body</p></div></article>"#
        );
    }

    #[test]
    fn test_blank_tag_string_omits_section() {
        let html = render_preview("T", " , ", "<p>x</p>");
        assert!(!html.contains("preview-tags"));
    }

    #[test]
    fn test_title_and_tags_are_escaped() {
        let html = render_preview("<script>alert(1)</script>", "<b>", "<p>ok</p>");
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<span class=\"tag-pill\">&lt;b&gt;</span>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_content_is_verbatim() {
        let content = "<h2>Sub</h2><p><strong>x</strong></p>";
        let model = PreviewModel::new("T", "", content);
        assert_eq!(model.content, content);
        assert!(render_preview("T", "", content).contains(content));
    }
}
