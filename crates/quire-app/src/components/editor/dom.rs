//! DOM selection mapping for the editable surface.
//!
//! Rendered blocks carry `data-block`, `data-off` and `data-len`; text spans
//! and images inside them carry `data-off`. All offsets are document char
//! offsets, so a DOM boundary point maps back to the model by counting the
//! characters between it and the start of its block.

use std::cell::Cell;

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use quire_editor_core::Selection;

pub const EDITOR_ID: &str = "quire-editor";

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use browser::{
    focus_editor, input_data, input_target_range, read_selection, replace_contents,
    restore_selection,
};

thread_local! {
    static FOCUS_FROM_CODE: Cell<bool> = const { Cell::new(false) };
}

/// Note that the next focus event on the editor comes from code, not from
/// the user clicking into it.
#[cfg_attr(
    not(all(target_arch = "wasm32", target_os = "unknown")),
    allow(dead_code)
)]
pub fn mark_focus_from_code() {
    FOCUS_FROM_CODE.set(true);
}

/// Whether the focus event being handled was requested by code. Clears the
/// mark.
pub fn take_focus_from_code() -> bool {
    FOCUS_FROM_CODE.replace(false)
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod browser {
    use quire_editor_core::{Range, Selection};
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, InputEvent, Node};

    // web-sys has no binding for the ranges `getTargetRanges()` returns.
    #[wasm_bindgen]
    extern "C" {
        type StaticRange;

        #[wasm_bindgen(method, getter, js_name = startContainer)]
        fn start_container(this: &StaticRange) -> Node;

        #[wasm_bindgen(method, getter, js_name = startOffset)]
        fn start_offset(this: &StaticRange) -> u32;

        #[wasm_bindgen(method, getter, js_name = endContainer)]
        fn end_container(this: &StaticRange) -> Node;

        #[wasm_bindgen(method, getter, js_name = endOffset)]
        fn end_offset(this: &StaticRange) -> u32;
    }

    fn editor(editor_id: &str) -> Option<(web_sys::Window, Document, Element)> {
        let window = web_sys::window()?;
        let document = window.document()?;
        let editor = document.get_element_by_id(editor_id)?;
        Some((window, document, editor))
    }

    fn attr(element: &Element, name: &str) -> Option<usize> {
        element.get_attribute(name)?.parse().ok()
    }

    /// The live DOM selection in model offsets, if it lies inside the editor.
    pub fn read_selection(editor_id: &str) -> Option<Selection> {
        let (window, document, editor) = editor(editor_id)?;
        let selection = window.get_selection().ok()??;
        let anchor_node = selection.anchor_node()?;
        let focus_node = selection.focus_node()?;
        if !editor.contains(Some(&anchor_node)) || !editor.contains(Some(&focus_node)) {
            return None;
        }
        let anchor = model_offset(&document, &anchor_node, selection.anchor_offset())?;
        let head = model_offset(&document, &focus_node, selection.focus_offset())?;
        Some(Selection::new(anchor, head))
    }

    /// The model range a `beforeinput` event is about to replace.
    pub fn input_target_range(editor_id: &str, evt: &InputEvent) -> Option<Range> {
        let ranges = evt.get_target_ranges();
        if ranges.length() == 0 {
            return None;
        }
        let target: StaticRange = ranges.get(0).unchecked_into();
        let (_, document, editor) = editor(editor_id)?;
        let start_node = target.start_container();
        let end_node = target.end_container();
        if !editor.contains(Some(&start_node)) || !editor.contains(Some(&end_node)) {
            return None;
        }
        let start = model_offset(&document, &start_node, target.start_offset())?;
        let end = model_offset(&document, &end_node, target.end_offset())?;
        Some(Range::new(start.min(end), start.max(end)))
    }

    /// Text carried by a `beforeinput` event. Replacements and drops put it
    /// in the data transfer instead of `data`.
    pub fn input_data(evt: &InputEvent) -> Option<String> {
        evt.data().or_else(|| {
            evt.data_transfer()
                .and_then(|transfer| transfer.get_data("text/plain").ok())
        })
    }

    fn model_offset(document: &Document, node: &Node, dom_offset: u32) -> Option<usize> {
        let element = match node.dyn_ref::<Element>() {
            Some(el) => el.clone(),
            None => node.parent_element()?,
        };
        let Some(block) = element.closest("[data-block]").ok().flatten() else {
            // Boundary between blocks, on the editor or a list container.
            return boundary_offset(&element, dom_offset);
        };
        let start = attr(&block, "data-off")?;
        let len = attr(&block, "data-len")?;

        let range = document.create_range().ok()?;
        range.select_node_contents(&block).ok()?;
        range.set_end(node, dom_offset).ok()?;
        let text = String::from(range.to_string());
        let images = range
            .clone_contents()
            .ok()?
            .query_selector_all("img")
            .ok()?
            .length() as usize;
        Some(start + (text.chars().count() + images).min(len))
    }

    fn boundary_offset(container: &Element, dom_offset: u32) -> Option<usize> {
        if let Some(child) = container.child_nodes().item(dom_offset) {
            let first = match child.dyn_ref::<Element>() {
                Some(el) if el.has_attribute("data-block") => Some(el.clone()),
                Some(el) => el.query_selector("[data-block]").ok().flatten(),
                None => None,
            };
            if let Some(block) = first {
                return attr(&block, "data-off");
            }
        }
        // Past the last child: the end of the last block inside the container.
        let blocks = container.query_selector_all("[data-block]").ok()?;
        let Some(last) = blocks.length().checked_sub(1).and_then(|i| blocks.item(i)) else {
            return Some(0);
        };
        let last = last.dyn_into::<Element>().ok()?;
        Some(attr(&last, "data-off")? + attr(&last, "data-len")?)
    }

    fn child_index(node: &Node) -> Option<(Node, u32)> {
        let parent = node.parent_node()?;
        let children = parent.child_nodes();
        (0..children.length())
            .find(|&i| children.item(i).is_some_and(|c| c.is_same_node(Some(node))))
            .map(|i| (parent, i))
    }

    fn dom_point(editor: &Element, offset: usize) -> Option<(Node, u32)> {
        let blocks = editor.query_selector_all("[data-block]").ok()?;
        for i in 0..blocks.length() {
            let block = blocks.item(i)?.dyn_into::<Element>().ok()?;
            let start = attr(&block, "data-off")?;
            let len = attr(&block, "data-len")?;
            if offset < start || offset > start + len {
                continue;
            }

            let pieces = block.query_selector_all("[data-off]").ok()?;
            for j in 0..pieces.length() {
                let piece = pieces.item(j)?.dyn_into::<Element>().ok()?;
                let piece_start = attr(&piece, "data-off")?;
                if piece.tag_name().eq_ignore_ascii_case("img") {
                    if piece_start == offset {
                        return child_index(&piece);
                    }
                    continue;
                }
                let Some(text_node) = piece.first_child() else {
                    continue;
                };
                let text = text_node.text_content().unwrap_or_default();
                let chars = text.chars().count();
                if offset >= piece_start && offset <= piece_start + chars {
                    let utf16: usize = text
                        .chars()
                        .take(offset - piece_start)
                        .map(char::len_utf16)
                        .sum();
                    return Some((text_node, utf16 as u32));
                }
            }

            let end = if offset == start { 0 } else { block.child_nodes().length() };
            return Some((block.into(), end));
        }
        None
    }

    /// Put the DOM selection where the model says it is. Skipped unless the
    /// editor has focus, so other inputs keep theirs.
    pub fn restore_selection(editor_id: &str, anchor: usize, head: usize) -> Option<()> {
        let (window, document, editor) = editor(editor_id)?;
        if !document.active_element()?.is_same_node(Some(&*editor)) {
            return None;
        }
        let selection = window.get_selection().ok()??;
        let (anchor_node, anchor_offset) = dom_point(&editor, anchor)?;
        let (focus_node, focus_offset) = dom_point(&editor, head)?;
        selection
            .set_base_and_extent(&anchor_node, anchor_offset, &focus_node, focus_offset)
            .ok()
    }

    /// Overwrite the editor's DOM, discarding edits the model never saw.
    pub fn replace_contents(editor_id: &str, html: &str) {
        if let Some((_, _, editor)) = editor(editor_id) {
            editor.set_inner_html(html);
        }
    }

    /// Move focus back into the editor. The focus handler then pushes the
    /// model selection into the DOM instead of reading the browser's default
    /// caret back.
    pub fn focus_editor(editor_id: &str) {
        let Some((_, document, editor)) = editor(editor_id) else {
            return;
        };
        if document
            .active_element()
            .is_some_and(|active| active.is_same_node(Some(&*editor)))
        {
            return;
        }
        if let Ok(el) = editor.dyn_into::<HtmlElement>() {
            super::mark_focus_from_code();
            if el.focus().is_err() {
                super::take_focus_from_code();
            }
        }
    }
}

// Without a browser DOM the model selection is the only selection.

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn read_selection(_editor_id: &str) -> Option<Selection> {
    None
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn restore_selection(_editor_id: &str, _anchor: usize, _head: usize) -> Option<()> {
    None
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn replace_contents(_editor_id: &str, _html: &str) {}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn focus_editor(_editor_id: &str) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_from_code_is_consumed_once() {
        assert!(!take_focus_from_code());
        mark_focus_from_code();
        assert!(take_focus_from_code());
        // A later focus event is the user's.
        assert!(!take_focus_from_code());
    }
}
