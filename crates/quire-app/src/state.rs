//! Application state container.
//!
//! One `AppState` holds the draft, the document model, stored posts and the
//! UI flags. Every user action goes through one of its methods, so the
//! components only read from it and call in.

use chrono::{DateTime, Utc};
use quire_editor_core::{
    Color, CommandOutcome, EditorAction, FormatCommand, Range, RichDocument, Selection,
    current_range, execute_action, execute_command, render_preview,
};

use crate::config::Config;
use crate::error::EditorError;
use crate::posts::{Post, PostStatus, PostStore};
use crate::prompt::{
    CapturedSelection, PendingPrompt, PromptKind, PromptOutcome, PromptRequest, PromptTicket,
    prompt_channel,
};

/// The post being written. Overwritten in place, never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    /// Raw comma-separated tag text.
    pub tags: String,
    /// Markup snapshot of the document.
    pub content: String,
}

/// An IME or dead-key composition in progress. The browser owns the DOM text
/// until it ends; the committed text then replaces `range`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Composition {
    range: Range,
    /// Set once the browser reported which text the composition replaces.
    placed: bool,
}

#[derive(Debug)]
pub struct AppState {
    draft: PostDraft,
    document: RichDocument,
    posts: PostStore,
    recent_posts_shown: usize,
    preview_active: bool,
    color_picker_open: bool,
    prompt: Option<PendingPrompt>,
    composition: Option<Composition>,
    synced_revision: u64,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let document = RichDocument::with_undo_depth(config.undo_depth);
        Self {
            draft: PostDraft::default(),
            synced_revision: document.revision(),
            document,
            posts: PostStore::new(),
            recent_posts_shown: config.recent_posts_shown,
            preview_active: false,
            color_picker_open: false,
            prompt: None,
            composition: None,
        }
    }

    pub fn draft(&self) -> &PostDraft {
        &self.draft
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn posts(&self) -> &PostStore {
        &self.posts
    }

    pub fn recent_posts(&self) -> &[Post] {
        self.posts.recent(self.recent_posts_shown)
    }

    pub fn is_preview_active(&self) -> bool {
        self.preview_active
    }

    pub fn is_color_picker_open(&self) -> bool {
        self.color_picker_open
    }

    pub fn pending_prompt(&self) -> Option<&PromptRequest> {
        self.prompt.as_ref().map(|p| &p.request)
    }

    /// Preview markup for the current draft.
    pub fn preview_html(&self) -> String {
        render_preview(&self.draft.title, &self.draft.tags, &self.draft.content)
    }

    // === Draft fields ===

    pub fn set_title(&mut self, title: &str) {
        self.draft.title.clear();
        self.draft.title.push_str(title);
    }

    pub fn set_tags(&mut self, tags: &str) {
        self.draft.tags.clear();
        self.draft.tags.push_str(tags);
    }

    // === Editing ===

    /// Selection read back from the editable surface.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        tracing::debug!(?selection, "selection synced from surface");
        self.document.set_selection(selection);
    }

    /// Keyboard and clipboard edits. Ignored while previewing.
    pub fn apply_action(&mut self, action: &EditorAction) -> bool {
        if self.preview_active {
            return false;
        }
        let changed = execute_action(&mut self.document, action);
        self.sync_content();
        changed
    }

    // === Composition ===

    pub fn is_composing(&self) -> bool {
        self.composition.is_some()
    }

    /// Start tracking a composition at the current selection.
    pub fn begin_composition(&mut self) {
        if self.preview_active {
            return;
        }
        let range = current_range(&self.document);
        tracing::debug!(?range, "composition started");
        self.composition = Some(Composition {
            range,
            placed: false,
        });
    }

    /// The browser's first composition update names the text it replaces,
    /// which may be a word around the caret rather than the selection.
    /// Later updates are measured against DOM text the model never saw and
    /// are ignored.
    pub fn place_composition(&mut self, target: Range) {
        if let Some(composition) = self.composition.as_mut().filter(|c| !c.placed) {
            composition.range = target;
            composition.placed = true;
        }
    }

    /// Commit the composed text. Returns whether the document changed.
    pub fn end_composition(&mut self, text: &str) -> bool {
        let Some(composition) = self.composition.take() else {
            return false;
        };
        tracing::debug!(range = ?composition.range, text, "composition ended");
        if text.is_empty() {
            return false;
        }
        self.apply_action(&EditorAction::Insert {
            text: text.to_owned(),
            range: composition.range,
        })
    }

    /// Drop a composition without committing it.
    pub fn cancel_composition(&mut self) -> bool {
        self.composition.take().is_some()
    }

    pub fn execute(&mut self, cmd: &FormatCommand) -> Result<CommandOutcome, EditorError> {
        if self.preview_active {
            return Err(EditorError::PreviewActive);
        }
        let outcome = execute_command(&mut self.document, cmd);
        self.sync_content();
        Ok(outcome)
    }

    /// Parse and execute a symbolic command such as `("formatBlock", Some("h2"))`.
    pub fn execute_named(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<CommandOutcome, EditorError> {
        let cmd = FormatCommand::parse(name, value).inspect_err(|err| {
            tracing::warn!(command = name, value, %err, "rejected command");
        })?;
        self.execute(&cmd)
    }

    // === View flags ===

    /// Flip between editing and preview. Draft fields are untouched.
    pub fn toggle_preview(&mut self) -> bool {
        self.preview_active = !self.preview_active;
        self.color_picker_open = false;
        self.composition = None;
        self.preview_active
    }

    pub fn toggle_color_picker(&mut self) {
        self.color_picker_open = !self.color_picker_open;
    }

    pub fn close_color_picker(&mut self) {
        self.color_picker_open = false;
    }

    /// Apply one `foreColor` and hide the picker.
    pub fn pick_color(&mut self, color: Color) -> Result<CommandOutcome, EditorError> {
        self.color_picker_open = false;
        self.execute(&FormatCommand::ForeColor(color))
    }

    // === Prompts ===

    /// Capture the current selection and open a prompt. A prompt that was
    /// already open is cancelled.
    pub fn open_prompt(&mut self, kind: PromptKind) -> PromptTicket {
        let selection = self
            .document
            .selection()
            .unwrap_or_else(|| Selection::collapsed(self.document.cursor_offset()));
        let request = PromptRequest {
            kind,
            captured: CapturedSelection {
                selection,
                text: self.document.selected_text(),
            },
        };
        let (pending, ticket) = prompt_channel(request);
        if let Some(previous) = self.prompt.replace(pending) {
            previous.resolve(None);
        }
        ticket
    }

    /// Resolve the open prompt. Returns false if none was open.
    pub fn answer_prompt(&mut self, answer: Option<String>) -> bool {
        match self.prompt.take() {
            Some(pending) => {
                pending.resolve(answer);
                true
            }
            None => false,
        }
    }

    /// Apply a resolved prompt. Empty or missing answers change nothing.
    pub fn complete_prompt(
        &mut self,
        request: PromptRequest,
        answer: Option<String>,
    ) -> Result<PromptOutcome, EditorError> {
        let Some(url) = answer.as_deref().map(str::trim).filter(|s| !s.is_empty()) else {
            tracing::debug!(kind = ?request.kind, "prompt cancelled");
            return Ok(PromptOutcome::Cancelled);
        };
        if self.preview_active {
            return Err(EditorError::PreviewActive);
        }
        let cmd = FormatCommand::parse(request.kind.command_name(), Some(url)).inspect_err(
            |err| tracing::warn!(kind = ?request.kind, url, %err, "rejected prompt value"),
        )?;
        self.document.set_selection(Some(request.captured.selection));
        self.execute(&cmd).map(PromptOutcome::Applied)
    }

    // === Posts ===

    pub fn save(&mut self) -> &Post {
        self.save_at(Utc::now())
    }

    pub fn publish(&mut self) -> &Post {
        self.publish_at(Utc::now())
    }

    pub fn save_at(&mut self, now: DateTime<Utc>) -> &Post {
        self.store(PostStatus::Saved, now)
    }

    pub fn publish_at(&mut self, now: DateTime<Utc>) -> &Post {
        self.store(PostStatus::Published, now)
    }

    fn store(&mut self, status: PostStatus, now: DateTime<Utc>) -> &Post {
        self.sync_content();
        self.posts.create(
            &self.draft.title,
            &self.draft.tags,
            &self.draft.content,
            status,
            now,
        )
    }

    /// Re-serialize the content snapshot if the document changed.
    fn sync_content(&mut self) {
        let revision = self.document.revision();
        if revision == self.synced_revision {
            return;
        }
        self.synced_revision = revision;
        self.draft.content = self.document.to_html();
    }
}
