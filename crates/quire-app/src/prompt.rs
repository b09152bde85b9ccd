//! Asynchronous URL prompts for image and link insertion.
//!
//! Opening a prompt hands the caller a [`PromptTicket`]; the dialog resolves
//! it with the entered text or `None`. A prompt that is dropped unanswered
//! resolves as cancelled.

use quire_editor_core::{CommandOutcome, Selection};
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Image,
    Link,
}

impl PromptKind {
    /// Command issued with the entered URL.
    pub fn command_name(self) -> &'static str {
        match self {
            PromptKind::Image => "insertImage",
            PromptKind::Link => "createLink",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Image => "Insert Image",
            PromptKind::Link => "Insert Link",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Image => "Enter image URL:",
            PromptKind::Link => "Enter URL:",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            PromptKind::Image => "https://example.com/image.png",
            PromptKind::Link => "https://example.com",
        }
    }
}

/// The editor selection as it was when the prompt opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedSelection {
    pub selection: Selection,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub kind: PromptKind,
    pub captured: CapturedSelection,
}

/// Receiving half of an open prompt.
#[derive(Debug)]
pub struct PromptTicket {
    request: PromptRequest,
    receiver: oneshot::Receiver<Option<String>>,
}

impl PromptTicket {
    pub fn request(&self) -> &PromptRequest {
        &self.request
    }

    /// Wait for the dialog. Yields the request back with the answer, `None`
    /// when the prompt was cancelled or abandoned.
    pub async fn wait(self) -> (PromptRequest, Option<String>) {
        let answer = self.receiver.await.ok().flatten();
        (self.request, answer)
    }
}

/// Sending half, held by the application state while the dialog is open.
#[derive(Debug)]
pub(crate) struct PendingPrompt {
    pub(crate) request: PromptRequest,
    responder: oneshot::Sender<Option<String>>,
}

impl PendingPrompt {
    pub(crate) fn resolve(self, answer: Option<String>) {
        // The ticket may already be gone; nothing is waiting then.
        let _ = self.responder.send(answer);
    }
}

pub(crate) fn prompt_channel(request: PromptRequest) -> (PendingPrompt, PromptTicket) {
    let (responder, receiver) = oneshot::channel();
    (
        PendingPrompt {
            request: request.clone(),
            responder,
        },
        PromptTicket { request, receiver },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    Applied(CommandOutcome),
    /// Cancelled or empty input. Nothing was executed.
    Cancelled,
}
