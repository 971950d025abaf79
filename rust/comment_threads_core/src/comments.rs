//! Comments and their display/edit lifecycle.
//!
//! A [`Comment`] is either shown read-only ([`CommentMode::Preview`]) or as an
//! editable field ([`CommentMode::Editing`]). While editing, the last committed
//! body is held aside so the edit can be rolled back. The transitions here
//! only touch the comment itself; the owning [`CommentThread`] wraps them and
//! signals the host to re-render.
//!
//! [`CommentThread`]: crate::thread::CommentThread

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::thread::ThreadId;

static COMMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a comment. Two comments with identical fields are
/// still distinct comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(u64);

impl CommentId {
    fn next() -> Self {
        Self(COMMENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for CommentId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comment-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CommentMode {
    #[default]
    Preview,
    Editing,
}

/// Display identity only; nothing here is verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
}

impl CommentAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), icon_path: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MarkdownString {
    pub value: String,
    #[serde(default)]
    pub is_trusted: bool,
    #[serde(default)]
    pub support_theme_icons: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CommentBody {
    Plain(String),
    Markdown(MarkdownString),
}

impl CommentBody {
    pub fn as_str(&self) -> &str {
        match self {
            CommentBody::Plain(s) => s,
            CommentBody::Markdown(md) => &md.value,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().is_empty()
    }
}

impl Default for CommentBody {
    fn default() -> Self {
        CommentBody::Plain(String::new())
    }
}

impl From<&str> for CommentBody {
    fn from(s: &str) -> Self {
        CommentBody::Plain(s.to_string())
    }
}

impl From<String> for CommentBody {
    fn from(s: String) -> Self {
        CommentBody::Plain(s)
    }
}

impl From<MarkdownString> for CommentBody {
    fn from(md: MarkdownString) -> Self {
        CommentBody::Markdown(md)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReaction {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_path: Option<String>,
    pub count: u32,
    pub author_has_reacted: bool,
}

/// The fields a host needs in order to render a comment.
pub trait ThreadComment {
    fn id(&self) -> CommentId;
    fn author(&self) -> &CommentAuthor;
    fn body(&self) -> &CommentBody;
    fn mode(&self) -> CommentMode;
    fn context_value(&self) -> Option<&str>;
    fn label(&self) -> Option<&str>;
    fn reactions(&self) -> &[CommentReaction];
}

#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    id: CommentId,
    thread: ThreadId,
    pub author: CommentAuthor,
    pub body: CommentBody,
    mode: CommentMode,
    /// Last committed body; `Some` exactly while editing.
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_body: Option<CommentBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<CommentReaction>,
}

impl Comment {
    pub fn new(thread: ThreadId, author: CommentAuthor, body: impl Into<CommentBody>) -> Self {
        Self {
            id: CommentId::next(),
            thread,
            author,
            body: body.into(),
            mode: CommentMode::Preview,
            saved_body: None,
            context_value: None,
            label: None,
            reactions: Vec::new(),
        }
    }

    pub fn with_context_value(mut self, value: impl Into<String>) -> Self {
        self.context_value = Some(value.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Thread this comment belongs to.
    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    pub fn saved_body(&self) -> Option<&CommentBody> {
        self.saved_body.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.mode == CommentMode::Editing
    }

    pub(crate) fn start_edit(&mut self) {
        self.saved_body = Some(self.body.clone());
        self.mode = CommentMode::Editing;
        trace!(comment = %self.id, thread = %self.thread, "comment editing");
    }

    /// Commits whatever the editing widget already wrote into `body`.
    pub(crate) fn apply_edit(&mut self) {
        self.saved_body = None;
        self.mode = CommentMode::Preview;
        trace!(comment = %self.id, thread = %self.thread, "comment edit applied");
    }

    /// Restores the pre-edit body. Outside of editing there is nothing held
    /// aside, so the body is left alone.
    pub(crate) fn cancel_edit(&mut self) {
        if let Some(saved) = self.saved_body.take() {
            self.body = saved;
        }
        self.mode = CommentMode::Preview;
        trace!(comment = %self.id, thread = %self.thread, "comment edit cancelled");
    }
}

impl ThreadComment for Comment {
    fn id(&self) -> CommentId {
        self.id
    }

    fn author(&self) -> &CommentAuthor {
        &self.author
    }

    fn body(&self) -> &CommentBody {
        &self.body
    }

    fn mode(&self) -> CommentMode {
        self.mode
    }

    fn context_value(&self) -> Option<&str> {
        self.context_value.as_deref()
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn reactions(&self) -> &[CommentReaction] {
        &self.reactions
    }
}
