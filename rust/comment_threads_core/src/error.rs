//! Error types for comment commands.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::comments::CommentId;
use crate::thread::ThreadId;

/// Addresses a comment inside its owning thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentRef {
    pub thread: ThreadId,
    pub comment: CommentId,
}

impl fmt::Display for CommentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.thread, self.comment)
    }
}

/// The domain object an action needed but did not get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Document,
    Selection,
    /// `None` when no thread was passed at all.
    Thread(Option<ThreadId>),
    Comment(Option<CommentRef>),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Document => f.write_str("active document"),
            Target::Selection => f.write_str("active selection"),
            Target::Thread(Some(id)) => write!(f, "{id}"),
            Target::Thread(None) => f.write_str("thread"),
            Target::Comment(Some(r)) => write!(f, "{r}"),
            Target::Comment(None) => f.write_str("comment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum CommentError {
    /// Command entry points turn this into a silent no-op.
    #[error("missing target: {0}")]
    MissingTarget(Target),

    #[error("invalid controller config: {0}")]
    Config(#[from] serde_json::Error),
}

impl CommentError {
    pub fn is_missing_target(&self) -> bool {
        matches!(self, CommentError::MissingTarget(_))
    }
}
