//! User-triggered actions. Each carries at most one domain object, and that
//! object may be absent.

use serde::{Deserialize, Serialize};

use crate::error::CommentRef;
use crate::selection::Range;
use crate::thread::ThreadId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    CreateThread,
    RemoveThread,
    ReplyToThread,
    StartEdit,
    ApplyEdit,
    CancelEdit,
    RemoveComment,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        CommandKind::CreateThread,
        CommandKind::RemoveThread,
        CommandKind::ReplyToThread,
        CommandKind::StartEdit,
        CommandKind::ApplyEdit,
        CommandKind::CancelEdit,
        CommandKind::RemoveComment,
    ];

    /// Identifier the host binds keys and menus to.
    pub fn id(self) -> &'static str {
        match self {
            CommandKind::CreateThread => "create.commentThread",
            CommandKind::RemoveThread => "remove.commentThread",
            CommandKind::ReplyToThread => "reply.commentThread",
            CommandKind::StartEdit => "start.edit.comment",
            CommandKind::ApplyEdit => "apply.edit.comment",
            CommandKind::CancelEdit => "cancel.edit.comment",
            CommandKind::RemoveComment => "remove.comment",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReply {
    pub thread: ThreadId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateThread { uri: Option<String>, selection: Option<Range> },
    RemoveThread(Option<ThreadId>),
    Reply(Option<CommentReply>),
    StartEdit(Option<CommentRef>),
    ApplyEdit(Option<CommentRef>),
    CancelEdit(Option<CommentRef>),
    RemoveComment(Option<CommentRef>),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::CreateThread { .. } => CommandKind::CreateThread,
            Command::RemoveThread(_) => CommandKind::RemoveThread,
            Command::Reply(_) => CommandKind::ReplyToThread,
            Command::StartEdit(_) => CommandKind::StartEdit,
            Command::ApplyEdit(_) => CommandKind::ApplyEdit,
            Command::CancelEdit(_) => CommandKind::CancelEdit,
            Command::RemoveComment(_) => CommandKind::RemoveComment,
        }
    }

    pub fn id(&self) -> &'static str {
        self.kind().id()
    }
}
