use wasm_bindgen::prelude::*;
use comment_threads_core::{Command, CommandKind, CommentController, CommentId, CommentRef, CommentReply, Range, ThreadId};

#[wasm_bindgen]
pub struct Comments {
    core: CommentController,
}

#[wasm_bindgen]
impl Comments {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Comments {
        Comments { core: CommentController::default() }
    }

    pub fn from_config(json: String) -> Comments {
        let core = CommentController::from_config_json(&json).unwrap_or_default();
        Comments { core }
    }

    pub fn id(&self) -> String { self.core.id().to_string() }
    pub fn label(&self) -> String { self.core.label().to_string() }
    pub fn to_json(&self) -> String { self.core.to_json() }

    /// Returns the new thread id, or 0 when there was nothing to anchor to.
    pub fn create_thread(&mut self, uri: Option<String>, selection_json: Option<String>) -> u64 {
        let selection = selection_json.and_then(|s| serde_json::from_str::<Range>(&s).ok());
        self.core.create_thread(uri.as_deref(), selection).map(ThreadId::get).unwrap_or(0)
    }

    pub fn remove_thread(&mut self, thread: Option<u64>) { self.core.remove_thread(thread.map(ThreadId::from)) }

    /// Returns the new comment id, or 0 when the thread is gone.
    pub fn reply(&mut self, thread: Option<u64>, text: String) -> u64 {
        let reply = thread.map(|t| CommentReply { thread: ThreadId::from(t), text });
        self.core.reply(reply).map(|r| r.comment.get()).unwrap_or(0)
    }

    pub fn start_edit(&mut self, thread: u64, comment: Option<u64>) { self.core.start_edit(comment_ref(thread, comment)) }
    pub fn apply_edit(&mut self, thread: u64, comment: Option<u64>) { self.core.apply_edit(comment_ref(thread, comment)) }
    pub fn cancel_edit(&mut self, thread: u64, comment: Option<u64>) { self.core.cancel_edit(comment_ref(thread, comment)) }
    pub fn remove_comment(&mut self, thread: u64, comment: Option<u64>) { self.core.remove_comment(comment_ref(thread, comment)) }
    pub fn set_body(&mut self, thread: u64, comment: Option<u64>, body: String) { self.core.set_body(comment_ref(thread, comment), body) }

    /// Runs a comment command by its id, e.g. `start.edit.comment`.
    /// Unknown ids are ignored.
    pub fn run(&mut self, command_id: &str, thread: Option<u64>, comment: Option<u64>) {
        let Some(kind) = CommandKind::from_id(command_id) else { return };
        let target = thread.and_then(|t| comment_ref(t, comment));
        let command = match kind {
            CommandKind::RemoveThread => Command::RemoveThread(thread.map(ThreadId::from)),
            CommandKind::StartEdit => Command::StartEdit(target),
            CommandKind::ApplyEdit => Command::ApplyEdit(target),
            CommandKind::CancelEdit => Command::CancelEdit(target),
            CommandKind::RemoveComment => Command::RemoveComment(target),
            // These carry a document, selection or text; use the dedicated methods.
            CommandKind::CreateThread | CommandKind::ReplyToThread => return,
        };
        self.core.dispatch(command);
    }
}

impl Default for Comments {
    fn default() -> Self { Self::new() }
}

fn comment_ref(thread: u64, comment: Option<u64>) -> Option<CommentRef> {
    comment.map(|c| CommentRef { thread: ThreadId::from(thread), comment: CommentId::from(c) })
}
