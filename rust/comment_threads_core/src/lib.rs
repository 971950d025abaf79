pub mod selection;
pub mod comments;
pub mod thread;
pub mod commands;
pub mod config;
pub mod error;

use std::rc::Rc;

use tracing::debug;

pub use commands::{Command, CommandKind, CommentReply};
pub use comments::{Comment, CommentAuthor, CommentBody, CommentId, CommentMode, CommentReaction, MarkdownString, ThreadComment};
pub use config::ControllerConfig;
pub use error::{CommentError, CommentRef, Target};
pub use selection::{Position, Range};
pub use thread::{CollapsibleState, CommentThread, RedrawHook, ThreadId};

/// Owns the comment threads of an open session and runs the user commands
/// against them. A command whose target is absent does nothing.
#[derive(Debug, Default)]
pub struct CommentController {
    pub config: ControllerConfig,
    threads: Vec<CommentThread>,
    next_thread: u64,
    redraw: Option<SharedHook>,
}

struct SharedHook(RedrawHook);

impl std::fmt::Debug for SharedHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RedrawHook")
    }
}

impl CommentController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn from_config_json(json: &str) -> Result<Self, CommentError> {
        Ok(Self::new(ControllerConfig::from_json(json)?))
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Installs the host's redraw hook on every current and future thread.
    pub fn set_redraw_hook(&mut self, hook: RedrawHook) {
        for thread in &mut self.threads {
            thread.on_redraw(Rc::clone(&hook));
        }
        self.redraw = Some(SharedHook(hook));
    }

    pub fn threads(&self) -> &[CommentThread] {
        &self.threads
    }

    pub fn thread(&self, id: ThreadId) -> Option<&CommentThread> {
        self.threads.iter().find(|t| t.id() == id)
    }

    pub fn thread_mut(&mut self, id: ThreadId) -> Result<&mut CommentThread, CommentError> {
        self.threads
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(CommentError::MissingTarget(Target::Thread(Some(id))))
    }

    pub fn comment(&self, r: CommentRef) -> Option<&Comment> {
        self.thread(r.thread)?.comment(r.comment)
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::CreateThread { uri, selection } => {
                self.create_thread(uri.as_deref(), selection);
            }
            Command::RemoveThread(thread) => self.remove_thread(thread),
            Command::Reply(reply) => {
                self.reply(reply);
            }
            Command::StartEdit(r) => self.start_edit(r),
            Command::ApplyEdit(r) => self.apply_edit(r),
            Command::CancelEdit(r) => self.cancel_edit(r),
            Command::RemoveComment(r) => self.remove_comment(r),
        }
    }

    /// Anchors an empty thread to the active selection of `uri`.
    pub fn create_thread(&mut self, uri: Option<&str>, selection: Option<Range>) -> Option<ThreadId> {
        self.try_create_thread(uri, selection).ok()
    }

    fn try_create_thread(&mut self, uri: Option<&str>, selection: Option<Range>) -> Result<ThreadId, CommentError> {
        let uri = uri.ok_or(CommentError::MissingTarget(Target::Document))?;
        let mut range = selection.ok_or(CommentError::MissingTarget(Target::Selection))?;
        range.normalize();

        self.next_thread += 1;
        let id = ThreadId::from(self.next_thread);
        let mut thread = CommentThread::new(id, uri, range);
        thread.collapsible_state = self.config.initial_state();
        if let Some(SharedHook(hook)) = &self.redraw {
            thread.on_redraw(Rc::clone(hook));
        }
        debug!(thread = %id, uri, "thread created");
        self.threads.push(thread);
        Ok(id)
    }

    /// Disposes the thread and everything in it.
    pub fn remove_thread(&mut self, thread: Option<ThreadId>) {
        let Some(id) = thread else { return };
        let before = self.threads.len();
        self.threads.retain(|t| t.id() != id);
        if self.threads.len() != before {
            debug!(thread = %id, "thread disposed");
        }
    }

    /// Appends a comment by the configured default author.
    pub fn reply(&mut self, reply: Option<CommentReply>) -> Option<CommentRef> {
        let CommentReply { thread, text } = reply?;
        let author = CommentAuthor::new(self.config.default_author.clone());
        let comment = self.thread_mut(thread).ok()?.reply(author, text);
        Some(CommentRef { thread, comment })
    }

    pub fn start_edit(&mut self, comment: Option<CommentRef>) {
        let _ = self.with_comment(comment, CommentThread::start_edit);
    }

    pub fn apply_edit(&mut self, comment: Option<CommentRef>) {
        let _ = self.with_comment(comment, CommentThread::apply_edit);
    }

    pub fn cancel_edit(&mut self, comment: Option<CommentRef>) {
        let _ = self.with_comment(comment, CommentThread::cancel_edit);
    }

    pub fn remove_comment(&mut self, comment: Option<CommentRef>) {
        let _ = self.with_comment(comment, |thread, id| {
            thread.remove_comment(id);
            Ok(())
        });
    }

    /// Host editing widget writing into the comment body.
    pub fn set_body(&mut self, comment: Option<CommentRef>, body: impl Into<CommentBody>) {
        let body = body.into();
        let _ = self.with_comment(comment, move |thread, id| thread.set_body(id, body));
    }

    fn with_comment<F>(&mut self, comment: Option<CommentRef>, op: F) -> Result<(), CommentError>
    where
        F: FnOnce(&mut CommentThread, CommentId) -> Result<(), CommentError>,
    {
        let r = comment.ok_or(CommentError::MissingTarget(Target::Comment(None)))?;
        op(self.thread_mut(r.thread)?, r.comment)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.threads).unwrap_or_else(|_| "[]".to_string())
    }
}
