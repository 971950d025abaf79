//! Comment threads anchored to a document range.
//!
//! Every mutation of a thread's comments ends in exactly one call to
//! [`CommentThread::set_comments`], which stores the sequence and invokes the
//! registered redraw hook. The hook fires even when the sequence is unchanged;
//! it is how the host learns a redraw is due.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::comments::{Comment, CommentAuthor, CommentBody, CommentId, ThreadComment};
use crate::error::{CommentError, CommentRef, Target};
use crate::selection::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreadId(u64);

impl ThreadId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ThreadId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "thread-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollapsibleState {
    Collapsed,
    #[default]
    Expanded,
}

/// Called with the thread id and its freshly assigned comments.
pub type RedrawHook = Rc<dyn Fn(ThreadId, &[Comment])>;

#[derive(Serialize)]
pub struct CommentThread {
    id: ThreadId,
    pub uri: String,
    pub range: Range,
    pub collapsible_state: CollapsibleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    comments: Vec<Comment>,
    #[serde(skip)]
    redraw: Option<RedrawHook>,
}

impl fmt::Debug for CommentThread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommentThread")
            .field("id", &self.id)
            .field("uri", &self.uri)
            .field("range", &self.range)
            .field("collapsible_state", &self.collapsible_state)
            .field("label", &self.label)
            .field("comments", &self.comments)
            .field("redraw", &self.redraw.is_some())
            .finish()
    }
}

impl CommentThread {
    /// Threads start out empty; replies populate them.
    pub fn new(id: ThreadId, uri: impl Into<String>, range: Range) -> Self {
        Self {
            id,
            uri: uri.into(),
            range,
            collapsible_state: CollapsibleState::default(),
            label: None,
            comments: Vec::new(),
            redraw: None,
        }
    }

    pub fn id(&self) -> ThreadId {
        self.id
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn comment(&self, id: CommentId) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id() == id)
    }

    pub fn on_redraw(&mut self, hook: RedrawHook) {
        self.redraw = Some(hook);
    }

    /// Stores `comments` and notifies the host.
    pub fn set_comments(&mut self, comments: Vec<Comment>) {
        self.comments = comments;
        if let Some(redraw) = &self.redraw {
            redraw(self.id, &self.comments);
        }
    }

    /// Reassigns the current sequence to itself.
    fn refresh(&mut self) {
        let comments = std::mem::take(&mut self.comments);
        self.set_comments(comments);
    }

    fn comment_mut(&mut self, id: CommentId) -> Result<&mut Comment, CommentError> {
        let thread = self.id;
        self.comments
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or(CommentError::MissingTarget(Target::Comment(Some(CommentRef { thread, comment: id }))))
    }

    /// Appends a new comment in preview mode and returns its id.
    pub fn reply(&mut self, author: CommentAuthor, text: impl Into<CommentBody>) -> CommentId {
        let comment = Comment::new(self.id, author, text);
        let id = comment.id();
        trace!(thread = %self.id, comment = %id, "reply");
        let mut comments = std::mem::take(&mut self.comments);
        comments.push(comment);
        self.set_comments(comments);
        id
    }

    pub fn start_edit(&mut self, id: CommentId) -> Result<(), CommentError> {
        self.comment_mut(id)?.start_edit();
        self.refresh();
        Ok(())
    }

    pub fn apply_edit(&mut self, id: CommentId) -> Result<(), CommentError> {
        self.comment_mut(id)?.apply_edit();
        self.refresh();
        Ok(())
    }

    pub fn cancel_edit(&mut self, id: CommentId) -> Result<(), CommentError> {
        self.comment_mut(id)?.cancel_edit();
        self.refresh();
        Ok(())
    }

    /// Written by the host's editing widget. Not a render signal: the widget
    /// is already showing the text.
    pub fn set_body(&mut self, id: CommentId, body: impl Into<CommentBody>) -> Result<(), CommentError> {
        self.comment_mut(id)?.body = body.into();
        Ok(())
    }

    /// Filters the comment out by identity. Removing an absent comment leaves
    /// the sequence as is but still reassigns it.
    pub fn remove_comment(&mut self, id: CommentId) {
        let comments: Vec<Comment> = std::mem::take(&mut self.comments)
            .into_iter()
            .filter(|c| c.id() != id)
            .collect();
        trace!(thread = %self.id, comment = %id, remaining = comments.len(), "comment removed");
        self.set_comments(comments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comments::CommentMode;
    use crate::selection::Position;
    use std::cell::RefCell;

    fn thread() -> CommentThread {
        let range = Range::new(Position::new(0, 0), Position::new(0, 5));
        CommentThread::new(ThreadId::from(7), "file:///a.txt", range)
    }

    fn recorder(t: &mut CommentThread) -> Rc<RefCell<Vec<Vec<CommentId>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        t.on_redraw(Rc::new(move |_: ThreadId, comments: &[Comment]| {
            sink.borrow_mut().push(comments.iter().map(|c| c.id()).collect());
        }));
        log
    }

    fn anon() -> CommentAuthor {
        CommentAuthor::new("Anonymous")
    }

    #[test]
    fn reply_appends_in_order() {
        let mut t = thread();
        let c1 = t.reply(anon(), "one");
        let c2 = t.reply(anon(), "two");
        let c3 = t.reply(anon(), "hi");
        let ids: Vec<_> = t.comments().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![c1, c2, c3]);
        let last = t.comment(c3).unwrap();
        assert_eq!(last.body().as_str(), "hi");
        assert_eq!(last.mode(), CommentMode::Preview);
        assert_eq!(last.thread(), t.id());
    }

    #[test]
    fn every_operation_redraws_once() {
        let mut t = thread();
        let log = recorder(&mut t);
        let c = t.reply(anon(), "x");
        t.start_edit(c).unwrap();
        t.set_body(c, "y").unwrap();
        t.apply_edit(c).unwrap();
        t.start_edit(c).unwrap();
        t.cancel_edit(c).unwrap();
        t.remove_comment(c);
        assert_eq!(log.borrow().len(), 6);
        assert!(log.borrow().last().unwrap().is_empty());
    }

    #[test]
    fn redraw_sees_state_after_mutation() {
        let mut t = thread();
        let c = t.reply(anon(), "x");
        let modes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&modes);
        t.on_redraw(Rc::new(move |_: ThreadId, comments: &[Comment]| {
            sink.borrow_mut().push(comments[0].mode());
        }));
        t.start_edit(c).unwrap();
        t.apply_edit(c).unwrap();
        assert_eq!(*modes.borrow(), vec![CommentMode::Editing, CommentMode::Preview]);
    }

    #[test]
    fn remove_is_by_identity() {
        let mut t = thread();
        let a = t.reply(anon(), "same");
        let b = t.reply(anon(), "same");
        t.remove_comment(a);
        let ids: Vec<_> = t.comments().iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec![b]);
    }

    #[test]
    fn remove_twice_is_idempotent_and_still_redraws() {
        let mut t = thread();
        let a = t.reply(anon(), "a");
        let b = t.reply(anon(), "b");
        let log = recorder(&mut t);
        t.remove_comment(a);
        let after_first: Vec<_> = t.comments().iter().map(|c| c.id()).collect();
        t.remove_comment(a);
        let after_second: Vec<_> = t.comments().iter().map(|c| c.id()).collect();
        assert_eq!(after_first, vec![b]);
        assert_eq!(after_first, after_second);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn remove_on_empty_thread_is_fine() {
        let mut t = thread();
        t.remove_comment(CommentId::from(u64::MAX));
        assert!(t.comments().is_empty());
    }

    #[test]
    fn edit_of_unknown_comment_is_missing_target() {
        let mut t = thread();
        let log = recorder(&mut t);
        let err = t.start_edit(CommentId::from(u64::MAX)).unwrap_err();
        assert!(matches!(err, CommentError::MissingTarget(Target::Comment(_))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn set_comments_redraws_even_when_equal() {
        let mut t = thread();
        t.reply(anon(), "a");
        let log = recorder(&mut t);
        let same = t.comments().to_vec();
        t.set_comments(same);
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(t.comments().len(), 1);
    }
}
