//! Visibility and money-request classification of report actions.

use crate::error::Result;
use crate::model::message::{ActionName, Message, ModerationDecision};

/// Decides which actions of a thread contribute attachments.
///
/// Implementations backed by external lookups may fail; the extractor
/// propagates those errors instead of guessing.
pub trait ThreadPolicy {
    /// Whether `action` is shown in the thread. `position` is the action's
    /// index in the chronological working list.
    fn is_visible(&self, action: &Message, position: usize) -> Result<bool>;

    /// Whether `action` is a money request. Those carry their attachments
    /// (receipts) through a separate path.
    fn is_money_request(&self, action: &Message) -> Result<bool>;
}

/// The visibility rules the chat client applies when rendering a thread.
#[derive(Debug, Clone, Default)]
pub struct DefaultThreadPolicy {
    /// Account of the signed-in user, used to tell whether a whisper is
    /// addressed to them.
    pub current_account_id: Option<u64>,
}

impl DefaultThreadPolicy {
    pub fn new(current_account_id: Option<u64>) -> Self {
        Self { current_account_id }
    }

    fn is_whisper_targeted_to_others(&self, action: &Message) -> bool {
        if action.whispered_to_account_ids.is_empty() {
            return false;
        }
        match self.current_account_id {
            Some(id) => !action.whispered_to_account_ids.contains(&id),
            None => true,
        }
    }
}

impl ThreadPolicy for DefaultThreadPolicy {
    fn is_visible(&self, action: &Message, position: usize) -> Result<bool> {
        if is_deprecated(action, position) {
            return Ok(false);
        }

        if action.action_name == ActionName::Unsupported
            || action.action_name == ActionName::Closed
        {
            return Ok(false);
        }

        if is_pending_remove(action) && action.child_visible_action_count == 0 {
            return Ok(false);
        }

        if self.is_whisper_targeted_to_others(action) {
            return Ok(false);
        }

        Ok(!is_deleted(action)
            || action.pending_action.is_some()
            || is_deleted_parent(action)
            || is_reversed_transaction(action))
    }

    fn is_money_request(&self, action: &Message) -> Result<bool> {
        Ok(action.action_name == ActionName::Iou)
    }
}

/// Actions still keyed by their legacy sequence number.
fn is_deprecated(action: &Message, position: usize) -> bool {
    action.sequence_number == Some(position as u64)
}

fn is_pending_remove(action: &Message) -> bool {
    action.moderation_decision() == Some(ModerationDecision::PendingRemove)
}

/// An action with no body left to show.
pub fn is_deleted(action: &Message) -> bool {
    match action.first_fragment() {
        None => true,
        Some(fragment) => fragment.html.is_empty() || fragment.deleted,
    }
}

/// A deleted action that still anchors a thread with visible replies.
fn is_deleted_parent(action: &Message) -> bool {
    action
        .first_fragment()
        .is_some_and(|f| f.is_deleted_parent_action)
        && action.child_visible_action_count > 0
}

fn is_reversed_transaction(action: &Message) -> bool {
    action
        .first_fragment()
        .is_some_and(|f| f.is_reversed_transaction)
        && action.child_visible_action_count > 0
}
