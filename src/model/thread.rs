//! A thread: an optional parent action plus the thread's own actions.

use std::collections::HashMap;

use super::message::Message;

/// Report actions of one thread as stored by the messaging subsystem.
///
/// `report_actions` is keyed by action id; key order carries no meaning.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Thread {
    /// The action this thread was started from, shown above the thread.
    pub parent_report_action: Option<Message>,
    pub report_actions: HashMap<String, Message>,
}

impl Thread {
    /// Total number of actions, parent included.
    pub fn len(&self) -> usize {
        self.report_actions.len() + usize::from(self.parent_report_action.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
