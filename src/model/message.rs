//! Report actions: the messages that make up a chat thread.

use chrono::{DateTime, Utc};

/// Kind of report action.
///
/// Unknown names deserialize to [`ActionName::Unsupported`], which the
/// default thread policy never shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionName {
    #[default]
    AddComment,
    Created,
    Iou,
    ReportPreview,
    Closed,
    Submitted,
    Approved,
    Reimbursed,
    TaskCompleted,
    TaskReopened,
    TaskCancelled,
    TaskEdited,
    Renamed,
    ModifiedExpense,
    Hold,
    Unhold,
    ChronosOooList,
    ActionableMentionWhisper,
    #[serde(other)]
    Unsupported,
}

impl ActionName {
    /// Wire name as used by the messaging subsystem.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddComment => "ADDCOMMENT",
            Self::Created => "CREATED",
            Self::Iou => "IOU",
            Self::ReportPreview => "REPORTPREVIEW",
            Self::Closed => "CLOSED",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::Reimbursed => "REIMBURSED",
            Self::TaskCompleted => "TASKCOMPLETED",
            Self::TaskReopened => "TASKREOPENED",
            Self::TaskCancelled => "TASKCANCELLED",
            Self::TaskEdited => "TASKEDITED",
            Self::Renamed => "RENAMED",
            Self::ModifiedExpense => "MODIFIEDEXPENSE",
            Self::Hold => "HOLD",
            Self::Unhold => "UNHOLD",
            Self::ChronosOooList => "CHRONOSOOOLIST",
            Self::ActionableMentionWhisper => "ACTIONABLEMENTIONWHISPER",
            Self::Unsupported => "UNSUPPORTED",
        }
    }
}

/// Content moderation state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModerationDecision {
    Pending,
    Approved,
    PendingHide,
    Hidden,
    PendingRemove,
    Removed,
    #[serde(other)]
    Other,
}

impl ModerationDecision {
    /// `true` for decisions that hide the content behind a reveal prompt.
    pub fn is_flagged(&self) -> bool {
        matches!(self, Self::PendingHide | Self::Hidden)
    }
}

/// Wrapper object carrying a moderation decision.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Moderation {
    pub decision: ModerationDecision,
}

/// Optimistic change not yet acknowledged by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PendingAction {
    Add,
    Update,
    Delete,
}

/// One fragment of a report action's message. Only the first one carries
/// the rendered body.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageFragment {
    /// HTML body.
    pub html: String,
    /// Plain-text rendering of the body.
    pub text: String,
    /// Set once the comment has been deleted server-side.
    pub deleted: bool,
    pub is_deleted_parent_action: bool,
    pub is_reversed_transaction: bool,
    pub moderation_decision: Option<Moderation>,
}

/// A single report action in a thread.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique identifier. Also the final sort tie-break.
    #[serde(rename = "reportActionID")]
    pub id: String,

    /// Logical creation time used for chronological ordering.
    #[serde(with = "crate::parser::created")]
    pub created: DateTime<Utc>,

    #[serde(default)]
    pub action_name: ActionName,

    #[serde(default)]
    pub message: Vec<MessageFragment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_action: Option<PendingAction>,

    #[serde(
        default,
        rename = "whisperedToAccountIDs",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub whispered_to_account_ids: Vec<u64>,

    #[serde(default)]
    pub child_visible_action_count: u64,

    /// Legacy ordering key; actions still keyed by it are deprecated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u64>,
}

impl Message {
    /// First message fragment, if any.
    pub fn first_fragment(&self) -> Option<&MessageFragment> {
        self.message.first()
    }

    /// HTML body of the first fragment (empty when there is none).
    pub fn html(&self) -> &str {
        self.first_fragment().map(|f| f.html.as_str()).unwrap_or("")
    }

    pub fn moderation_decision(&self) -> Option<ModerationDecision> {
        self.first_fragment()
            .and_then(|f| f.moderation_decision.as_ref())
            .map(|m| m.decision)
    }

    /// Whether the content is hidden, or about to be, by moderation.
    pub fn has_been_flagged(&self) -> bool {
        self.moderation_decision()
            .is_some_and(|decision| decision.is_flagged())
    }
}
