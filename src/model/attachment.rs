//! Attachment descriptors for the media carousel.
//!
//! These are derived values: recomputed from the thread on every
//! extraction, never persisted.

/// Media type of an extracted attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Display file information.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AttachmentFile {
    pub name: String,
}

/// A media reference extracted from a message body.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub kind: AttachmentKind,

    /// Resolved URL of the media resource.
    pub source: String,

    /// `true` when the resource must be fetched with the user's auth token.
    pub is_auth_token_required: bool,

    pub file: AttachmentFile,

    /// Length in seconds. Only present for videos; NaN when the duration
    /// attribute is missing or not a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Always `false` here. Receipts reach the carousel through another path.
    pub is_receipt: bool,

    /// Owning message is hidden (or pending hide) by moderation.
    pub has_been_flagged: bool,

    /// Originating message. Set for images only.
    #[serde(
        default,
        rename = "reportActionID",
        skip_serializing_if = "Option::is_none"
    )]
    pub report_action_id: Option<String>,
}

impl Attachment {
    pub fn is_video(&self) -> bool {
        self.kind == AttachmentKind::Video
    }
}
