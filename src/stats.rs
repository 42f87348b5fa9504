//! Thread summary statistics.

use crate::error::Result;
use crate::model::attachment::Attachment;
use crate::model::thread::Thread;
use crate::thread::policy::ThreadPolicy;
use crate::thread::sort::sort_chronologically;

/// Counts describing one thread and its extracted attachments.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ThreadStats {
    pub actions: usize,
    pub visible_actions: usize,
    pub money_requests: usize,
    pub attachments: usize,
    pub images: usize,
    pub videos: usize,
    pub flagged: usize,
}

/// Summarize a thread given its already-extracted attachments.
///
/// Visibility is evaluated over the same working list the extractor uses,
/// so position hints line up.
pub fn thread_stats<P>(thread: &Thread, attachments: &[Attachment], policy: &P) -> Result<ThreadStats>
where
    P: ThreadPolicy + ?Sized,
{
    let working: Vec<_> = thread
        .parent_report_action
        .iter()
        .chain(sort_chronologically(thread.report_actions.values()))
        .collect();

    let mut stats = ThreadStats {
        actions: working.len(),
        ..ThreadStats::default()
    };

    for (position, action) in working.iter().enumerate() {
        if policy.is_visible(action, position)? {
            stats.visible_actions += 1;
        }
        if policy.is_money_request(action)? {
            stats.money_requests += 1;
        }
    }

    stats.attachments = attachments.len();
    stats.videos = attachments.iter().filter(|a| a.is_video()).count();
    stats.images = stats.attachments - stats.videos;
    stats.flagged = attachments.iter().filter(|a| a.has_been_flagged).count();

    Ok(stats)
}
