//! Attachment extraction: builds the media carousel list for a thread.

pub mod filename;
pub mod scanner;
pub mod url;

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::Result;
use crate::model::attachment::Attachment;
use crate::model::message::Message;
use crate::model::thread::Thread;
use crate::thread::policy::ThreadPolicy;
use crate::thread::sort::sort_chronologically;

use self::scanner::{MediaScanner, ScanContext};
use self::url::ApiRoot;

/// Extract every image and video attachment of a thread, oldest first.
///
/// The working list is the parent action (if any) followed by the thread's
/// actions in chronological order. Actions the policy hides, and money
/// requests, contribute nothing. Within one action, attachments keep the
/// document order of their tags.
///
/// Policy errors are propagated; malformed HTML is not an error.
pub fn extract_attachments<P>(
    parent: Option<&Message>,
    actions: &HashMap<String, Message>,
    policy: &P,
    resolver: &ApiRoot,
) -> Result<Vec<Attachment>>
where
    P: ThreadPolicy + ?Sized,
{
    let working: Vec<&Message> = parent
        .into_iter()
        .chain(sort_chronologically(actions.values()))
        .collect();

    let mut scanner = MediaScanner::new(resolver);
    let mut scanned = 0usize;

    for (position, action) in working.iter().enumerate() {
        if !policy.is_visible(action, position)? || policy.is_money_request(action)? {
            trace!(
                report_action_id = %action.id,
                action_name = action.action_name.as_str(),
                "Skipping action"
            );
            continue;
        }

        scanner.feed(
            ScanContext {
                report_action_id: &action.id,
                has_been_flagged: action.has_been_flagged(),
            },
            action.html(),
        );
        scanned += 1;
    }

    let attachments = scanner.finish();
    debug!(
        actions = working.len(),
        scanned = scanned,
        attachments = attachments.len(),
        "Extracted thread attachments"
    );
    Ok(attachments)
}

/// [`extract_attachments`] over a loaded [`Thread`].
pub fn extract_thread<P>(thread: &Thread, policy: &P, resolver: &ApiRoot) -> Result<Vec<Attachment>>
where
    P: ThreadPolicy + ?Sized,
{
    extract_attachments(
        thread.parent_report_action.as_ref(),
        &thread.report_actions,
        policy,
        resolver,
    )
}
