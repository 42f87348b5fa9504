//! Chronological ordering of report actions.
//!
//! Ties on `created` are broken the way every client orders a thread, so
//! that all devices agree on the order:
//! 1. `CREATED` before any other action type
//! 2. `REPORTPREVIEW` after any other action type
//! 3. `reportActionID` as the final criterion

use std::cmp::Ordering;

use crate::model::message::{ActionName, Message};

/// Compare two actions oldest-first.
pub fn compare_actions(first: &Message, second: &Message) -> Ordering {
    if first.created != second.created {
        return first.created.cmp(&second.created);
    }

    if first.action_name != second.action_name {
        if first.action_name == ActionName::Created {
            return Ordering::Less;
        }
        if second.action_name == ActionName::Created {
            return Ordering::Greater;
        }
        if first.action_name == ActionName::ReportPreview {
            return Ordering::Greater;
        }
        if second.action_name == ActionName::ReportPreview {
            return Ordering::Less;
        }
    }

    first.id.cmp(&second.id)
}

/// Sort actions oldest-first. The sort is stable.
pub fn sort_chronologically<'a, I>(actions: I) -> Vec<&'a Message>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut sorted: Vec<&Message> = actions.into_iter().collect();
    sorted.sort_by(|a, b| compare_actions(a, b));
    sorted
}
