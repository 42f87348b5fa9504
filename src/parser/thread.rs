//! Loader for thread documents (JSON).
//!
//! ```json
//! {
//!   "parentReportAction": { "reportActionID": "1", ... },
//!   "reportActions": { "2": { "reportActionID": "2", ... } }
//! }
//! ```

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, ThreadMediaError};
use crate::model::thread::Thread;

/// Read and decode a thread document from disk.
pub fn load_thread(path: impl AsRef<Path>) -> Result<Thread> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ThreadMediaError::FileNotFound(path.to_path_buf())
        } else {
            ThreadMediaError::io(path, e)
        }
    })?;

    let thread = decode(&data).map_err(|e| ThreadMediaError::InvalidThread {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(
        path = %path.display(),
        actions = thread.len(),
        "Loaded thread"
    );
    Ok(thread)
}

/// Decode a thread document held in memory.
pub fn parse_thread(json: &str) -> Result<Thread> {
    decode(json).map_err(|e| ThreadMediaError::invalid_inline(e.to_string()))
}

fn decode(json: &str) -> serde_json::Result<Thread> {
    let thread: Thread = serde_json::from_str(json)?;
    for (key, action) in &thread.report_actions {
        if key != &action.id {
            warn!(
                key = %key,
                report_action_id = %action.id,
                "Action map key does not match its reportActionID"
            );
        }
    }
    Ok(thread)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_thread_with_parent() {
        let json = r#"{
            "parentReportAction": {"reportActionID": "p", "created": "2024-01-01 00:00:00.000"},
            "reportActions": {
                "a": {"reportActionID": "a", "created": "2024-01-01 00:01:00.000"},
                "b": {"reportActionID": "b", "created": "2024-01-01 00:02:00.000"}
            }
        }"#;
        let thread = parse_thread(json).unwrap();
        assert_eq!(thread.len(), 3);
        assert_eq!(thread.parent_report_action.unwrap().id, "p");
    }

    #[test]
    fn test_parse_thread_empty_object() {
        let thread = parse_thread("{}").unwrap();
        assert!(thread.is_empty());
    }

    #[test]
    fn test_parse_thread_invalid_json() {
        let err = parse_thread("{\"reportActions\": [").unwrap_err();
        assert!(matches!(err, ThreadMediaError::InvalidThread { .. }));
    }

    #[test]
    fn test_parse_thread_bad_timestamp() {
        let json = r#"{"reportActions": {"a": {"reportActionID": "a", "created": "soon"}}}"#;
        let err = parse_thread(json).unwrap_err();
        assert!(err.to_string().contains("soon"));
    }

    #[test]
    fn test_load_thread_missing_file() {
        let err = load_thread("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ThreadMediaError::FileNotFound(_)));
    }
}
