//! Export attachment lists to CSV.
//!
//! Output is UTF-8 with BOM for Excel compatibility.

use std::io::Write;
use std::path::Path;

use crate::model::attachment::Attachment;

/// Export attachments to a CSV file.
///
/// Columns: Kind, Name, Source, Auth_Required, Duration, Flagged, Report_Action_ID
pub fn export_csv(attachments: &[Attachment], output_path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(output_path)?;

    // UTF-8 BOM for Excel
    file.write_all(&[0xEF, 0xBB, 0xBF])?;

    writeln!(
        file,
        "Kind,Name,Source,Auth_Required,Duration,Flagged,Report_Action_ID"
    )?;

    for att in attachments {
        let duration = match att.duration {
            Some(d) if d.is_nan() => "NaN".to_string(),
            Some(d) => d.to_string(),
            None => String::new(),
        };
        let row = format!(
            "{},{},{},{},{},{},{}",
            att.kind.as_str(),
            csv_escape(&att.file.name),
            csv_escape(&att.source),
            att.is_auth_token_required,
            duration,
            att.has_been_flagged,
            csv_escape(att.report_action_id.as_deref().unwrap_or("")),
        );
        writeln!(file, "{row}")?;
    }

    Ok(())
}

/// Escape a value for CSV (RFC 4180).
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
