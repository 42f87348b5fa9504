//! Export attachment lists as JSON.

use std::path::Path;

use crate::model::attachment::Attachment;

/// Write attachments as a pretty-printed JSON array.
///
/// A NaN video duration is written as `null`.
pub fn export_json(attachments: &[Attachment], output_path: &Path) -> anyhow::Result<()> {
    let file = std::fs::File::create(output_path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, attachments)?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}
