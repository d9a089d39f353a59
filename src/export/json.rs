//! JSON report rendering.

use std::io::Write;

use anyhow::{Context, Result};

use crate::models::BatchReport;

use super::pipe::IgnoreBrokenPipe;

/// Serializes a report as one newline-terminated JSON document.
///
/// Characters such as `<`, `>` and `&` in response bodies are emitted as-is.
pub fn render_report(report: &BatchReport) -> Result<Vec<u8>, serde_json::Error> {
    let mut rendered = serde_json::to_vec(report)?;
    rendered.push(b'\n');
    Ok(rendered)
}

/// Renders `report` and writes it to `writer` in one piece.
///
/// # Errors
///
/// Returns an error if serialization fails (nothing is written in that case)
/// or if the writer fails with anything other than a broken pipe.
pub fn write_report<W: Write>(report: &BatchReport, writer: W) -> Result<()> {
    let rendered = render_report(report).context("Failed to serialize batch report")?;

    let mut writer = IgnoreBrokenPipe::new(writer);
    writer
        .write_all(&rendered)
        .context("Failed to write batch report")?;
    writer.flush().context("Failed to flush batch report")?;
    Ok(())
}
