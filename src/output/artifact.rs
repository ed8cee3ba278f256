use std::path::Path;

use crate::error::AppResult;

const SEPARATOR_LEN: usize = 40;

/// Writes a transcript artifact: four header lines (source file, model,
/// timestamp, separator), a blank line, then the body verbatim. An existing
/// artifact at `path` is overwritten silently. On a failed write the partial
/// file is removed so no half-artifact survives.
pub fn write_transcript(
    path: &Path,
    source_name: &str,
    model: &str,
    generated_at: &str,
    body: &str,
) -> AppResult<()> {
    let mut artifact = String::with_capacity(body.len() + 128);
    artifact.push_str(&format!("File: {source_name}\n"));
    artifact.push_str(&format!("Model: {model}\n"));
    artifact.push_str(&format!("Timestamp: {generated_at}\n"));
    artifact.push_str(&"-".repeat(SEPARATOR_LEN));
    artifact.push_str("\n\n");
    artifact.push_str(body);

    if let Err(error) = std::fs::write(path, artifact) {
        let _ = std::fs::remove_file(path);
        return Err(error.into());
    }
    Ok(())
}
