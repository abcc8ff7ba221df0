use std::io::{Cursor, Write};

use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::ArchiveError;
use crate::domain::models::{ProjectFileSet, MANIFEST_FILE_NAME};

/// Download name for the repaired archive, e.g. `app.zip` → `app-fixed.zip`.
pub fn fixed_archive_name(original: &str) -> String {
    let file_name = original.rsplit(['/', '\\']).next().unwrap_or(original);
    let stem = file_name
        .strip_suffix(".zip")
        .or_else(|| file_name.strip_suffix(".ZIP"))
        .unwrap_or(file_name);
    let stem = if stem.is_empty() { "project" } else { stem };
    format!("{stem}-fixed.zip")
}

/// Zip `files` with `manifest` stored as `render.yaml`.
///
/// The manifest replaces any `render.yaml` already in the set.
pub fn write_archive(files: &ProjectFileSet, manifest: &str) -> Result<Vec<u8>, ArchiveError> {
    let output = files.with_file(MANIFEST_FILE_NAME, manifest);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in output.iter() {
        zip.start_file(path, options)
            .map_err(|e| ArchiveError::Write(format!("{path}: {e}")))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| ArchiveError::Write(format!("{path}: {e}")))?;
    }

    let bytes = zip
        .finish()
        .map_err(|e| ArchiveError::Write(e.to_string()))?
        .into_inner();

    info!(files = output.len(), bytes = bytes.len(), "fixed archive written");
    Ok(bytes)
}
