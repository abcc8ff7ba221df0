use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use tracing::{debug, info, warn};
use zip::ZipArchive;

use super::ArchiveError;
use crate::domain::models::ProjectFileSet;
use crate::services::path_sanitizer::sanitize_path;

/// File every uploaded project must contain.
pub const REQUIRED_FILE: &str = ".replit";

const MACOS_METADATA_DIR: &str = "__MACOSX";
const DEPENDENCY_DIR: &str = "node_modules";

/// Turns zip bytes into a [`ProjectFileSet`].
///
/// Directory entries, macOS metadata and `node_modules` are skipped, as are
/// entries that are not UTF-8 text. When every file sits under one top-level
/// directory, that directory is stripped.
#[derive(Debug, Clone, Copy)]
pub struct ArchiveReader {
    require_manifest: bool,
}

impl ArchiveReader {
    /// Reader for uploaded projects; fails without [`REQUIRED_FILE`].
    pub const fn strict() -> Self {
        Self {
            require_manifest: true,
        }
    }

    /// Reader that accepts any archive.
    pub const fn lenient() -> Self {
        Self {
            require_manifest: false,
        }
    }

    pub fn read(&self, bytes: &[u8]) -> Result<ProjectFileSet, ArchiveError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries: Vec<(String, String)> = Vec::new();
        let mut skipped_binary = 0_usize;

        for idx in 0..archive.len() {
            let mut entry = archive.by_index(idx)?;
            if entry.is_dir() || entry.name().ends_with('/') {
                continue;
            }

            let path = sanitize_path(entry.name());
            if path.is_empty() || is_excluded(&path) {
                debug!(entry = entry.name(), "archive entry skipped");
                continue;
            }

            let mut raw = Vec::new();
            entry
                .read_to_end(&mut raw)
                .map_err(|source| ArchiveError::Entry {
                    entry: path.clone(),
                    source,
                })?;

            match decode_text(raw) {
                Some(content) => entries.push((path, content)),
                None => {
                    skipped_binary += 1;
                    debug!(path, "binary entry skipped");
                }
            }
        }

        let files: BTreeMap<String, String> = strip_common_root(entries).into_iter().collect();
        let files = ProjectFileSet::from(files);

        if self.require_manifest && !files.contains(REQUIRED_FILE) {
            warn!(files = files.len(), "archive has no {REQUIRED_FILE}");
            return Err(ArchiveError::MissingRequiredFile(REQUIRED_FILE.to_string()));
        }

        info!(files = files.len(), skipped_binary, "archive read");
        Ok(files)
    }
}

fn is_excluded(path: &str) -> bool {
    path.split('/')
        .any(|segment| segment == MACOS_METADATA_DIR || segment == DEPENDENCY_DIR)
}

fn decode_text(raw: Vec<u8>) -> Option<String> {
    if raw.contains(&0) {
        return None;
    }
    String::from_utf8(raw).ok()
}

fn strip_common_root(entries: Vec<(String, String)>) -> Vec<(String, String)> {
    let Some(root) = entries
        .first()
        .and_then(|(path, _)| path.split_once('/'))
        .map(|(root, _)| format!("{root}/"))
    else {
        return entries;
    };

    if !entries.iter().all(|(path, _)| path.starts_with(&root)) {
        return entries;
    }

    entries
        .into_iter()
        .map(|(path, content)| (path[root.len()..].to_string(), content))
        .collect()
}
