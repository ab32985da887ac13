use camino::{Utf8Path, Utf8PathBuf};
use roxmltree::{Document, ParsingOptions};
use std::fs;
use walkdir::WalkDir;

use super::SourceError;

/// Recursively collect files under `dir` whose extension matches one of
/// `extensions` (case-insensitive, without the leading dot).
///
/// The result is sorted by path so repeated runs see files in the same order.
/// Entries with non-UTF-8 paths are skipped.
///
/// # Errors
/// `SourceUnavailable` when `dir` is missing or not a directory
pub fn collect_files_with_extension(
    dir: &Utf8Path,
    extensions: &[&str],
) -> Result<Vec<Utf8PathBuf>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::SourceUnavailable(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
            tracing::warn!("Skipping file with non UTF-8 path in {}", dir);
            continue;
        };

        let matches = path
            .extension()
            .map(|e| extensions.iter().any(|ext| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);

        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Read a source document, replacing invalid UTF-8 sequences
pub fn read_document(path: &Utf8Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse an XML document, allowing a DTD
pub fn parse_xml<'a>(text: &'a str, path: &Utf8Path) -> Result<Document<'a>, SourceError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    Document::parse_with_options(text, options).map_err(|e| SourceError::ParseMalformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
