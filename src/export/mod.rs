//! File-writer collaborator: single-field text export and the combined
//! zip archive of all selected fields.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use zip::write::SimpleFileOptions;

/// Archive name used when the caller picks a directory instead of a file
pub const DEFAULT_ARCHIVE_NAME: &str = "scene_assets.zip";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No fields selected to download.")]
    NothingSelected,

    #[error("Field name cannot be used as a filename: {0}")]
    InvalidFieldName(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Validate that a field name is safe to use as a filename
/// (no path traversal, no control characters).
pub fn validate_field_name(name: &str) -> Result<(), ExportError> {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(ExportError::InvalidFieldName(name.to_string()));
    }

    if name.chars().any(|c| c.is_control()) {
        return Err(ExportError::InvalidFieldName(name.to_string()));
    }

    if name.trim().is_empty() || name.len() > 250 {
        return Err(ExportError::InvalidFieldName(name.to_string()));
    }

    Ok(())
}

/// Write one field's formatted content as `{name}.txt` under `dir`.
pub fn write_field_txt(dir: &Path, name: &str, content: &str) -> Result<PathBuf, ExportError> {
    validate_field_name(name)?;

    let path = dir.join(format!("{}.txt", name));
    fs::write(&path, content).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::info!("exported field '{}' to {}", name, path.display());
    Ok(path)
}

/// Bundle `(filename, content)` pairs into a single flat zip at `dest`.
/// If `dest` is an existing directory the archive lands there under
/// [`DEFAULT_ARCHIVE_NAME`]. An empty entry list is an error, never a
/// silently empty archive.
pub fn write_archive(dest: &Path, entries: &[(String, String)]) -> Result<PathBuf, ExportError> {
    if entries.is_empty() {
        return Err(ExportError::NothingSelected);
    }

    // Entry names come straight from scene JSON keys; reject anything
    // that could escape the extraction directory before touching disk
    for (filename, _) in entries {
        let field = filename.strip_suffix(".txt").unwrap_or(filename);
        validate_field_name(field)?;
    }

    let path = if dest.is_dir() {
        dest.join(DEFAULT_ARCHIVE_NAME)
    } else {
        dest.to_path_buf()
    };

    let file = fs::File::create(&path).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    let mut writer = zip::ZipWriter::new(file);
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (filename, content) in entries {
        writer.start_file(filename.as_str(), options)?;
        writer
            .write_all(content.as_bytes())
            .map_err(|source| ExportError::Io {
                path: path.clone(),
                source,
            })?;
    }

    writer.finish()?;
    tracing::info!(
        "exported {} fields to archive {}",
        entries.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_write_field_txt() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_field_txt(dir.path(), "visual", "1. a\n\n2. b").unwrap();
        assert_eq!(path, dir.path().join("visual.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "1. a\n\n2. b");
    }

    #[test]
    fn test_rejects_unsafe_field_names() {
        let dir = tempfile::tempdir().unwrap();

        for bad in ["../escape", "a/b", "a\\b", "", "  ", "nul\0byte"] {
            assert!(matches!(
                write_field_txt(dir.path(), bad, "x"),
                Err(ExportError::InvalidFieldName(_))
            ));
        }
    }

    #[test]
    fn test_archive_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            ("visual.txt".to_string(), "1. city".to_string()),
            ("sfx.txt".to_string(), "1. rain\n\n2. wind".to_string()),
        ];

        let path = write_archive(&dir.path().join("out.zip"), &entries).unwrap();

        let mut archive = zip::ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("sfx.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "1. rain\n\n2. wind");
    }

    #[test]
    fn test_archive_in_directory_uses_default_name() {
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![("visual.txt".to_string(), "1. a".to_string())];

        let path = write_archive(dir.path(), &entries).unwrap();
        assert_eq!(path, dir.path().join(DEFAULT_ARCHIVE_NAME));
        assert!(path.exists());
    }

    #[test]
    fn test_archive_rejects_unsafe_entry_names() {
        let dir = tempfile::tempdir().unwrap();

        for bad in ["../evil.txt", "a/b.txt", "a\\b.txt", ".txt"] {
            let entries = vec![
                ("visual.txt".to_string(), "1. a".to_string()),
                (bad.to_string(), "payload".to_string()),
            ];

            let err = write_archive(&dir.path().join("out.zip"), &entries).unwrap_err();
            assert!(matches!(err, ExportError::InvalidFieldName(_)));
            // Nothing written when any entry name is rejected
            assert!(!dir.path().join("out.zip").exists());
        }
    }

    #[test]
    fn test_empty_selection_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = write_archive(&dir.path().join("out.zip"), &[]).unwrap_err();
        assert!(matches!(err, ExportError::NothingSelected));
        assert!(!dir.path().join("out.zip").exists());
    }
}
