//! Filesystem helpers: data-directory resolution and file selection.

use std::path::{Path, PathBuf};

use hireflow_types::field::FileRef;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "HIREFLOW_DATA_DIR";

/// Resolve the data directory path.
///
/// Checks `HIREFLOW_DATA_DIR` first, then falls back to `~/.hireflow`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".hireflow");
    }

    PathBuf::from(".hireflow")
}

/// MIME type for the document extensions the wizards accept.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Describe a file on disk for a file field. Contents are not read here.
pub async fn file_ref_from_path(path: &Path) -> std::io::Result<FileRef> {
    let metadata = tokio::fs::metadata(path).await?;
    if !metadata.is_file() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} is not a regular file", path.display()),
        ));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(FileRef {
        path: path.display().to_string(),
        content_type: content_type_for(&file_name).to_string(),
        file_name,
        size_bytes: metadata.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_content_type_for() {
        assert_eq!(content_type_for("cv.PDF"), "application/pdf");
        assert_eq!(content_type_for("cv.docx").len(), 71);
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_file_ref_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        tokio::fs::write(&path, b"%PDF-1.4 test").await.unwrap();

        let file = file_ref_from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "resume.pdf");
        assert_eq!(file.size_bytes, 13);
        assert_eq!(file.content_type, "application/pdf");
        assert_eq!(file.extension().as_deref(), Some("pdf"));
    }

    #[tokio::test]
    async fn test_file_ref_rejects_directories_and_missing() {
        let dir = tempdir().unwrap();
        assert!(file_ref_from_path(dir.path()).await.is_err());
        assert!(file_ref_from_path(&dir.path().join("nope.pdf")).await.is_err());
    }
}
