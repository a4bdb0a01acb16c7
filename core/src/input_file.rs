use crate::error::FileTypeError;
use std::path::Path;
use tracing::{debug, info};

/// Extensions whose text we cannot extract ourselves.
pub const OFFICE_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    PlainText,
    OfficeDocument(String),
    Other(Option<String>),
}

pub fn classify(path: &Path) -> FileKind {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("txt") => FileKind::PlainText,
        Some(ext) if OFFICE_EXTENSIONS.contains(&ext) => FileKind::OfficeDocument(ext.to_string()),
        _ => FileKind::Other(extension),
    }
}

/// Read a user-chosen file as input text. Only `.txt` files are read.
pub async fn read_input_file(path: &Path) -> Result<String, FileTypeError> {
    match classify(path) {
        FileKind::PlainText => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| FileTypeError::Unreadable {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            info!(path = %path.display(), chars = text.chars().count(), "loaded input file");
            Ok(text)
        }
        FileKind::OfficeDocument(extension) => {
            debug!(path = %path.display(), "office document needs manual paste");
            Err(FileTypeError::ExtractionRestricted { extension })
        }
        FileKind::Other(extension) => Err(FileTypeError::Unsupported { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_classify_extensions() {
        assert_eq!(classify(Path::new("notes.txt")), FileKind::PlainText);
        assert_eq!(classify(Path::new("NOTES.TXT")), FileKind::PlainText);
        assert_eq!(
            classify(Path::new("report.DOCX")),
            FileKind::OfficeDocument("docx".to_string())
        );
        assert_eq!(
            classify(Path::new("slides.pptx")),
            FileKind::Other(Some("pptx".to_string()))
        );
        assert_eq!(classify(Path::new("README")), FileKind::Other(None));
    }

    #[tokio::test]
    async fn test_read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        tokio::fs::write(&path, "Hello").await.unwrap();
        assert_eq!(read_input_file(&path).await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_pdf_is_not_read() {
        // The file does not exist; it must not be touched.
        let err = read_input_file(&PathBuf::from("missing/notes.pdf")).await.unwrap_err();
        assert_eq!(
            err,
            FileTypeError::ExtractionRestricted {
                extension: "pdf".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_missing_text_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input_file(&dir.path().join("gone.txt")).await.unwrap_err();
        assert!(matches!(err, FileTypeError::Unreadable { .. }));
    }
}
