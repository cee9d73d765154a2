use anyhow::{bail, Context, Result};
use std::path::Path;

pub struct SelectedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Only `.pdf` files can be picked; the backend gets the base name, not the path.
pub async fn read_pdf(path: &Path) -> Result<SelectedFile> {
    let is_pdf = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    if !is_pdf {
        bail!("{} is not a PDF file", path.display());
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .context("path has no file name")?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    log::debug!("Selected {} ({} bytes)", file_name, bytes.len());
    Ok(SelectedFile { file_name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_pdf_with_base_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Report.V2.PDF");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let selected = read_pdf(&path).await.unwrap();

        assert_eq!(selected.file_name, "Report.V2.PDF");
        assert_eq!(selected.bytes, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn rejects_other_file_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = read_pdf(&path).await.err().unwrap();
        assert!(err.to_string().contains("is not a PDF file"));
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_pdf(&dir.path().join("gone.pdf")).await.is_err());
    }
}
