use anyhow::{anyhow, bail, Context, Result};
use std::fs;
use std::path::Path;

/// Reads a document for one-shot analysis. Plain text formats are read as UTF-8 and PDF
/// text is extracted; anything else is rejected before the file is touched.
pub fn read_document(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "txt" | "md" | "csv" | "json" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read document {}", path.display())),
        "pdf" => pdf_extract::extract_text(path)
            .map_err(|e| anyhow!("Failed to extract text from {}: {}", path.display(), e)),
        "" => bail!("Document {} has no file extension", path.display()),
        other => bail!("Unsupported file format: {}", other),
    }
}
