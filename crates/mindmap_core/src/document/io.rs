//! File helpers for document export/import.
//!
//! The interactive shell owns the real download/upload flow; these helpers
//! serve headless tools and tests.

use crate::document::schema::MindMapDocument;
use crate::document::serializer::{parse_document, to_json_pretty};
use crate::document::DocumentResult;
use log::info;
use std::path::{Path, PathBuf};

/// File extension of saved documents.
pub const DOCUMENT_EXTENSION: &str = "json";
/// File name used when exporting without an explicit name.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "mindmap.json";

/// Default export path inside `dir`.
pub fn default_export_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(DEFAULT_EXPORT_FILE_NAME)
}

pub fn has_document_extension(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION))
}

/// Reads and parses one document file.
pub fn read_document_file(path: impl AsRef<Path>) -> DocumentResult<MindMapDocument> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let document = parse_document(&text)?;
    info!(
        "event=document_read module=document status=ok nodes={} connections={}",
        document.nodes.len(),
        document.connections.len()
    );
    Ok(document)
}

/// Writes `document` as pretty JSON, replacing any existing file.
pub fn write_document_file(
    path: impl AsRef<Path>,
    document: &MindMapDocument,
) -> DocumentResult<()> {
    let text = to_json_pretty(document)?;
    std::fs::write(path.as_ref(), text)?;
    info!(
        "event=document_write module=document status=ok nodes={}",
        document.nodes.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{default_export_path, has_document_extension};
    use std::path::Path;

    #[test]
    fn default_export_uses_fixed_name() {
        assert_eq!(
            default_export_path("/tmp/maps"),
            Path::new("/tmp/maps/mindmap.json")
        );
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_document_extension("a/b/map.JSON"));
        assert!(!has_document_extension("a/b/map.yaml"));
        assert!(!has_document_extension("a/b/map"));
    }
}
