#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads Swagger documents from disk or memory. The resolver core never
//! performs I/O itself; everything it consumes passes through a
//! [`ConfigurationLoader`] first.

use crate::error::{AppError, AppResult};
use crate::oas::document::SwaggerDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Serialization format of a raw document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text.
    Yaml,
}

impl DocumentFormat {
    /// Picks a format from a file extension. Anything not `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Source of the Swagger document resolvers are built from.
pub trait ConfigurationLoader {
    /// Loads and parses the full document.
    fn load_document(&self) -> AppResult<SwaggerDocument>;
}

/// Loads a document from a single `.yaml`, `.yml` or `.json` file.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    /// Creates a loader for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLoader { path: path.into() }
    }

    /// Path of the document.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigurationLoader for FileLoader {
    fn load_document(&self) -> AppResult<SwaggerDocument> {
        if !self.path.exists() {
            return Err(AppError::General(format!(
                "Swagger file not found: {:?}",
                self.path
            )));
        }

        let content = fs::read_to_string(&self.path)?;
        debug!(path = %self.path.display(), bytes = content.len(), "loading swagger document");
        parse_document(&content, DocumentFormat::from_path(&self.path))
    }
}

/// Parses an in-memory document.
pub fn parse_document(content: &str, format: DocumentFormat) -> AppResult<SwaggerDocument> {
    let document = match format {
        DocumentFormat::Json => serde_json::from_str(content)?,
        DocumentFormat::Yaml => serde_yaml::from_str(content)?,
    };
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("swagger.yml");
        fs::write(
            &path,
            "swagger: '2.0'\ndefinitions:\n  Pet:\n    properties:\n      name:\n        type: string\n",
        )
        .unwrap();

        let doc = FileLoader::new(&path).load_document().unwrap();
        assert!(doc.definitions.contains_key("Pet"));
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("swagger.json");
        fs::write(&path, r#"{"swagger": "2.0", "paths": {"/ping": {"get": {}}}}"#).unwrap();

        let doc = FileLoader::new(&path).load_document().unwrap();
        assert!(doc.paths["/ping"].get.is_some());
    }

    #[test]
    fn test_missing_file() {
        let err = FileLoader::new("/does/not/exist.yaml")
            .load_document()
            .unwrap_err();
        assert!(matches!(err, AppError::General(_)));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let err = parse_document("{", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("a.yml")),
            DocumentFormat::Yaml
        );
    }
}
