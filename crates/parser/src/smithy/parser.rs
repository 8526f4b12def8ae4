//! Smithy spec file parser

use super::types::SchemaDocument;
use crate::source::SchemaFile;
use api_catalog_common::{CatalogError, Result, Service};
use std::fs;
use std::path::Path;

/// Smithy specification parser
///
/// Reads and parses Smithy JSON AST files such as those published in the
/// `aws/api-models-aws` repository
#[derive(Debug, Clone)]
pub struct SmithyParser {
    /// Loaded Smithy model
    model: SchemaDocument,

    /// Base name of the source file (e.g., "dynamodb")
    short_name: String,
}

impl SmithyParser {
    /// Load Smithy model from file path
    ///
    /// The short name is the file stem, so `models/dynamodb.json` compiles
    /// into a service with node id `dynamodb`.
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = SmithyParser::from_file("models/dynamodb.json")?;
    /// let services = parser.parse()?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let short_name = short_name_of(path).ok_or_else(|| {
            CatalogError::Parse(format!("Invalid Smithy file name: {}", path.display()))
        })?;

        let content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Parse(format!(
                "Failed to read Smithy file {}: {}",
                path.display(),
                e
            ))
        })?;

        let model: SchemaDocument = serde_json::from_str(&content).map_err(|e| {
            CatalogError::Parse(format!(
                "Failed to parse Smithy JSON {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(Self { model, short_name })
    }

    /// Parse Smithy model from JSON string
    pub fn from_json(json: &str, short_name: &str) -> Result<Self> {
        let model: SchemaDocument = serde_json::from_str(json)
            .map_err(|e| CatalogError::Parse(format!("Failed to parse Smithy JSON: {}", e)))?;

        Ok(Self {
            model,
            short_name: short_name.to_string(),
        })
    }

    /// Compile the model's service shapes into catalog services
    pub fn parse(&self) -> Result<Vec<Service>> {
        super::compiler::compile_document(&self.short_name, &self.model)
    }

    /// Get reference to the underlying Smithy model
    pub fn model(&self) -> &SchemaDocument {
        &self.model
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn into_schema_file(self) -> SchemaFile {
        SchemaFile {
            short_name: self.short_name,
            document: self.model,
        }
    }
}

/// Base name of a schema file without its extension
pub fn short_name_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(String::from)
}
