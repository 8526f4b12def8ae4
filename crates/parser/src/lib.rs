//! Service-model compilation for the API catalog
//!
//! This crate turns Smithy JSON AST documents into the catalog consumed by
//! the explorer UI.
//!
//! ## Compilation Strategy
//!
//! Each document is compiled independently:
//! - every `service` shape becomes a catalog service named after its
//!   `smithy.api#title` trait (or local name)
//! - child resources are walked recursively, nesting node ids
//!   (`dynamodb.Table.Index`)
//! - every operation gets an example request body synthesized from its
//!   input structure
//!
//! Services from all documents are then merged and sorted by name. Any
//! unresolved reference or unexpected shape aborts the whole compilation.

pub mod smithy;
mod source;

pub use smithy::SmithyParser;
pub use source::{DirectorySource, FileListSource, SchemaFile, SchemaSource};

use api_catalog_common::{sort_by_name, Catalog, Result};

/// Compile a set of parsed documents into one catalog
pub fn compile_catalog(files: &[SchemaFile]) -> Result<Catalog> {
    let mut services = Vec::new();
    for file in files {
        services.extend(smithy::compile_document(&file.short_name, &file.document)?);
    }
    sort_by_name(&mut services, |s| s.name.as_str());

    Ok(Catalog { services })
}

/// Load every document from `source` and compile them into one catalog
pub fn compile_source(source: &dyn SchemaSource) -> Result<Catalog> {
    let files = source.load()?;
    compile_catalog(&files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MockSchemaSource;
    use api_catalog_common::CatalogError;

    fn file(short_name: &str, json: &str) -> SchemaFile {
        SmithyParser::from_json(json, short_name)
            .unwrap()
            .into_schema_file()
    }

    fn service_json(id: &str) -> String {
        format!(
            r#"{{ "smithy": "2.0", "shapes": {{ "{}": {{ "type": "service" }} }} }}"#,
            id
        )
    }

    #[test]
    fn test_services_sorted_across_documents() {
        let mut source = MockSchemaSource::new();
        source.expect_load().times(1).returning(|| {
            Ok(vec![
                file("zebra", &service_json("com.example#Zebra")),
                file("apple", &service_json("com.example#apple")),
                file("mango", &service_json("com.example#Mango")),
            ])
        });

        let catalog = compile_source(&source).unwrap();
        let names: Vec<_> = catalog.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "Mango", "Zebra"]);
    }

    #[test]
    fn test_source_error_propagates() {
        let mut source = MockSchemaSource::new();
        source
            .expect_load()
            .returning(|| Err(CatalogError::Parse("unreadable".to_string())));

        let err = compile_source(&source).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_one_bad_document_fails_everything() {
        let files = vec![
            file("good", &service_json("com.example#Good")),
            file(
                "bad",
                r#"{ "shapes": { "com.example#Bad": {
                    "type": "service",
                    "operations": [ { "target": "com.example#Gone" } ]
                } } }"#,
            ),
        ];

        let err = compile_catalog(&files).unwrap_err();
        assert!(matches!(err, CatalogError::ShapeNotFound { ref id } if id == "com.example#Gone"));
    }
}
