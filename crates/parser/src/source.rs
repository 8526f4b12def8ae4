//! Schema document sources
//!
//! Locating and reading documents is kept behind [`SchemaSource`] so the
//! compiler itself only ever sees parsed, in-memory documents.

use crate::smithy::{short_name_of, SchemaDocument, SmithyParser};
use api_catalog_common::{CatalogError, Result};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// One parsed schema document and the short name of the file it came from
#[derive(Debug, Clone)]
pub struct SchemaFile {
    pub short_name: String,
    pub document: SchemaDocument,
}

/// Provides the schema documents to compile
#[cfg_attr(test, mockall::automock)]
pub trait SchemaSource {
    fn load(&self) -> Result<Vec<SchemaFile>>;
}

/// Every `.json` document below a directory
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,

    /// Substrings of short names to keep; `None` keeps everything
    filter: Option<Vec<String>>,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Vec<String>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// List matching document paths in sorted order
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(CatalogError::Parse(format!(
                "Not a directory: {}",
                self.root.display()
            )));
        }

        let mut paths = Vec::new();
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

        for entry in walker {
            let entry = entry.map_err(|e| CatalogError::Io(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !has_json_extension(path) {
                continue;
            }
            if self.matches_filter(path) {
                paths.push(path.to_path_buf());
            }
        }

        Ok(paths)
    }

    fn matches_filter(&self, path: &Path) -> bool {
        let Some(filter) = &self.filter else {
            return true;
        };
        short_name_of(path)
            .map(|name| filter.iter().any(|f| name.contains(f.as_str())))
            .unwrap_or(false)
    }
}

impl SchemaSource for DirectorySource {
    fn load(&self) -> Result<Vec<SchemaFile>> {
        load_files(&self.discover()?)
    }
}

/// An explicit list of document paths
#[derive(Debug, Clone)]
pub struct FileListSource {
    paths: Vec<PathBuf>,
}

impl FileListSource {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

impl SchemaSource for FileListSource {
    fn load(&self) -> Result<Vec<SchemaFile>> {
        load_files(&self.paths)
    }
}

fn load_files(paths: &[PathBuf]) -> Result<Vec<SchemaFile>> {
    paths
        .iter()
        .map(|path| SmithyParser::from_file(path).map(SmithyParser::into_schema_file))
        .collect()
}

/// Hidden entries and `__test__` directories are never scanned
fn is_skipped(entry: &DirEntry) -> bool {
    let Some(name) = entry.file_name().to_str() else {
        return false;
    };
    name.starts_with('.') || (entry.file_type().is_dir() && name.contains("__test__"))
}

fn has_json_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EMPTY_MODEL: &str = r#"{ "smithy": "2.0", "shapes": {} }"#;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_sorted_json_files() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "sqs.json", EMPTY_MODEL);
        write(temp.path(), "nested/dynamodb.json", EMPTY_MODEL);
        write(temp.path(), "README.md", "docs");
        write(temp.path(), ".hidden/secret.json", EMPTY_MODEL);
        write(temp.path(), "__test__/fixture.json", EMPTY_MODEL);

        let source = DirectorySource::new(temp.path());
        let names: Vec<_> = source
            .discover()
            .unwrap()
            .iter()
            .filter_map(|p| short_name_of(p))
            .collect();

        assert_eq!(names, vec!["dynamodb", "sqs"]);
    }

    #[test]
    fn test_filter_by_short_name() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "s3.json", EMPTY_MODEL);
        write(temp.path(), "sqs.json", EMPTY_MODEL);
        write(temp.path(), "dynamodb.json", EMPTY_MODEL);

        let source = DirectorySource::new(temp.path())
            .with_filter(vec!["s3".to_string(), "dynamo".to_string()]);
        let files = source.load().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.short_name.as_str()).collect();

        assert_eq!(names, vec!["dynamodb", "s3"]);
    }

    #[test]
    fn test_missing_directory() {
        let source = DirectorySource::new("definitely/not/here");
        assert!(source.discover().is_err());
    }

    #[test]
    fn test_file_list_source_fails_on_bad_document() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.json", EMPTY_MODEL);
        write(temp.path(), "bad.json", "{");

        let source = FileListSource::new(vec![
            temp.path().join("good.json"),
            temp.path().join("bad.json"),
        ]);
        let err = source.load().unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
