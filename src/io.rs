//! Reader/Writer traits and format dispatch
//!
//! Readers load a [`GraphDocument`] from a file; writers serialize a
//! [`LayoutDocument`]. The [`FormatRegistry`] picks one by file extension or
//! format id.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::graph::{GraphDocument, LayoutDocument};
use crate::readers::{JsonReader, YamlReader};
use crate::writers::{JsonWriter, YamlWriter};

/// Errors that can occur during reading or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// A serialization error occurred
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// A reader parses an input file into a graph document
pub trait Reader {
    /// Parse the input file into a GraphDocument
    fn read(&self, input: &Path) -> IoResult<GraphDocument>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer serializes a layout result
pub trait Writer {
    /// Serialize the layout to a string
    fn render(&self, layout: &LayoutDocument) -> IoResult<String>;

    /// Identifier for this output format (e.g., "json", "yaml")
    fn format_id(&self) -> &str;

    /// Write the layout to the output path
    fn write(&self, layout: &LayoutDocument, output: &Path) -> IoResult<()> {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, self.render(layout)?)?;
        Ok(())
    }
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader>>,
    writers: Vec<Box<dyn Writer>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Create a registry with all default readers and writers registered
    ///
    /// Currently registers:
    /// - Readers: `JsonReader` (json), `YamlReader` (yaml, yml)
    /// - Writers: `JsonWriter` (json), `YamlWriter` (yaml)
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_reader(Box::new(YamlReader::new()));
        registry.register_writer(Box::new(JsonWriter::new()));
        registry.register_writer(Box::new(YamlWriter::new()));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Register a writer
    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Find a writer by format ID, reporting unknown formats as errors
    pub fn require_writer(&self, format_id: &str) -> IoResult<&dyn Writer> {
        self.writer_for_format(format_id)
            .ok_or_else(|| IoError::UnsupportedFormat(format_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Direction;
    use std::path::PathBuf;

    // Mock reader for testing
    struct MockReader {
        extensions: Vec<&'static str>,
    }

    impl Reader for MockReader {
        fn read(&self, _input: &Path) -> IoResult<GraphDocument> {
            Ok(GraphDocument::default())
        }

        fn supported_extensions(&self) -> &[&str] {
            &self.extensions
        }
    }

    // Mock writer for testing
    struct MockWriter {
        format: &'static str,
    }

    impl Writer for MockWriter {
        fn render(&self, layout: &LayoutDocument) -> IoResult<String> {
            Ok(format!("{} nodes", layout.nodes.len()))
        }

        fn format_id(&self) -> &str {
            self.format
        }
    }

    fn empty_layout() -> LayoutDocument {
        LayoutDocument {
            margin: 0.05,
            direction: Direction::LeftRight,
            steps: 0,
            converged: true,
            nodes: vec![],
        }
    }

    #[test]
    fn reader_supports_extension_case_insensitive() {
        let reader = MockReader {
            extensions: vec!["json"],
        };
        assert!(reader.supports_extension("json"));
        assert!(reader.supports_extension("JSON"));
        assert!(!reader.supports_extension("yaml"));
    }

    #[test]
    fn registry_finds_reader_by_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["json"],
        }));

        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_none());
    }

    #[test]
    fn registry_finds_writer_by_format() {
        let mut registry = FormatRegistry::new();
        registry.register_writer(Box::new(MockWriter { format: "json" }));

        assert!(registry.writer_for_format("json").is_some());
        assert!(registry.writer_for_format("JSON").is_some()); // case insensitive
        assert!(registry.writer_for_format("csv").is_none());
        assert!(matches!(
            registry.require_writer("csv"),
            Err(IoError::UnsupportedFormat(f)) if f == "csv"
        ));
    }

    #[test]
    fn registry_reader_for_path_extracts_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["json"],
        }));

        let path = PathBuf::from("/some/path/graph.json");
        assert!(registry.reader_for_path(&path).is_ok());

        let unknown_path = PathBuf::from("/some/path/graph.xyz");
        assert!(matches!(
            registry.reader_for_path(&unknown_path),
            Err(IoError::UnsupportedFormat(_))
        ));

        let bare_path = PathBuf::from("graph");
        assert!(matches!(
            registry.reader_for_path(&bare_path),
            Err(IoError::UnknownExtension(_))
        ));
    }

    #[test]
    fn extension_from_path_works() {
        assert_eq!(
            FormatRegistry::extension_from_path(Path::new("test.json")),
            Some("json")
        );
        assert_eq!(
            FormatRegistry::extension_from_path(Path::new("test.YAML")),
            Some("YAML")
        );
        assert_eq!(
            FormatRegistry::extension_from_path(Path::new("noextension")),
            None
        );
    }

    #[test]
    fn io_error_display() {
        let err = IoError::UnsupportedFormat("xyz".to_string());
        assert_eq!(err.to_string(), "unsupported format: xyz");

        let err = IoError::Parse("invalid syntax".to_string());
        assert_eq!(err.to_string(), "parse error: invalid syntax");
    }

    #[test]
    fn default_write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/out/layout.txt");

        MockWriter { format: "txt" }
            .write(&empty_layout(), &output)
            .unwrap();

        assert_eq!(fs::read_to_string(output).unwrap(), "0 nodes");
    }

    #[test]
    fn with_defaults_registers_readers() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_some());
        assert!(registry.reader_for_extension("yml").is_some());
        assert!(registry.reader_for_extension("ttl").is_none());
    }

    #[test]
    fn with_defaults_registers_writers() {
        let registry = FormatRegistry::with_defaults();

        assert!(registry.writer_for_format("json").is_some());
        assert!(registry.writer_for_format("YAML").is_some()); // case insensitive
        assert!(registry.writer_for_format("html").is_none());
    }

    #[test]
    fn with_defaults_reader_can_read_fixture() {
        let registry = FormatRegistry::with_defaults();
        let path = PathBuf::from("tests/fixtures/triangle.json");

        let reader = registry
            .reader_for_path(&path)
            .expect("Should find JSON reader");
        let graph = reader.read(&path).expect("Should parse JSON file");

        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 3);
    }
}
