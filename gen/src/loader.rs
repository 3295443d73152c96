//! Loading validated schemas from definition files.
//!
//! ```no_run
//! use argbind_gen::SchemaSet;
//!
//! // A single YAML or JSON file
//! let set = SchemaSet::from_file("args.yaml").unwrap();
//! let schema = set.require("my-option").unwrap();
//!
//! // Every definition file in a directory
//! let set = SchemaSet::from_dir("schemas/").unwrap();
//! for name in set.names() {
//!     println!("{name}");
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use argbind_core::Schema;
use tracing::debug;

use crate::definition::DefinitionFile;
use crate::error::{GenError, Result};

/// Serialization format of a definition file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Some(DefinitionFormat::Yaml),
            Some("json") => Some(DefinitionFormat::Json),
            _ => None,
        }
    }

    fn parse(self, text: &str) -> Result<DefinitionFile> {
        Ok(match self {
            DefinitionFormat::Yaml => serde_yaml::from_str(text)?,
            DefinitionFormat::Json => serde_json::from_str(text)?,
        })
    }
}

/// Describes where a [`SchemaSet`] was loaded from.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    /// A single definition file.
    File(PathBuf),
    /// Every definition file in a directory.
    Directory(PathBuf),
    /// Definition text supplied in memory.
    Inline,
    /// Several files and directories merged together.
    Multiple(Vec<SchemaSource>),
}

/// Validated schemas indexed by name, in load order.
#[derive(Debug)]
pub struct SchemaSet {
    schemas: Vec<Schema>,
    index: HashMap<String, usize>,
    source: SchemaSource,
}

impl SchemaSet {
    fn empty(source: SchemaSource) -> Self {
        Self {
            schemas: Vec::new(),
            index: HashMap::new(),
            source,
        }
    }

    /// Parses definition text.
    ///
    /// # Errors
    ///
    /// Fails on malformed text, invalid definitions, or duplicate names.
    pub fn from_text(text: &str, format: DefinitionFormat) -> Result<Self> {
        let mut set = Self::empty(SchemaSource::Inline);
        set.extend_from(format.parse(text)?)?;
        Ok(set)
    }

    /// Loads one YAML or JSON definition file.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::UnsupportedFormat`] for an unknown extension,
    /// [`GenError::IoError`] if the file cannot be read, and any definition
    /// or validation error found in its contents.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut set = Self::empty(SchemaSource::File(path.to_path_buf()));
        set.load_file(path)?;
        Ok(set)
    }

    /// Loads every `*.yaml`, `*.yml` and `*.json` file in a directory.
    ///
    /// Files are read in name order so error reporting is stable; other
    /// files are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file), plus
    /// [`GenError::DuplicateSchema`] when two files define the same name.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut set = Self::empty(SchemaSource::Directory(path.to_path_buf()));
        set.load_dir(path)?;
        Ok(set)
    }

    /// Loads a mix of files and directories into one set.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut set = Self::empty(SchemaSource::Multiple(Vec::new()));
        let mut sources = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_dir() {
                set.load_dir(path)?;
                sources.push(SchemaSource::Directory(path.to_path_buf()));
            } else {
                set.load_file(path)?;
                sources.push(SchemaSource::File(path.to_path_buf()));
            }
        }
        set.source = SchemaSource::Multiple(sources);
        Ok(set)
    }

    fn load_dir(&mut self, path: &Path) -> Result<()> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if file_path.is_file() && DefinitionFormat::from_path(&file_path).is_some() {
                files.push(file_path);
            }
        }
        files.sort();
        for file in files {
            self.load_file(&file)?;
        }
        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let format = DefinitionFormat::from_path(path)
            .ok_or_else(|| GenError::UnsupportedFormat(path.display().to_string()))?;
        let text = std::fs::read_to_string(path)?;
        let file = format.parse(&text)?;
        debug!(path = %path.display(), schemas = file.schemas.len(), "loaded definition file");
        self.extend_from(file)
    }

    fn extend_from(&mut self, file: DefinitionFile) -> Result<()> {
        for definition in &file.schemas {
            let schema = definition.to_schema()?;
            self.insert(schema)?;
        }
        Ok(())
    }

    /// Adds a schema.
    ///
    /// # Errors
    ///
    /// Returns [`GenError::DuplicateSchema`] if the name is already taken.
    pub fn insert(&mut self, schema: Schema) -> Result<()> {
        if self.index.contains_key(schema.name()) {
            return Err(GenError::DuplicateSchema(schema.name().to_string()));
        }
        self.index.insert(schema.name().to_string(), self.schemas.len());
        self.schemas.push(schema);
        Ok(())
    }

    /// Looks up a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.index.get(name).map(|&idx| &self.schemas[idx])
    }

    /// Looks up a schema by name, failing with [`GenError::UnknownSchema`].
    pub fn require(&self, name: &str) -> Result<&Schema> {
        self.get(name)
            .ok_or_else(|| GenError::UnknownSchema(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Schema names in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.iter().map(Schema::name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &SchemaSource {
        &self.source
    }
}
