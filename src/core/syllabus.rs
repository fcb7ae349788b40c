//! Syllabus loading
//!
//! A syllabus file is TOML: a `[mission]` table plus `[[subjects]]` →
//! `[[subjects.tiers]]` → `[[subjects.tiers.chapters]]` arrays. The built-in
//! syllabus is compiled into the binary; a file with the same shape can
//! replace it through the `syllabus_file` config key.

use crate::core::models::{Catalog, CatalogError, Mission, Subject};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Built-in syllabus, embedded at compile time
const BUILTIN_SYLLABUS: &str = include_str!("../../assets/syllabus.toml");

#[derive(Debug, Deserialize)]
struct SyllabusFile {
    mission: Mission,
    #[serde(default)]
    subjects: Vec<Subject>,
}

/// Catalog plus the mission defined over it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syllabus {
    /// The static syllabus tree
    pub catalog: Catalog,
    /// Goal tracked by the mission metric
    pub mission: Mission,
}

impl Syllabus {
    /// Build a syllabus, checking that every mission subject exists in the catalog
    ///
    /// # Errors
    /// Returns `CatalogError::UnknownMissionSubject` for a mission subject the catalog lacks.
    pub fn new(catalog: Catalog, mission: Mission) -> Result<Self, CatalogError> {
        if let Some(missing) = mission
            .subjects
            .iter()
            .find(|name| catalog.subject(name).is_none())
        {
            return Err(CatalogError::UnknownMissionSubject(missing.clone()));
        }
        Ok(Self { catalog, mission })
    }

    /// Parse a syllabus from a TOML string
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or the catalog is invalid.
    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let file: SyllabusFile = toml::from_str(toml_str)?;
        let catalog = Catalog::new(file.subjects)?;
        Self::new(catalog, file.mission)
    }

    /// The syllabus compiled into the binary
    ///
    /// # Errors
    /// Only fails if the embedded asset is broken; covered by tests.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml(BUILTIN_SYLLABUS)
    }

    /// Load a syllabus from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Load from `path` when given, otherwise use the built-in syllabus
    ///
    /// # Errors
    /// See [`from_file`](Self::from_file) and [`builtin`](Self::builtin).
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        match path {
            Some(path) => {
                crate::debug!("Loading syllabus from {}", path.display());
                Self::from_file(path)
            }
            None => Self::builtin(),
        }
    }
}
