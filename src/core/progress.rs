//! Progress record and its JSON store
//!
//! The record maps each concept's [`ConceptKey`] to a done flag. It is
//! persisted as nested JSON objects, subject → chapter → concept → bool, so
//! names may contain any character without making keys ambiguous:
//!
//! ```json
//! { "Physics": { "Electrostatics": { "Coulomb's Law": true } } }
//! ```

use crate::core::models::{Catalog, ConceptKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// On-disk shape of the record
type NestedProgress = BTreeMap<String, BTreeMap<String, BTreeMap<String, bool>>>;

/// Flat `subject_chapter_concept` → bool shape written by older trackers
pub type LegacyProgress = BTreeMap<String, bool>;

/// Errors raised by the progress store
#[derive(Debug, Error)]
pub enum ProgressError {
    /// The store exists but could not be read
    #[error("failed to read progress file {path}: {source}")]
    Read {
        /// Store location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The store exists but is not a progress mapping
    #[error("progress file {path} is corrupt: {source}")]
    Corrupt {
        /// Store location
        path: PathBuf,
        /// Parse error
        #[source]
        source: serde_json::Error,
    },
    /// The store holds the flat legacy format, which must be imported explicitly
    #[error(
        "progress file {path} uses the legacy flat key format; convert it with `studytracker import {path}`"
    )]
    LegacyFormat {
        /// Store location
        path: PathBuf,
    },
    /// The record could not be written
    #[error("failed to write progress file {path}: {source}")]
    Write {
        /// Store location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
    /// The record could not be serialized
    #[error("failed to serialize progress: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Completion state of every concept; absent keys are not done
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NestedProgress", into = "NestedProgress")]
pub struct ProgressRecord {
    entries: BTreeMap<ConceptKey, bool>,
}

impl ProgressRecord {
    /// An empty record: nothing done
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the concept is marked done
    #[must_use]
    pub fn is_done(&self, key: &ConceptKey) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Set the done flag for a concept
    pub fn set(&mut self, key: ConceptKey, done: bool) {
        self.entries.insert(key, done);
    }

    /// Flip the done flag for a concept and return the new value.
    ///
    /// Only the in-memory record changes; persist it with [`ProgressStore::save`].
    pub fn toggle(&mut self, key: &ConceptKey) -> bool {
        let done = !self.is_done(key);
        self.entries.insert(key.clone(), done);
        done
    }

    /// Number of stored entries (done or not)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&ConceptKey, bool)> {
        self.entries.iter().map(|(key, done)| (key, *done))
    }

    /// Keys marked done
    pub fn done_keys(&self) -> impl Iterator<Item = &ConceptKey> {
        self.iter().filter(|(_, done)| *done).map(|(key, _)| key)
    }

    /// Resolve a flat legacy mapping against the catalog.
    ///
    /// Every catalog concept's legacy key is computed and looked up. Legacy
    /// keys that no concept produces are reported as unmatched; keys that
    /// more than one concept produces are reported as ambiguous and skipped.
    #[must_use]
    pub fn from_legacy(legacy: &LegacyProgress, catalog: &Catalog) -> LegacyImport {
        let mut owners: HashMap<String, Vec<ConceptKey>> = HashMap::new();
        for entry in catalog.entries() {
            let key = entry.key();
            owners.entry(key.legacy_key()).or_default().push(key);
        }

        let mut import = LegacyImport::default();
        for (flat, done) in legacy {
            match owners.get(flat).map(Vec::as_slice) {
                Some([key]) => import.record.set(key.clone(), *done),
                Some(_) => import.ambiguous.push(flat.clone()),
                None => import.unmatched.push(flat.clone()),
            }
        }
        import
    }

    /// Copy every entry of `other` into this record, overwriting existing values
    pub fn merge(&mut self, other: &Self) {
        for (key, done) in other.iter() {
            self.entries.insert(key.clone(), done);
        }
    }
}

impl From<NestedProgress> for ProgressRecord {
    fn from(nested: NestedProgress) -> Self {
        let entries = nested
            .into_iter()
            .flat_map(|(subject, chapters)| {
                chapters.into_iter().flat_map(move |(chapter, concepts)| {
                    let subject = subject.clone();
                    concepts.into_iter().map(move |(concept, done)| {
                        (ConceptKey::new(subject.clone(), chapter.clone(), concept), done)
                    })
                })
            })
            .collect();
        Self { entries }
    }
}

impl From<ProgressRecord> for NestedProgress {
    fn from(record: ProgressRecord) -> Self {
        let mut nested = Self::new();
        for (key, done) in record.entries {
            nested
                .entry(key.subject)
                .or_default()
                .entry(key.chapter)
                .or_default()
                .insert(key.concept, done);
        }
        nested
    }
}

/// Result of resolving a legacy progress file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyImport {
    /// Entries that resolved to exactly one concept
    pub record: ProgressRecord,
    /// Legacy keys no concept produces
    pub unmatched: Vec<String>,
    /// Legacy keys more than one concept produces
    pub ambiguous: Vec<String>,
}

/// JSON file holding the progress record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    /// Create a store backed by `path`; nothing is touched until load/save
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record.
    ///
    /// A missing or blank file is the normal first-run state and yields an
    /// empty record.
    ///
    /// # Errors
    /// - `ProgressError::Read` if the file exists but cannot be read
    /// - `ProgressError::LegacyFormat` if it holds the flat legacy format
    /// - `ProgressError::Corrupt` if it is not a progress mapping at all
    pub fn load(&self) -> Result<ProgressRecord, ProgressError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                crate::info!("No progress file at {}; starting fresh", self.path.display());
                return Ok(ProgressRecord::new());
            }
            Err(source) => {
                return Err(ProgressError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if content.trim().is_empty() {
            crate::warn!(
                "Progress file {} is empty; starting fresh",
                self.path.display()
            );
            return Ok(ProgressRecord::new());
        }

        match serde_json::from_str::<ProgressRecord>(&content) {
            Ok(record) => {
                crate::debug!(
                    "Loaded {} progress entries from {}",
                    record.len(),
                    self.path.display()
                );
                Ok(record)
            }
            Err(_) if serde_json::from_str::<LegacyProgress>(&content).is_ok() => {
                Err(ProgressError::LegacyFormat {
                    path: self.path.clone(),
                })
            }
            Err(source) => Err(ProgressError::Corrupt {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Read the store as a flat legacy mapping, for stores that
    /// [`load`](Self::load) rejected with `ProgressError::LegacyFormat`.
    ///
    /// # Errors
    /// - `ProgressError::Read` if the file cannot be read
    /// - `ProgressError::Corrupt` if it is not a flat mapping either
    pub fn load_legacy(&self) -> Result<LegacyProgress, ProgressError> {
        let content = fs::read_to_string(&self.path).map_err(|source| ProgressError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ProgressError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the persisted record with `record`.
    ///
    /// The JSON is written to a temporary file next to the target and then
    /// renamed over it, so a failed write leaves the previous file intact.
    ///
    /// # Errors
    /// Returns `ProgressError::Write` if the directory or file cannot be written.
    pub fn save(&self, record: &ProgressRecord) -> Result<(), ProgressError> {
        let json = serde_json::to_string_pretty(record)?;
        let write_err = |source: io::Error| ProgressError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.write_all(b"\n").map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|err| write_err(err.error))?;

        crate::debug!(
            "Saved {} progress entries to {}",
            record.len(),
            self.path.display()
        );
        Ok(())
    }
}
