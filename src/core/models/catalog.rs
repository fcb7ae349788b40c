//! Syllabus catalog model
//!
//! The catalog is the static Subject → Priority tier → Chapter → Concept tree.
//! It is built once at startup and never mutated afterwards.

use super::ConceptKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Priority tier of a chapter within its subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Chapters to study first; the only tier counted by the mission metric
    #[serde(rename = "High Priority")]
    High,
    /// Chapters to study later
    #[serde(rename = "Low Priority")]
    Low,
}

impl Priority {
    /// Both tiers, in display order
    pub const ALL: [Self; 2] = [Self::High, Self::Low];

    /// Human-readable tier label ("High Priority" / "Low Priority")
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High Priority",
            Self::Low => "Low Priority",
        }
    }

    /// Short study hint shown next to the tier heading
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::High => "Do First",
            Self::Low => "Do Later",
        }
    }

    /// Whether this is the High Priority tier
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A named group of concepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter name, unique within its subject
    pub name: String,
    /// Concepts in display order
    #[serde(default)]
    pub concepts: Vec<String>,
}

/// All chapters of one priority tier within a subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityGroup {
    /// Tier of every chapter in this group
    pub priority: Priority,
    /// Chapters in display order
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

/// A subject and its tiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject name, unique within the catalog
    pub name: String,
    /// Priority groups; the catalog keeps High before Low
    #[serde(default)]
    pub tiers: Vec<PriorityGroup>,
}

impl Subject {
    /// Number of concepts across all tiers
    #[must_use]
    pub fn concept_count(&self) -> usize {
        self.tiers
            .iter()
            .flat_map(|tier| &tier.chapters)
            .map(|chapter| chapter.concepts.len())
            .sum()
    }
}

/// One concept as seen while walking the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry<'a> {
    /// 1-based position in catalog order; stable for a given syllabus
    pub number: usize,
    /// Subject name
    pub subject: &'a str,
    /// Tier of the chapter
    pub priority: Priority,
    /// Chapter name
    pub chapter: &'a str,
    /// Concept text
    pub concept: &'a str,
}

impl CatalogEntry<'_> {
    /// Owned identity key for this concept
    #[must_use]
    pub fn key(&self) -> ConceptKey {
        ConceptKey::new(self.subject, self.chapter, self.concept)
    }

    /// Whether this entry has the given identity
    #[must_use]
    pub fn matches(&self, key: &ConceptKey) -> bool {
        self.subject == key.subject && self.chapter == key.chapter && self.concept == key.concept
    }
}

/// Errors raised while building or loading a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two subjects share a name
    #[error("duplicate subject '{0}'")]
    DuplicateSubject(String),
    /// A subject lists the same tier twice
    #[error("subject '{subject}' lists tier '{priority}' more than once")]
    DuplicateTier {
        /// Subject name
        subject: String,
        /// Repeated tier
        priority: Priority,
    },
    /// Two chapters of one subject share a name (across tiers too)
    #[error("duplicate chapter '{chapter}' in subject '{subject}'")]
    DuplicateChapter {
        /// Subject name
        subject: String,
        /// Chapter name
        chapter: String,
    },
    /// A chapter lists the same concept twice
    #[error("duplicate concept '{concept}' in '{subject} / {chapter}'")]
    DuplicateConcept {
        /// Subject name
        subject: String,
        /// Chapter name
        chapter: String,
        /// Concept text
        concept: String,
    },
    /// The mission names a subject the catalog does not have
    #[error("mission subject '{0}' is not in the syllabus")]
    UnknownMissionSubject(String),
    /// The syllabus file is not valid TOML or has the wrong shape
    #[error("invalid syllabus: {0}")]
    Parse(#[from] toml::de::Error),
    /// The syllabus file could not be read
    #[error("failed to read syllabus {path}: {source}")]
    Read {
        /// File that failed
        path: std::path::PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// The validated, immutable syllabus tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    subjects: Vec<Subject>,
}

impl Catalog {
    /// Build a catalog, checking that every `(subject, chapter, concept)` triple is unique.
    ///
    /// Tiers are reordered so High Priority comes before Low Priority; chapter
    /// and concept order is preserved.
    ///
    /// # Errors
    /// Returns a `CatalogError` naming the first duplicate found.
    pub fn new(mut subjects: Vec<Subject>) -> Result<Self, CatalogError> {
        let mut subject_names = HashSet::new();
        for subject in &mut subjects {
            if !subject_names.insert(subject.name.clone()) {
                return Err(CatalogError::DuplicateSubject(subject.name.clone()));
            }
            subject.tiers.sort_by_key(|tier| tier.priority);
            Self::validate_subject(subject)?;
        }
        Ok(Self { subjects })
    }

    fn validate_subject(subject: &Subject) -> Result<(), CatalogError> {
        if let Some(pair) = subject
            .tiers
            .windows(2)
            .find(|pair| pair[0].priority == pair[1].priority)
        {
            return Err(CatalogError::DuplicateTier {
                subject: subject.name.clone(),
                priority: pair[0].priority,
            });
        }

        let mut chapter_names = HashSet::new();
        for chapter in subject.tiers.iter().flat_map(|tier| &tier.chapters) {
            if !chapter_names.insert(chapter.name.as_str()) {
                return Err(CatalogError::DuplicateChapter {
                    subject: subject.name.clone(),
                    chapter: chapter.name.clone(),
                });
            }
            let mut concepts = HashSet::new();
            if let Some(dup) = chapter.concepts.iter().find(|c| !concepts.insert(c.as_str())) {
                return Err(CatalogError::DuplicateConcept {
                    subject: subject.name.clone(),
                    chapter: chapter.name.clone(),
                    concept: dup.clone(),
                });
            }
        }
        Ok(())
    }

    /// Subjects in catalog order
    #[must_use]
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// Look up a subject by exact name
    #[must_use]
    pub fn subject(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|subject| subject.name == name)
    }

    /// Walk every concept in catalog order, numbering them from 1
    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.subjects
            .iter()
            .flat_map(|subject| {
                subject.tiers.iter().flat_map(move |tier| {
                    tier.chapters.iter().flat_map(move |chapter| {
                        chapter.concepts.iter().map(move |concept| CatalogEntry {
                            number: 0,
                            subject: &subject.name,
                            priority: tier.priority,
                            chapter: &chapter.name,
                            concept,
                        })
                    })
                })
            })
            .enumerate()
            .map(|(idx, entry)| CatalogEntry {
                number: idx + 1,
                ..entry
            })
    }

    /// Total number of concepts
    #[must_use]
    pub fn concept_count(&self) -> usize {
        self.subjects.iter().map(Subject::concept_count).sum()
    }

    /// The catalog entry for a key, if the key names a real concept
    #[must_use]
    pub fn entry(&self, key: &ConceptKey) -> Option<CatalogEntry<'_>> {
        self.entries().find(|entry| entry.matches(key))
    }

    /// Whether the key names a concept in this catalog
    #[must_use]
    pub fn contains(&self, key: &ConceptKey) -> bool {
        self.entry(key).is_some()
    }

    /// The entry with the given 1-based number
    #[must_use]
    pub fn entry_by_number(&self, number: usize) -> Option<CatalogEntry<'_>> {
        number
            .checked_sub(1)
            .and_then(|idx| self.entries().nth(idx))
    }
}
