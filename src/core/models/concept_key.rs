//! Concept identity

use std::fmt;

/// Canonical identity of a concept: the `(subject, chapter, concept)` triple.
///
/// The triple is kept structured instead of being joined into a single
/// string, so names containing any delimiter can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConceptKey {
    /// Subject name (e.g., "Physics")
    pub subject: String,
    /// Chapter name, unique within its subject (e.g., "Electrostatics")
    pub chapter: String,
    /// Concept text, unique within its chapter (e.g., "Coulomb's Law")
    pub concept: String,
}

impl ConceptKey {
    /// Create a new concept key
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        chapter: impl Into<String>,
        concept: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            chapter: chapter.into(),
            concept: concept.into(),
        }
    }

    /// The flat `subject_chapter_concept` key used by older progress files.
    ///
    /// Only used to import those files; it is ambiguous when a name contains `_`.
    #[must_use]
    pub fn legacy_key(&self) -> String {
        format!("{}_{}_{}", self.subject, self.chapter, self.concept)
    }
}

impl fmt::Display for ConceptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {} / {}", self.subject, self.chapter, self.concept)
    }
}
