//! Data models for `studytracker`

pub mod catalog;
pub mod concept_key;
pub mod mission;

pub use catalog::{Catalog, CatalogEntry, CatalogError, Chapter, Priority, PriorityGroup, Subject};
pub use concept_key::ConceptKey;
pub use mission::Mission;
