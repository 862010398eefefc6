//! Payload shape adapters
//!
//! Each adapter borrows the fields of one recognized payload shape and maps
//! them to canonical course records.

mod single_subject;
mod subject_map;

pub use single_subject::{
    SingleSubjectAdapter, CLASSES_ATTENDED_FIELDS, OVERALL_PERCENTAGE_FIELDS, SUBJECT_FIELD,
    TOTAL_CLASSES_FIELDS,
};
pub use subject_map::{SubjectMapAdapter, SUBJECT_MAP_FIELDS};

use crate::config::NormalizerConfig;
use crate::types::CourseRecord;

/// Trait for payload shape adapters
pub trait CourseAdapter {
    /// Extract canonical courses; never fails, degrading to defaults instead
    fn courses(&self, config: &NormalizerConfig) -> Vec<CourseRecord>;
}
