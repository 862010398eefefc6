//! Payload shape detection
//!
//! Shapes are tried in priority order: the subject-to-percentage mapping first,
//! then the legacy single-subject fields. Only the named fields are inspected.

use crate::adapters::{CourseAdapter, SingleSubjectAdapter, SubjectMapAdapter};
use crate::config::NormalizerConfig;
use crate::types::CourseRecord;
use serde_json::{Map, Value};

/// Recognized attendance payload shapes
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadShape<'a> {
    /// `subjectAttendance: { "<course>": <percentage>, ... }`
    SubjectMap(SubjectMapAdapter<'a>),
    /// Flat `subject` / `totalClasses` / `classesAttended` fields
    SingleSubject(SingleSubjectAdapter<'a>),
    /// Nothing usable; the record falls back to a placeholder course
    Unrecognized,
}

impl<'a> PayloadShape<'a> {
    /// Detect the shape of an effective student object
    pub fn detect(obj: &'a Map<String, Value>) -> Self {
        if let Some(adapter) = SubjectMapAdapter::detect(obj) {
            return PayloadShape::SubjectMap(adapter);
        }
        if let Some(adapter) = SingleSubjectAdapter::detect(obj) {
            return PayloadShape::SingleSubject(adapter);
        }
        PayloadShape::Unrecognized
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadShape::SubjectMap(_) => "subject_map",
            PayloadShape::SingleSubject(_) => "single_subject",
            PayloadShape::Unrecognized => "unrecognized",
        }
    }

    /// Courses described by this shape, in payload order
    pub fn courses(&self, config: &NormalizerConfig) -> Vec<CourseRecord> {
        match self {
            PayloadShape::SubjectMap(adapter) => adapter.courses(config),
            PayloadShape::SingleSubject(adapter) => adapter.courses(config),
            PayloadShape::Unrecognized => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shape_of(value: &Value) -> &'static str {
        PayloadShape::detect(value.as_object().unwrap()).as_str()
    }

    #[test]
    fn test_mapping_shape_wins_over_legacy() {
        let raw = json!({
            "subject": "History",
            "totalClasses": 10,
            "subjectAttendance": {"Math": 90}
        });
        assert_eq!(shape_of(&raw), "subject_map");
    }

    #[test]
    fn test_lowercase_mapping_field() {
        assert_eq!(shape_of(&json!({"subjectattendance": {"Art": "75"}})), "subject_map");
    }

    #[test]
    fn test_mapping_must_be_an_object() {
        assert_eq!(shape_of(&json!({"subjectAttendance": [90, 50]})), "unrecognized");
        assert_eq!(shape_of(&json!({"subjectAttendance": "90"})), "unrecognized");
        assert_eq!(
            shape_of(&json!({"subjectAttendance": null, "subject": "Art"})),
            "single_subject"
        );
    }

    #[test]
    fn test_legacy_requires_non_blank_subject() {
        assert_eq!(shape_of(&json!({"subject": "History"})), "single_subject");
        assert_eq!(shape_of(&json!({"subject": "   "})), "unrecognized");
        assert_eq!(shape_of(&json!({"subject": 12})), "unrecognized");
    }

    #[test]
    fn test_empty_object_is_unrecognized() {
        let raw = json!({});
        let shape = PayloadShape::detect(raw.as_object().unwrap());
        assert_eq!(shape, PayloadShape::Unrecognized);
        assert!(shape.courses(&NormalizerConfig::default()).is_empty());
    }
}
