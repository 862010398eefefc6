//! Legacy single-subject adapter
//!
//! Older payloads describe exactly one course through flat fields whose
//! casing varies between deployments (`totalClasses` vs `totalclasses`).

use crate::coerce::{clamp_percentage, first_count, first_f64, rounded_percentage};
use crate::config::NormalizerConfig;
use crate::types::CourseRecord;
use serde_json::{Map, Value};

use super::CourseAdapter;

pub const SUBJECT_FIELD: &str = "subject";
pub const TOTAL_CLASSES_FIELDS: &[&str] = &["totalclasses", "totalClasses"];
pub const CLASSES_ATTENDED_FIELDS: &[&str] = &["classesattended", "classesAttended"];
pub const OVERALL_PERCENTAGE_FIELDS: &[&str] = &["overallpercentage", "overallPercentage"];

/// Adapter over the flat legacy fields
#[derive(Debug, Clone, PartialEq)]
pub struct SingleSubjectAdapter<'a> {
    subject: &'a str,
    fields: &'a Map<String, Value>,
}

impl<'a> SingleSubjectAdapter<'a> {
    /// Matches when `subject` is a string with non-blank content
    pub fn detect(obj: &'a Map<String, Value>) -> Option<Self> {
        let subject = obj.get(SUBJECT_FIELD)?.as_str()?.trim();
        if subject.is_empty() {
            return None;
        }
        Some(Self {
            subject,
            fields: obj,
        })
    }

    pub fn subject(&self) -> &str {
        self.subject
    }
}

impl CourseAdapter for SingleSubjectAdapter<'_> {
    fn courses(&self, config: &NormalizerConfig) -> Vec<CourseRecord> {
        // Zero values count as absent, so a zero total falls back like a missing one
        let total =
            first_count(self.fields, TOTAL_CLASSES_FIELDS).unwrap_or(config.legacy_default_total);
        let present = first_count(self.fields, CLASSES_ATTENDED_FIELDS).unwrap_or(0);

        let percentage = if present > 0 {
            rounded_percentage(present, total)
        } else {
            first_f64(self.fields, OVERALL_PERCENTAGE_FIELDS).unwrap_or(0.0)
        };

        vec![CourseRecord {
            course_name: self.subject.to_string(),
            present,
            total,
            percentage: clamp_percentage(percentage),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn only_course(raw: Value) -> CourseRecord {
        let courses = SingleSubjectAdapter::detect(raw.as_object().unwrap())
            .unwrap()
            .courses(&NormalizerConfig::default());
        assert_eq!(courses.len(), 1);
        courses.into_iter().next().unwrap()
    }

    fn course(name: &str, present: u32, total: u32, percentage: f64) -> CourseRecord {
        CourseRecord {
            course_name: name.to_string(),
            present,
            total,
            percentage,
        }
    }

    #[test]
    fn test_camel_case_fields() {
        let c = only_course(json!({"subject": "History", "totalClasses": 10, "classesAttended": 8}));
        assert_eq!(c, course("History", 8, 10, 80.0));
    }

    #[test]
    fn test_lowercase_string_fields() {
        let c = only_course(json!({"subject": "Art", "classesattended": "5", "totalclasses": "10"}));
        assert_eq!(c, course("Art", 5, 10, 50.0));
    }

    #[test]
    fn test_missing_total_defaults_to_twenty() {
        let c = only_course(json!({"subject": "Latin", "classesAttended": 15}));
        assert_eq!(c, course("Latin", 15, 20, 75.0));
    }

    #[test]
    fn test_zero_or_garbage_total_defaults_to_twenty() {
        let c = only_course(json!({"subject": "Latin", "totalClasses": 0, "classesAttended": 10}));
        assert_eq!(c, course("Latin", 10, 20, 50.0));

        let c = only_course(json!({"subject": "Latin", "totalClasses": "lots", "classesAttended": 10}));
        assert_eq!(c, course("Latin", 10, 20, 50.0));
    }

    #[test]
    fn test_zero_attended_falls_back_to_overall_percentage() {
        let c = only_course(json!({"subject": "Music", "totalClasses": 12, "overallPercentage": "64.5"}));
        assert_eq!(c, course("Music", 0, 12, 64.5));

        let c = only_course(json!({"subject": "Music", "classesAttended": 0, "overallpercentage": 40}));
        assert_eq!(c, course("Music", 0, 20, 40.0));
    }

    #[test]
    fn test_zero_attended_without_overall_is_zero() {
        let c = only_course(json!({"subject": "Music", "totalClasses": 12}));
        assert_eq!(c, course("Music", 0, 12, 0.0));
    }

    #[test]
    fn test_rounds_derived_percentage_half_up() {
        // 1/8 = 12.5%
        let c = only_course(json!({"subject": "Chem", "totalClasses": 8, "classesAttended": 1}));
        assert_eq!(c.percentage, 13.0);
    }

    #[test]
    fn test_attended_above_total_is_capped_at_one_hundred() {
        let c = only_course(json!({"subject": "Gym", "totalClasses": 10, "classesAttended": 12}));
        assert_eq!(c, course("Gym", 12, 10, 100.0));
    }

    #[test]
    fn test_zero_lowercase_alias_falls_through_to_camel_case() {
        let c = only_course(json!({
            "subject": "Art",
            "totalclasses": 0,
            "totalClasses": 10,
            "classesattended": 0,
            "classesAttended": 8
        }));
        assert_eq!(c, course("Art", 8, 10, 80.0));

        let c = only_course(json!({
            "subject": "Art",
            "totalClasses": 10,
            "overallpercentage": 0,
            "overallPercentage": "45"
        }));
        assert_eq!(c, course("Art", 0, 10, 45.0));
    }

    #[test]
    fn test_subject_is_trimmed() {
        let c = only_course(json!({"subject": "  History ", "totalClasses": 4, "classesAttended": 3}));
        assert_eq!(c.course_name, "History");
    }
}
