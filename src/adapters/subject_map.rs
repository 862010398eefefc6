//! Subject mapping adapter
//!
//! Newer payloads carry `subjectAttendance`, an object from course name to
//! attendance percentage. Class counts are not reported, so each course is
//! assumed to have held a fixed number of classes.

use crate::coerce::{clamp_percentage, round_half_up, to_f64};
use crate::config::NormalizerConfig;
use crate::types::CourseRecord;
use serde_json::{Map, Value};

use super::CourseAdapter;

/// Field names carrying the course mapping, in lookup order
pub const SUBJECT_MAP_FIELDS: &[&str] = &["subjectAttendance", "subjectattendance"];

/// Adapter over a `subjectAttendance` mapping
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMapAdapter<'a> {
    entries: &'a Map<String, Value>,
}

impl<'a> SubjectMapAdapter<'a> {
    pub fn detect(obj: &'a Map<String, Value>) -> Option<Self> {
        SUBJECT_MAP_FIELDS
            .iter()
            .find_map(|key| obj.get(*key).and_then(Value::as_object))
            .map(|entries| Self { entries })
    }
}

impl CourseAdapter for SubjectMapAdapter<'_> {
    fn courses(&self, config: &NormalizerConfig) -> Vec<CourseRecord> {
        let total = config.classes_per_course;

        self.entries
            .iter()
            .filter_map(|(name, value)| {
                if name.trim().is_empty() {
                    log::debug!("skipping subject mapping entry with a blank course name");
                    return None;
                }

                let percentage = clamp_percentage(to_f64(Some(value)).unwrap_or(0.0));
                let present = round_half_up(percentage / 100.0 * total as f64) as u32;

                Some(CourseRecord {
                    course_name: name.clone(),
                    present,
                    total,
                    percentage,
                })
            })
            .collect()
    }
}
