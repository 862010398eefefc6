//! Response normalization
//!
//! This module turns a raw attendance-service response into the canonical
//! [`AttendanceRecord`]:
//! 1. Unwrap the list envelope
//! 2. Detect the payload shape and extract courses
//! 3. Aggregate totals (with the zero-total fallback)
//! 4. Substitute a placeholder course when nothing was recognized
//! 5. Copy identity fields and stamp the retrieval time
//!
//! Normalization never fails: unexpected shapes degrade to zero-valued fields.

use crate::adapters::OVERALL_PERCENTAGE_FIELDS;
use crate::coerce::{clamp_percentage, first_f64, first_text, rounded_percentage};
use crate::config::NormalizerConfig;
use crate::error::AttendanceError;
use crate::schema::{effective_object, PayloadShape};
use crate::types::{AttendanceRecord, CourseRecord};
use chrono::{DateTime, Local};
use serde_json::{Map, Value};

pub const NAME_FIELDS: &[&str] = &["name", "Name"];
pub const ID_FIELDS: &[&str] = &["id"];

/// Normalizer for converting raw responses to canonical records
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl Normalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a decoded response, stamping the current local time
    pub fn normalize(&self, raw: &Value) -> AttendanceRecord {
        self.normalize_at(raw, Local::now())
    }

    /// Normalize a decoded response with an explicit retrieval time
    pub fn normalize_at(&self, raw: &Value, retrieved_at: DateTime<Local>) -> AttendanceRecord {
        let empty = Map::new();
        let obj = effective_object(raw).unwrap_or(&empty);

        let shape = PayloadShape::detect(obj);
        let courses = shape.courses(&self.config);
        log::debug!(
            "detected {} payload with {} course(s)",
            shape.as_str(),
            courses.len()
        );

        let (total_classes, classes_attended, overall_percentage) = self.aggregate(obj, &courses);

        AttendanceRecord::new(
            first_text(obj, NAME_FIELDS).unwrap_or_default(),
            first_text(obj, ID_FIELDS).unwrap_or_default(),
            courses,
            total_classes,
            classes_attended,
            overall_percentage,
            retrieved_at,
        )
    }

    /// Parse a JSON response body and normalize it
    pub fn normalize_json(&self, json: &str) -> Result<AttendanceRecord, AttendanceError> {
        let raw: Value = serde_json::from_str(json)?;
        Ok(self.normalize(&raw))
    }

    fn aggregate(&self, obj: &Map<String, Value>, courses: &[CourseRecord]) -> (u32, u32, f64) {
        let summed_total = courses
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.total));
        let classes_attended = courses
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.present));

        // Not a real count: keeps the aggregate denominator non-zero
        let total_classes = if summed_total == 0 {
            self.config.zero_total_fallback
        } else {
            summed_total
        };

        let overall_percentage = if total_classes > 0 {
            rounded_percentage(classes_attended, total_classes)
        } else {
            first_f64(obj, OVERALL_PERCENTAGE_FIELDS).unwrap_or(0.0)
        };

        (
            total_classes,
            classes_attended,
            clamp_percentage(overall_percentage),
        )
    }
}

/// Normalize a decoded response with the default configuration
pub fn normalize(raw: &Value) -> AttendanceRecord {
    Normalizer::default().normalize(raw)
}
