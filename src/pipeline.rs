//! Pipeline orchestration
//!
//! This module ties a raw payload source to the normalizer. It is the only
//! place that reports outcomes: a loaded record, or a boundary failure.

use crate::client::{validate_student_name, AttendanceClient, RawSource};
use crate::config::AppConfig;
use crate::error::AttendanceError;
use crate::normalizer::Normalizer;
use crate::types::AttendanceRecord;

/// Fetch and normalize one student's attendance using the given configuration.
///
/// # Example
/// ```ignore
/// let config = AppConfig::load(None)?.with_env_overrides()?;
/// let record = fetch_attendance(&config, "Alice")?;
/// println!("{}% overall", record.overall_percentage());
/// ```
pub fn fetch_attendance(
    config: &AppConfig,
    student_name: &str,
) -> Result<AttendanceRecord, AttendanceError> {
    let student_name = validate_student_name(student_name)?;
    let client = AttendanceClient::new(&config.client)?;
    let processor = AttendanceProcessor::new(client, Normalizer::new(config.normalizer.clone()));
    processor.fetch(student_name)
}

/// Processor pairing a payload source with a normalizer.
///
/// Each call to [`fetch`](Self::fetch) produces a brand-new record; nothing
/// from a previous query is kept.
pub struct AttendanceProcessor<S> {
    source: S,
    normalizer: Normalizer,
}

impl<S: RawSource> AttendanceProcessor<S> {
    pub fn new(source: S, normalizer: Normalizer) -> Self {
        Self { source, normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Validate the name, fetch the raw payload and normalize it
    pub fn fetch(&self, student_name: &str) -> Result<AttendanceRecord, AttendanceError> {
        let name = validate_student_name(student_name).inspect_err(|_| {
            log::warn!("attendance query rejected: student name is blank");
        })?;

        match self.source.fetch_raw(name) {
            Ok(raw) => {
                let record = self.normalizer.normalize(&raw);
                log::info!(
                    "attendance loaded for {:?}: {} course(s), {}% overall",
                    name,
                    record.course_count(),
                    record.overall_percentage()
                );
                Ok(record)
            }
            Err(e) => {
                log::warn!("attendance query for {:?} failed: {}", name, e);
                Err(e)
            }
        }
    }
}
