//! Canonical attendance types
//!
//! These are the only shapes downstream code ever sees. Every normalization
//! call builds them fresh; nothing here is updated in place.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Course name used when the payload carried no recognizable course data
pub const PLACEHOLDER_COURSE_NAME: &str = "No course data available";

/// Percentage at or above which a course is in good standing
pub const GOOD_TIER_THRESHOLD: f64 = 95.0;

/// Percentage at or above which a course only needs a warning
pub const WARNING_TIER_THRESHOLD: f64 = 80.0;

/// Attendance for a single course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course_name: String,
    /// Classes attended
    pub present: u32,
    /// Classes held
    pub total: u32,
    /// Attendance rate, 0-100
    pub percentage: f64,
}

impl CourseRecord {
    pub(crate) fn placeholder(percentage: f64) -> Self {
        Self {
            course_name: PLACEHOLDER_COURSE_NAME.to_string(),
            present: 0,
            total: 0,
            percentage,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.total == 0 && self.course_name == PLACEHOLDER_COURSE_NAME
    }

    pub fn tier(&self) -> AttendanceTier {
        AttendanceTier::for_percentage(self.percentage)
    }
}

/// Badge tier for a course percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceTier {
    Good,
    Warning,
    Critical,
}

impl AttendanceTier {
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= GOOD_TIER_THRESHOLD {
            AttendanceTier::Good
        } else if percentage >= WARNING_TIER_THRESHOLD {
            AttendanceTier::Warning
        } else {
            AttendanceTier::Critical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceTier::Good => "good",
            AttendanceTier::Warning => "warning",
            AttendanceTier::Critical => "critical",
        }
    }
}

/// Overall standing against the required minimum attendance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStanding {
    AboveMinimum,
    BelowMinimum,
}

impl AttendanceStanding {
    pub fn describe(&self) -> &'static str {
        match self {
            AttendanceStanding::AboveMinimum => "Above required minimum",
            AttendanceStanding::BelowMinimum => "Below required minimum",
        }
    }
}

/// Canonical attendance record for one query.
///
/// Fields are private: `courses` is never empty and `retrieved_at` is fixed at
/// construction, so the record is read through accessors only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    student_name: String,
    student_id: String,
    courses: Vec<CourseRecord>,
    total_classes: u32,
    classes_attended: u32,
    overall_percentage: f64,
    retrieved_at: DateTime<Local>,
}

impl AttendanceRecord {
    /// Assemble a record; an empty course list is replaced by the placeholder course
    pub(crate) fn new(
        student_name: String,
        student_id: String,
        courses: Vec<CourseRecord>,
        total_classes: u32,
        classes_attended: u32,
        overall_percentage: f64,
        retrieved_at: DateTime<Local>,
    ) -> Self {
        let courses = if courses.is_empty() {
            vec![CourseRecord::placeholder(overall_percentage)]
        } else {
            courses
        };

        Self {
            student_name,
            student_id,
            courses,
            total_classes,
            classes_attended,
            overall_percentage,
            retrieved_at,
        }
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn courses(&self) -> &[CourseRecord] {
        &self.courses
    }

    pub fn total_classes(&self) -> u32 {
        self.total_classes
    }

    pub fn classes_attended(&self) -> u32 {
        self.classes_attended
    }

    pub fn overall_percentage(&self) -> f64 {
        self.overall_percentage
    }

    pub fn retrieved_at(&self) -> DateTime<Local> {
        self.retrieved_at
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Classes missed across all courses
    pub fn absences(&self) -> u32 {
        self.total_classes.saturating_sub(self.classes_attended)
    }

    pub fn standing(&self, minimum: f64) -> AttendanceStanding {
        if self.overall_percentage >= minimum {
            AttendanceStanding::AboveMinimum
        } else {
            AttendanceStanding::BelowMinimum
        }
    }

    /// Courses whose name contains `query`, case-insensitively; an empty query matches all
    pub fn filter_courses(&self, query: &str) -> Vec<&CourseRecord> {
        let needle = query.trim().to_lowercase();
        self.courses
            .iter()
            .filter(|c| needle.is_empty() || c.course_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// True when the payload carried no course data
    pub fn has_course_data(&self) -> bool {
        !self.courses.iter().all(CourseRecord::is_placeholder)
    }
}
