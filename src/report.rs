//! Attendance report rendering
//!
//! Presentation only: takes a canonical record and lays it out as text or
//! JSON. No shape detection happens here.

use crate::config::DEFAULT_MINIMUM_ATTENDANCE;
use crate::error::AttendanceError;
use crate::types::{AttendanceRecord, AttendanceStanding, CourseRecord};
use std::fmt::Write;

/// Message shown when the course filter matches nothing
pub const NO_MATCHING_COURSES: &str = "No courses found matching your search.";

const TABLE_HEADERS: [&str; 6] = ["Student ID", "Name", "Course", "Present", "Total", "Attendance"];

/// Output format for a rendered record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    JsonPretty,
}

/// Rendering options
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Case-insensitive course name filter (text output only)
    pub filter: Option<String>,
    /// Overall percentage required to be "above minimum"
    pub minimum_attendance: f64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            filter: None,
            minimum_attendance: DEFAULT_MINIMUM_ATTENDANCE,
        }
    }
}

/// Render a record in the requested format
pub fn render(
    record: &AttendanceRecord,
    format: ReportFormat,
    options: &ReportOptions,
) -> Result<String, AttendanceError> {
    match format {
        ReportFormat::Text => Ok(render_text(record, options)),
        ReportFormat::Json => Ok(serde_json::to_string(record)?),
        ReportFormat::JsonPretty => Ok(serde_json::to_string_pretty(record)?),
    }
}

/// Render the stats block and course table as plain text
pub fn render_text(record: &AttendanceRecord, options: &ReportOptions) -> String {
    let mut out = String::new();

    let who = match (record.student_name(), record.student_id()) {
        ("", "") => "Attendance".to_string(),
        (name, "") => format!("Attendance for {}", name),
        ("", id) => format!("Attendance for {}", id),
        (name, id) => format!("Attendance for {} ({})", name, id),
    };
    let _ = writeln!(out, "{}", who);
    let _ = writeln!(
        out,
        "Last updated: {}",
        record.retrieved_at().format("%Y-%m-%d")
    );
    let _ = writeln!(out);

    let standing = record.standing(options.minimum_attendance);
    let arrow = match standing {
        AttendanceStanding::AboveMinimum => '↑',
        AttendanceStanding::BelowMinimum => '↓',
    };
    let _ = writeln!(
        out,
        "Overall Attendance  {:.1}%  {} {}",
        record.overall_percentage(),
        arrow,
        standing.describe()
    );
    let _ = writeln!(
        out,
        "Total Classes       {}  ({} courses)",
        record.total_classes(),
        record.course_count()
    );
    let _ = writeln!(
        out,
        "Classes Attended    {}  ({} absences)",
        record.classes_attended(),
        record.absences()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Course-wise Attendance");

    let courses = record.filter_courses(options.filter.as_deref().unwrap_or(""));
    if courses.is_empty() {
        let _ = writeln!(out, "{}", NO_MATCHING_COURSES);
        return out;
    }

    let rows: Vec<[String; 6]> = courses
        .iter()
        .map(|course| course_row(record, course))
        .collect();
    write_table(&mut out, &rows);
    out
}

fn course_row(record: &AttendanceRecord, course: &CourseRecord) -> [String; 6] {
    [
        record.student_id().to_string(),
        record.student_name().to_string(),
        course.course_name.clone(),
        course.present.to_string(),
        course.total.to_string(),
        format!("{:.1}% [{}]", course.percentage, course.tier().as_str()),
    ]
}

fn write_table(out: &mut String, rows: &[[String; 6]]) {
    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = TABLE_HEADERS.map(str::to_string);
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
}
