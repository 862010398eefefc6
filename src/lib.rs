//! Attendance Normalizer - canonical attendance records from a drifting reporting service
//!
//! The remote attendance service answers in more than one shape (a legacy
//! single-subject shape and a newer subject-to-percentage mapping, with
//! inconsistent field casing). This crate absorbs that drift at one boundary:
//! envelope unwrapping → shape detection → course extraction → aggregation →
//! canonical record.
//!
//! ## Modules
//!
//! - **Normalizer**: pure `serde_json::Value` → [`AttendanceRecord`] conversion
//! - **Client / Pipeline**: the HTTP round trip that supplies the raw payload
//! - **Report**: text and JSON rendering of a canonical record

pub mod adapters;
pub mod client;
pub mod coerce;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use client::{AttendanceClient, RawSource};
pub use config::{AppConfig, ClientConfig, NormalizerConfig};
pub use error::AttendanceError;
pub use normalizer::{normalize, Normalizer};
pub use pipeline::{fetch_attendance, AttendanceProcessor};
pub use schema::PayloadShape;
pub use types::{AttendanceRecord, AttendanceStanding, AttendanceTier, CourseRecord};

/// Crate version reported by the CLI and FFI
pub const NORMALIZER_VERSION: &str = env!("CARGO_PKG_VERSION");
