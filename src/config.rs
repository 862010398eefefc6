//! Configuration
//!
//! The magic numbers carried over from the legacy attendance screen live here
//! as named constants, surfaced through [`NormalizerConfig`] so a deployment
//! can override them without touching the normalization rules.

use crate::error::AttendanceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Classes assumed per course when the payload only carries a percentage
pub const DEFAULT_CLASSES_PER_COURSE: u32 = 20;

/// Aggregate total substituted when no course contributes any classes
pub const ZERO_TOTAL_FALLBACK: u32 = 100;

/// Class count assumed for a legacy single-subject payload without a usable total
pub const LEGACY_DEFAULT_TOTAL: u32 = 20;

/// Overall percentage at or above which a student meets the attendance requirement
pub const DEFAULT_MINIMUM_ATTENDANCE: f64 = 80.0;

/// Request timeout for the attendance service
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the service endpoint
pub const ENDPOINT_ENV: &str = "ATTENDANCE_ENDPOINT";

/// Environment variable overriding the request timeout
pub const TIMEOUT_ENV: &str = "ATTENDANCE_TIMEOUT_SECS";

/// Tunables for the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub classes_per_course: u32,
    pub zero_total_fallback: u32,
    pub legacy_default_total: u32,
    pub minimum_attendance: f64,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            classes_per_course: DEFAULT_CLASSES_PER_COURSE,
            zero_total_fallback: ZERO_TOTAL_FALLBACK,
            legacy_default_total: LEGACY_DEFAULT_TOTAL,
            minimum_attendance: DEFAULT_MINIMUM_ATTENDANCE,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<(), AttendanceError> {
        if self.classes_per_course == 0 {
            return Err(AttendanceError::Config(
                "classes_per_course must be greater than 0".to_string(),
            ));
        }
        if self.legacy_default_total == 0 {
            return Err(AttendanceError::Config(
                "legacy_default_total must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.minimum_attendance) {
            return Err(AttendanceError::Config(format!(
                "minimum_attendance must be within 0-100, got {}",
                self.minimum_attendance
            )));
        }
        Ok(())
    }
}

/// Settings for the HTTP round trip to the attendance service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Endpoint receiving the `{"studentName": ...}` POST
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Self::default()
        }
    }
}

/// Complete configuration as read from a JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub normalizer: NormalizerConfig,
}

impl AppConfig {
    /// Parse configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> Result<Self, AttendanceError> {
        let config: AppConfig = serde_json::from_str(json)
            .map_err(|e| AttendanceError::Config(format!("failed to parse config: {}", e)))?;
        config.normalizer.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, AttendanceError> {
        match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                log::debug!("loaded configuration from {}", path.display());
                Self::from_json(&contents)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply `ATTENDANCE_ENDPOINT` / `ATTENDANCE_TIMEOUT_SECS` from the process environment
    pub fn with_env_overrides(self) -> Result<Self, AttendanceError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, AttendanceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.client.endpoint = Some(endpoint.trim().to_string());
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.client.timeout_secs = raw.trim().parse().map_err(|_| {
                AttendanceError::Config(format!("{} must be a whole number, got {:?}", TIMEOUT_ENV, raw))
            })?;
        }
        Ok(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, AttendanceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
