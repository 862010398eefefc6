//! Attendance payload schema
//!
//! The reporting service has no published contract. This module names the
//! payload shapes seen in the wild and decides which one a response uses.

mod envelope;
mod shape;

pub use envelope::*;
pub use shape::*;
