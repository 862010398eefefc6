//! List envelope handling
//!
//! Some deployments of the attendance service wrap the student object in a
//! one-element array. Only the first element is ever used.

use serde_json::{Map, Value};

/// Unwrap the effective student object from a raw response.
///
/// Arrays yield their first element. An empty array, or anything that is not
/// an object, yields `None` and is treated as an object without fields.
pub fn effective_object(raw: &Value) -> Option<&Map<String, Value>> {
    let candidate = match raw {
        Value::Array(items) => items.first()?,
        other => other,
    };
    candidate.as_object()
}
