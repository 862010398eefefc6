//! FFI bindings for the attendance normalizer
//!
//! This module lets a non-Rust presentation layer hand a raw response body to
//! the normalizer and receive the canonical record as JSON. All functions use
//! C strings (null-terminated) and return allocated memory that must be freed
//! by the caller using `attendance_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::normalizer::Normalizer;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Normalize a raw attendance response body and return the canonical record JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `attendance_free_string`.
/// - Returns NULL when the body is not JSON; call `attendance_last_error` for the message.
#[no_mangle]
pub unsafe extern "C" fn attendance_normalize_json(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let record = match Normalizer::default().normalize_json(&json_str) {
        Ok(record) => record,
        Err(e) => {
            set_last_error(&e.to_string());
            return ptr::null_mut();
        }
    };

    match serde_json::to_string(&record) {
        Ok(out) => string_to_cstr(&out),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a string returned by this library.
///
/// # Safety
/// - `ptr` must be a pointer returned by an `attendance_*` function, or NULL.
#[no_mangle]
pub unsafe extern "C" fn attendance_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Last error message on this thread, or NULL.
///
/// # Safety
/// - The returned pointer is owned by the library and valid until the next call
///   on this thread. Do not free it.
#[no_mangle]
pub unsafe extern "C" fn attendance_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Library version string.
///
/// # Safety
/// - The returned pointer is static. Do not free it.
#[no_mangle]
pub unsafe extern "C" fn attendance_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NORMALIZER_VERSION;

    #[test]
    fn test_ffi_normalize_json() {
        let json = CString::new(
            r#"[{"name": "Cid", "subject": "Art", "classesattended": "5", "totalclasses": "10"}]"#,
        )
        .unwrap();

        unsafe {
            let result = attendance_normalize_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            let value: serde_json::Value = serde_json::from_str(result_str).unwrap();
            assert_eq!(value["studentName"], "Cid");
            assert_eq!(value["courses"][0]["courseName"], "Art");
            assert_eq!(value["overallPercentage"], 50.0);

            attendance_free_string(result);
        }
    }

    #[test]
    fn test_ffi_odd_shapes_still_normalize() {
        let json = CString::new("[]").unwrap();

        unsafe {
            let result = attendance_normalize_json(json.as_ptr());
            assert!(!result.is_null());

            let result_str = CStr::from_ptr(result).to_str().unwrap();
            assert!(result_str.contains("No course data available"));
            assert!(attendance_last_error().is_null());

            attendance_free_string(result);
        }
    }

    #[test]
    fn test_ffi_error_handling() {
        unsafe {
            let invalid_json = CString::new("not json").unwrap();
            let result = attendance_normalize_json(invalid_json.as_ptr());
            assert!(result.is_null());

            let error = attendance_last_error();
            assert!(!error.is_null());
            let error_str = CStr::from_ptr(error).to_str().unwrap();
            assert!(error_str.starts_with("Invalid JSON"));

            assert!(attendance_normalize_json(ptr::null()).is_null());
        }
    }

    #[test]
    fn test_ffi_version() {
        unsafe {
            let version = attendance_version();
            assert!(!version.is_null());

            let version_str = CStr::from_ptr(version).to_str().unwrap();
            assert_eq!(version_str, NORMALIZER_VERSION);
        }
    }
}
