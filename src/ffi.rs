//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API so host editors written in other
//! languages can run the export pipeline.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use crate::render::{to_json, JsonFormat};
use crate::{compose, export_to_file, extract_titles};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct TocpdfResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `tocpdf_free_result`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `tocpdf_free_result`.
    pub error: *mut c_char,
}

impl TocpdfResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

unsafe fn read_str<'a>(value: *const c_char, name: &str) -> Result<&'a str, TocpdfResult> {
    if value.is_null() {
        return Err(TocpdfResult::error(format!("{} cannot be null", name)));
    }
    CStr::from_ptr(value)
        .to_str()
        .map_err(|_| TocpdfResult::error(format!("Invalid UTF-8 {}", name.to_lowercase())))
}

/// Export editor HTML to `document.pdf` in `dir`.
///
/// On success `data` holds the path of the written file.
///
/// # Safety
///
/// `html` and `dir` must be valid null-terminated UTF-8 strings.
/// The returned result must be freed with `tocpdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn tocpdf_export_to_file(
    html: *const c_char,
    dir: *const c_char,
) -> TocpdfResult {
    let html = match read_str(html, "HTML") {
        Ok(s) => s,
        Err(e) => return e,
    };
    let dir = match read_str(dir, "Directory") {
        Ok(s) => s,
        Err(e) => return e,
    };

    match export_to_file(html, dir) {
        Ok(path) => TocpdfResult::success(path.to_string_lossy().into_owned()),
        Err(e) => TocpdfResult::error(e.to_string()),
    }
}

/// Compose editor HTML and return the document description as JSON.
///
/// # Safety
///
/// `html` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `tocpdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn tocpdf_to_json(html: *const c_char, pretty: bool) -> TocpdfResult {
    let html = match read_str(html, "HTML") {
        Ok(s) => s,
        Err(e) => return e,
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    match compose(html).and_then(|doc| to_json(&doc, format)) {
        Ok(json) => TocpdfResult::success(json),
        Err(e) => TocpdfResult::error(e.to_string()),
    }
}

/// Extract the numbered heading outline as a JSON array.
///
/// # Safety
///
/// `html` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `tocpdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn tocpdf_extract_titles(html: *const c_char) -> TocpdfResult {
    let html = match read_str(html, "HTML") {
        Ok(s) => s,
        Err(e) => return e,
    };

    match serde_json::to_string(&extract_titles(html)) {
        Ok(json) => TocpdfResult::success(json),
        Err(e) => TocpdfResult::error(e.to_string()),
    }
}

/// Free a result returned by any tocpdf function.
///
/// # Safety
///
/// The `result` must have been returned by a tocpdf function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn tocpdf_free_result(result: TocpdfResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn take(result: TocpdfResult) -> (bool, String) {
        let ptr = if result.success {
            result.data
        } else {
            result.error
        };
        let text = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        let success = result.success;
        unsafe { tocpdf_free_result(result) };
        (success, text)
    }

    #[test]
    fn test_null_html() {
        let (ok, message) = take(unsafe { tocpdf_to_json(ptr::null(), true) });
        assert!(!ok);
        assert_eq!(message, "HTML cannot be null");
    }

    #[test]
    fn test_extract_titles_json() {
        let html = CString::new("<h1>A</h1><h2>B</h2>").unwrap();
        let (ok, json) = take(unsafe { tocpdf_extract_titles(html.as_ptr()) });
        assert!(ok);
        assert!(json.contains("\"1. A\""));
        assert!(json.contains("\"2. B\""));
    }

    #[test]
    fn test_empty_content_error() {
        let html = CString::new("").unwrap();
        let (ok, message) = take(unsafe { tocpdf_to_json(html.as_ptr(), false) });
        assert!(!ok);
        assert!(message.contains("empty"));
    }
}
