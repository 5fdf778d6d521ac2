//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Response bodies cross the boundary as
//! JSON text, so there is a single result shape for every endpoint.

use std::ffi::CString;
use std::os::raw::c_char;

use kyc_core::error::ApiError;
use kyc_core::http::HttpMethod;
use serde_json::Value;

/// Opaque handle to a `KycClient`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiKycClient {
    pub(crate) inner: kyc_core::KycClient,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// `url` is absolute and includes the query string. The host must abort the
/// exchange after `timeout_ms` milliseconds.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    pub timeout_ms: u64,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    ///
    /// Returns null if any string contains an interior NUL byte.
    pub(crate) fn from_core(req: kyc_core::HttpRequest) -> *mut Self {
        let Ok(url) = CString::new(req.url) else {
            return std::ptr::null_mut();
        };
        let body = match req.body.map(CString::new) {
            Some(Ok(b)) => Some(b),
            Some(Err(_)) => return std::ptr::null_mut(),
            None => None,
        };
        let headers: Result<Vec<(CString, CString)>, _> = req
            .headers
            .into_iter()
            .map(|(k, v)| Ok::<_, std::ffi::NulError>((CString::new(k)?, CString::new(v)?)))
            .collect();
        let Ok(headers) = headers else {
            return std::ptr::null_mut();
        };

        let headers_len = headers.len() as u32;
        let headers = if headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: k.into_raw(),
                    value: v.into_raw(),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: url.into_raw(),
            headers,
            headers_len,
            body: body.map_or(std::ptr::null_mut(), CString::into_raw),
            timeout_ms: req.timeout.as_millis() as u64,
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this after executing a request and passes a
/// pointer to `kyc_parse_response`. The FFI layer reads but does not free
/// these fields. `body` must be UTF-8; anything else is reported as
/// `FfiErrorCode::Serialization`.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiKycResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    Timeout = 2,
    Transport = 3,
    Serialization = 4,
    Panic = 5,
    NullArg = 6,
}

/// Result envelope for `kyc_parse_response`.
///
/// On success `error_code` is `Ok`, `error_message` is null and `body_json`
/// holds the response body re-encoded as JSON (`null` for an empty body, a
/// JSON string for a non-JSON body). On failure `body_json` is null and
/// `error_message` describes the failure; `http_status` is set for `Http`.
#[repr(C)]
pub struct FfiKycResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub body_json: *mut c_char,
}

impl FfiKycResult {
    pub(crate) fn ok(value: Value) -> *mut Self {
        let body_json = match CString::new(value.to_string()) {
            Ok(s) => s.into_raw(),
            Err(_) => return Self::error(FfiErrorCode::Serialization, 0, "response contains NUL"),
        };
        Box::into_raw(Box::new(FfiKycResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            body_json,
        }))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (code, status) = match &err {
            ApiError::HttpError { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Timeout(_) => (FfiErrorCode::Timeout, 0),
            ApiError::TransportError(_) => (FfiErrorCode::Transport, 0),
            ApiError::SerializationError(_) => (FfiErrorCode::Serialization, 0),
        };
        Self::error(code, status, &err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, &format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, 0, msg)
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: &str) -> *mut Self {
        let message = CString::new(msg.replace('\0', "")).unwrap_or_default();
        Box::into_raw(Box::new(FfiKycResult {
            error_code,
            error_message: message.into_raw(),
            http_status,
            body_json: std::ptr::null_mut(),
        }))
    }
}
