//! C-ABI wrapper around `kyc-core`.
//!
//! # Overview
//! Exposes the KYC client's request builders and response parser through
//! `extern "C"` functions so any language with a C FFI can talk to the
//! backend with its own HTTP stack.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One `kyc_build_*` per endpoint mirrors the core API. Payloads are passed
//!   as JSON C strings.
//! - Responses from every endpoint are unwrapped the same way, so there is a
//!   single `kyc_parse_response` returning an `FfiKycResult`.
//! - The C caller owns all returned pointers and must call the matching
//!   `kyc_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::time::Duration;

use kyc_core::error::ApiError;
use kyc_core::http::{HttpRequest, HttpResponse};
use kyc_core::{KycClient, KycConfig};
use serde_json::Value;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url`.
///
/// `timeout_ms` of 0 selects the default of 15000 ms. Returns null if
/// `base_url` is null or not UTF-8. The caller must free the returned pointer
/// with `kyc_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_client_new(base_url: *const c_char, timeout_ms: u64) -> *mut FfiKycClient {
    catch_unwind(|| {
        let Some(url) = (unsafe { c_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let config = KycConfig::new(url).with_timeout(Duration::from_millis(timeout_ms));
        Box::into_raw(Box::new(FfiKycClient {
            inner: KycClient::new(config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `kyc_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_client_free(client: *mut FfiKycClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Borrow a C string as `&str`. Null or non-UTF-8 input yields `None`.
///
/// # Safety
/// `s` must be null or point to a NUL-terminated string that outlives `'a`.
unsafe fn c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(s) }.to_str().ok()
}

fn build_metadata(
    client: *const FfiKycClient,
    build: impl FnOnce(&KycClient) -> HttpRequest + std::panic::UnwindSafe,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(build(&client.inner))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Shared body of the POST builders: parse `payload_json` and hand it to
/// `build`. Null arguments, invalid JSON and serialization failures all
/// yield null.
fn build_save(
    client: *const FfiKycClient,
    payload_json: *const c_char,
    build: impl FnOnce(&KycClient, &Value) -> Result<HttpRequest, ApiError>
        + std::panic::UnwindSafe,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let Some(raw) = (unsafe { c_str(payload_json) }) else {
            return std::ptr::null_mut();
        };
        let Ok(payload) = serde_json::from_str::<Value>(raw) else {
            return std::ptr::null_mut();
        };
        let client = unsafe { &*client };
        match build(&client.inner, &payload) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `GET /types`. Returns null if `client` is null.
/// The caller must free the returned pointer with `kyc_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_get_types(client: *const FfiKycClient) -> *mut FfiHttpRequest {
    build_metadata(client, |c| c.build_get_types())
}

/// Build `GET /steps`. Returns null if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_get_steps(client: *const FfiKycClient) -> *mut FfiHttpRequest {
    build_metadata(client, |c| c.build_get_steps())
}

/// Build `GET /fields?type_key=...`.
///
/// Returns null if `client` or `type_key` is null or `type_key` is not UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_get_fields(
    client: *const FfiKycClient,
    type_key: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        let Some(type_key) = (unsafe { c_str(type_key) }) else {
            return std::ptr::null_mut();
        };
        build_metadata(client, |c| c.build_get_fields(type_key))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build `POST /identity` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_identity(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_identity(p))
}

/// Build `POST /address` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_address(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_address(p))
}

/// Build `POST /promoter` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_promoter(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_promoter(p))
}

/// Build `POST /bank` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_bank(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_bank(p))
}

/// Build `POST /trading` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_trading(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_trading(p))
}

/// Build `POST /additional` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_additional(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_additional(p))
}

/// Build `POST /kyc/save` (full draft) with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_save_kyc(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_save_kyc(p))
}

/// Build `POST /payment/save` with `payload_json` as the body.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_build_create_payment(
    client: *const FfiKycClient,
    payload_json: *const c_char,
) -> *mut FfiHttpRequest {
    build_save(client, payload_json, |c, p| c.build_create_payment(p))
}

// ---------------------------------------------------------------------------
// Parse response
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// treated as empty; a body that is not UTF-8 is rejected.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .map_err(|e| {
                ApiError::SerializationError(format!("response body is not UTF-8: {e}"))
            })?
            .to_string()
    };
    Ok(HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    })
}

/// Unwrap the response to any `kyc_build_*` request.
///
/// Never returns null. The caller must free the result with
/// `kyc_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_parse_response(
    client: *const FfiKycClient,
    response: *const FfiHttpResponse,
) -> *mut FfiKycResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiKycResult::null_arg("client");
        }
        if response.is_null() {
            return FfiKycResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let parsed = ffi_response_to_core(resp).and_then(|r| client.inner.parse_response(r));
        match parsed {
            Ok(value) => FfiKycResult::ok(value),
            Err(e) => FfiKycResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiKycResult::panic("panic in kyc_parse_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `kyc_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let slice = std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize);
            let headers = unsafe { Box::from_raw(slice) };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiKycResult` returned by `kyc_parse_response`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_free_result(result: *mut FfiKycResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.body_json);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn kyc_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    fn new_client() -> *mut FfiKycClient {
        let url = CString::new("http://localhost:26301").unwrap();
        kyc_client_new(url.as_ptr(), 0)
    }

    fn string_at(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
    }

    fn headers_of(req: &FfiHttpRequest) -> Vec<(String, String)> {
        let headers = unsafe { std::slice::from_raw_parts(req.headers, req.headers_len as usize) };
        headers
            .iter()
            .map(|h| (string_at(h.key), string_at(h.value)))
            .collect()
    }

    #[test]
    fn client_new_and_free() {
        let client = new_client();
        assert!(!client.is_null());
        kyc_client_free(client);
    }

    #[test]
    fn client_new_null_returns_null() {
        let client = kyc_client_new(std::ptr::null(), 0);
        assert!(client.is_null());
    }

    #[test]
    fn client_free_null_is_safe() {
        kyc_client_free(std::ptr::null_mut());
    }

    #[test]
    fn build_get_types_returns_correct_request() {
        let client = new_client();
        let req = kyc_build_get_types(client);
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(string_at(req_ref.url), "http://localhost:26301/types");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.timeout_ms, 15_000);
        assert_eq!(
            headers_of(req_ref),
            vec![("accept".to_string(), "application/json".to_string())]
        );

        kyc_free_request(req);
        kyc_client_free(client);
    }

    #[test]
    fn custom_timeout_is_carried() {
        let url = CString::new("http://localhost:26301").unwrap();
        let client = kyc_client_new(url.as_ptr(), 2_500);
        let req = kyc_build_get_steps(client);
        assert_eq!(unsafe { &*req }.timeout_ms, 2_500);

        kyc_free_request(req);
        kyc_client_free(client);
    }

    #[test]
    fn build_get_types_null_client_returns_null() {
        let req = kyc_build_get_types(std::ptr::null());
        assert!(req.is_null());
    }

    #[test]
    fn build_get_fields_encodes_type_key() {
        let client = new_client();
        let key = CString::new("sole proprietor").unwrap();
        let req = kyc_build_get_fields(client, key.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(
            string_at(req_ref.url),
            "http://localhost:26301/fields?type_key=sole%20proprietor"
        );

        kyc_free_request(req);
        kyc_client_free(client);
    }

    #[test]
    fn build_get_fields_null_key_returns_null() {
        let client = new_client();
        assert!(kyc_build_get_fields(client, std::ptr::null()).is_null());
        kyc_client_free(client);
    }

    #[test]
    fn build_save_identity_produces_post_with_json_body() {
        let client = new_client();
        let payload = CString::new(r#"{"pan":"ABCDE1234F","full_name":"Asha Rao"}"#).unwrap();
        let req = kyc_build_save_identity(client, payload.as_ptr());
        assert!(!req.is_null());

        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        assert_eq!(string_at(req_ref.url), "http://localhost:26301/identity");
        assert_eq!(req_ref.headers_len, 2);
        assert!(headers_of(req_ref)
            .contains(&("content-type".to_string(), "application/json".to_string())));

        let body: Value = serde_json::from_str(&string_at(req_ref.body)).unwrap();
        assert_eq!(body["pan"], "ABCDE1234F");
        assert_eq!(body["full_name"], "Asha Rao");

        kyc_free_request(req);
        kyc_client_free(client);
    }

    #[test]
    fn every_save_builder_targets_its_path() {
        let client = new_client();
        let payload = CString::new(r#"{"k":1}"#).unwrap();
        type Builder = extern "C" fn(*const FfiKycClient, *const c_char) -> *mut FfiHttpRequest;
        let builders: [(Builder, &str); 8] = [
            (kyc_build_save_identity, "/identity"),
            (kyc_build_save_address, "/address"),
            (kyc_build_save_promoter, "/promoter"),
            (kyc_build_save_bank, "/bank"),
            (kyc_build_save_trading, "/trading"),
            (kyc_build_save_additional, "/additional"),
            (kyc_build_save_kyc, "/kyc/save"),
            (kyc_build_create_payment, "/payment/save"),
        ];
        for (build, path) in builders {
            let req = build(client, payload.as_ptr());
            assert!(!req.is_null(), "{path}");
            let req_ref = unsafe { &*req };
            assert!(matches!(req_ref.method, FfiHttpMethod::Post));
            assert_eq!(string_at(req_ref.url), format!("http://localhost:26301{path}"));
            kyc_free_request(req);
        }
        kyc_client_free(client);
    }

    #[test]
    fn build_save_invalid_json_returns_null() {
        let client = new_client();
        let payload = CString::new("{not json").unwrap();
        assert!(kyc_build_save_bank(client, payload.as_ptr()).is_null());
        assert!(kyc_build_save_bank(client, std::ptr::null()).is_null());
        kyc_client_free(client);
    }

    #[test]
    fn parse_success_returns_body_json() {
        let client = new_client();
        let body = CString::new(r#"{"types":[{"key":"individual","fee":49900}]}"#).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = kyc_parse_response(client, &resp);
        assert!(!result.is_null());

        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert!(r.error_message.is_null());
        let value: Value = serde_json::from_str(&string_at(r.body_json)).unwrap();
        assert_eq!(value["types"][0]["fee"], 49900);

        kyc_free_result(result);
        kyc_client_free(client);
    }

    #[test]
    fn parse_empty_body_is_json_null() {
        let client = new_client();
        let resp = FfiHttpResponse {
            status: 204,
            body: std::ptr::null(),
        };
        let result = kyc_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Ok);
        assert_eq!(string_at(r.body_json), "null");

        kyc_free_result(result);
        kyc_client_free(client);
    }

    #[test]
    fn parse_non_utf8_body_is_rejected() {
        let client = new_client();
        let body = CString::new(vec![b'"', 0xff, 0xfe, b'"']).unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = kyc_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Serialization);
        assert!(string_at(r.error_message).contains("not UTF-8"));
        assert!(r.body_json.is_null());

        kyc_free_result(result);
        kyc_client_free(client);
    }

    #[test]
    fn parse_server_error_sets_status() {
        let client = new_client();
        let body = CString::new("internal error").unwrap();
        let resp = FfiHttpResponse {
            status: 500,
            body: body.as_ptr(),
        };
        let result = kyc_parse_response(client, &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::Http);
        assert_eq!(r.http_status, 500);
        assert_eq!(string_at(r.error_message), "HTTP 500: internal error");
        assert!(r.body_json.is_null());

        kyc_free_result(result);
        kyc_client_free(client);
    }

    #[test]
    fn parse_null_client_returns_null_arg() {
        let body = CString::new("[]").unwrap();
        let resp = FfiHttpResponse {
            status: 200,
            body: body.as_ptr(),
        };
        let result = kyc_parse_response(std::ptr::null(), &resp);
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);
        assert_eq!(string_at(r.error_message), "null argument: client");

        kyc_free_result(result);
    }

    #[test]
    fn parse_null_response_returns_null_arg() {
        let client = new_client();
        let result = kyc_parse_response(client, std::ptr::null());
        let r = unsafe { &*result };
        assert_eq!(r.error_code, FfiErrorCode::NullArg);

        kyc_free_result(result);
        kyc_client_free(client);
    }

    #[test]
    fn free_request_null_is_safe() {
        kyc_free_request(std::ptr::null_mut());
    }

    #[test]
    fn free_result_null_is_safe() {
        kyc_free_result(std::ptr::null_mut());
    }

    #[test]
    fn free_string_null_is_safe() {
        kyc_free_string(std::ptr::null_mut());
    }
}
