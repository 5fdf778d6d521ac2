//! API client for the KYC onboarding backend.
//!
//! # Overview
//! `KycApiClient` exposes one method per backend endpoint (form metadata plus
//! the step-wise save calls) and returns each response body unchanged as a
//! `serde_json::Value`.
//!
//! # Design
//! - `KycClient` is the sans-IO layer: `build_*` methods produce
//!   `HttpRequest` values and `parse_response` consumes `HttpResponse`
//!   values. The FFI crate exposes this layer to hosts that do their own IO.
//! - `Transport` executes the round-trip. `UreqTransport` is the default;
//!   tests inject their own.
//! - `KycConfig` is built once and is immutable afterwards.
//! - No retries, caching or validation. Failures come back as `ApiError`.

pub mod api;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod transport;

pub use api::KycApiClient;
pub use client::KycClient;
pub use config::{KycConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use endpoint::Endpoint;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
