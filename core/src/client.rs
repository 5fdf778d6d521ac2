//! Stateless HTTP request builder and response parser for the KYC API.
//!
//! # Design
//! `KycClient` holds only its `KycConfig` and carries no mutable state
//! between calls. Every operation has a `build_*` method that produces an
//! `HttpRequest`; all operations share `parse_response`, because the backend
//! body is forwarded unchanged whatever the endpoint. The caller executes the
//! HTTP round-trip in between.

use serde::Serialize;
use serde_json::Value;

use crate::config::KycConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the KYC API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct KycClient {
    config: KycConfig,
}

impl KycClient {
    pub fn new(config: KycConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KycConfig {
        &self.config
    }

    pub fn build_get_types(&self) -> HttpRequest {
        self.build_get(Endpoint::Types, None)
    }

    pub fn build_get_steps(&self) -> HttpRequest {
        self.build_get(Endpoint::Steps, None)
    }

    /// `GET /fields?type_key=<type_key>`, with the key percent-encoded.
    pub fn build_get_fields(&self, type_key: &str) -> HttpRequest {
        let query = format!("type_key={}", urlencoding::encode(type_key));
        self.build_get(Endpoint::Fields, Some(&query))
    }

    pub fn build_save_identity<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Identity, payload)
    }

    pub fn build_save_address<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Address, payload)
    }

    pub fn build_save_promoter<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Promoter, payload)
    }

    pub fn build_save_bank<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Bank, payload)
    }

    pub fn build_save_trading<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Trading, payload)
    }

    pub fn build_save_additional<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Additional, payload)
    }

    pub fn build_save_kyc<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Kyc, payload)
    }

    pub fn build_create_payment<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        self.build_post(Endpoint::Payment, payload)
    }

    /// Unwrap a response body.
    ///
    /// Any 2xx status succeeds. A JSON body comes back as that JSON value, an
    /// empty body as `Value::Null` and anything else as `Value::String` with
    /// the raw text. Other statuses become `ApiError::HttpError` with the raw
    /// body attached.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::HttpError {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body).unwrap_or(Value::String(response.body)))
    }

    fn build_get(&self, endpoint: Endpoint, query: Option<&str>) -> HttpRequest {
        let mut url = self.url(endpoint);
        if let Some(query) = query {
            url.push('?');
            url.push_str(query);
        }
        HttpRequest {
            method: endpoint.method(),
            url,
            headers: vec![("accept".to_string(), JSON.to_string())],
            body: None,
            timeout: self.config.timeout(),
        }
    }

    fn build_post<P: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        payload: &P,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: endpoint.method(),
            url: self.url(endpoint),
            headers: vec![
                ("accept".to_string(), JSON.to_string()),
                ("content-type".to_string(), JSON.to_string()),
            ],
            body: Some(body),
            timeout: self.config.timeout(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.config.base_url(), endpoint.path())
    }
}
