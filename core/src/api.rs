//! `KycApiClient`: one blocking method per backend endpoint.
//!
//! Each method builds the request with `KycClient`, hands it to the
//! `Transport` and unwraps the response. Errors propagate unchanged.

use serde::Serialize;
use serde_json::Value;

use crate::client::KycClient;
use crate::config::KycConfig;
use crate::error::ApiError;
use crate::http::HttpRequest;
use crate::transport::{Transport, UreqTransport};

/// Client for the KYC onboarding backend.
///
/// Construct once and share; it is `Clone + Send + Sync` whenever the
/// transport is, and concurrent calls are independent.
#[derive(Clone)]
pub struct KycApiClient<T = UreqTransport> {
    client: KycClient,
    transport: T,
}

impl KycApiClient<UreqTransport> {
    pub fn new(config: KycConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: Transport> KycApiClient<T> {
    pub fn with_transport(config: KycConfig, transport: T) -> Self {
        Self {
            client: KycClient::new(config),
            transport,
        }
    }

    pub fn config(&self) -> &KycConfig {
        self.client.config()
    }

    /// Top-level onboarding types and fees.
    pub fn get_types(&self) -> Result<Value, ApiError> {
        self.send(self.client.build_get_types())
    }

    pub fn get_steps(&self) -> Result<Value, ApiError> {
        self.send(self.client.build_get_steps())
    }

    /// Fields for `type_key`, merged with that type's overrides by the backend.
    pub fn get_fields(&self, type_key: &str) -> Result<Value, ApiError> {
        self.send(self.client.build_get_fields(type_key))
    }

    pub fn save_identity<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_identity(payload)?)
    }

    pub fn save_address<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_address(payload)?)
    }

    pub fn save_promoter<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_promoter(payload)?)
    }

    pub fn save_bank<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_bank(payload)?)
    }

    pub fn save_trading<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_trading(payload)?)
    }

    pub fn save_additional<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_additional(payload)?)
    }

    /// Save the full KYC draft.
    pub fn save_kyc<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_save_kyc(payload)?)
    }

    pub fn create_payment<P: Serialize + ?Sized>(&self, payload: &P) -> Result<Value, ApiError> {
        self.send(self.client.build_create_payment(payload)?)
    }

    fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let response = self.transport.execute(request)?;
        self.client.parse_response(response)
    }
}
