//! The backend's endpoint table.

use crate::http::HttpMethod;

/// One backend endpoint. Every client operation maps to exactly one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Top-level onboarding types and their fees.
    Types,
    /// Step metadata.
    Steps,
    /// Fields for a type, base fields merged with per-type overrides.
    Fields,
    Identity,
    Address,
    Promoter,
    Bank,
    Trading,
    Additional,
    /// Full KYC draft.
    Kyc,
    /// Payment creation.
    Payment,
}

impl Endpoint {
    pub const ALL: [Endpoint; 11] = [
        Endpoint::Types,
        Endpoint::Steps,
        Endpoint::Fields,
        Endpoint::Identity,
        Endpoint::Address,
        Endpoint::Promoter,
        Endpoint::Bank,
        Endpoint::Trading,
        Endpoint::Additional,
        Endpoint::Kyc,
        Endpoint::Payment,
    ];

    pub fn method(self) -> HttpMethod {
        match self {
            Endpoint::Types | Endpoint::Steps | Endpoint::Fields => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Types => "/types",
            Endpoint::Steps => "/steps",
            Endpoint::Fields => "/fields",
            Endpoint::Identity => "/identity",
            Endpoint::Address => "/address",
            Endpoint::Promoter => "/promoter",
            Endpoint::Bank => "/bank",
            Endpoint::Trading => "/trading",
            Endpoint::Additional => "/additional",
            Endpoint::Kyc => "/kyc/save",
            Endpoint::Payment => "/payment/save",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn paths_are_unique() {
        let paths: HashSet<_> = Endpoint::ALL.iter().map(|e| e.path()).collect();
        assert_eq!(paths.len(), Endpoint::ALL.len());
    }

    #[test]
    fn only_metadata_endpoints_are_get() {
        let gets: Vec<_> = Endpoint::ALL
            .iter()
            .copied()
            .filter(|e| e.method() == HttpMethod::Get)
            .collect();
        assert_eq!(gets, vec![Endpoint::Types, Endpoint::Steps, Endpoint::Fields]);
    }

    #[test]
    fn draft_and_payment_paths() {
        assert_eq!(Endpoint::Kyc.path(), "/kyc/save");
        assert_eq!(Endpoint::Payment.path(), "/payment/save");
    }
}
