use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of payment providers the backend accepts.
///
/// Modelled as an enum rather than a free-form string so an unsupported
/// method cannot reach the submitter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Bkash,
    Nagad,
    Rocket,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [Self::Bkash, Self::Nagad, Self::Rocket];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bkash => "Bkash",
            Self::Nagad => "Nagad",
            Self::Rocket => "Rocket",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationIssue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bkash" => Ok(Self::Bkash),
            "Nagad" => Ok(Self::Nagad),
            "Rocket" => Ok(Self::Rocket),
            _ => Err(ValidationIssue::InvalidPaymentMethod),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum accepted transaction reference length.
pub const MIN_TRX_ID_LEN: usize = 8;

/// A single field-level validation failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("paymentMethod: invalid payment method")]
    InvalidPaymentMethod,
    #[error("trxId: transaction ID is required")]
    TrxIdRequired,
    #[error("trxId: transaction ID must be at least 8 characters")]
    TrxIdTooShort,
}

/// Raw form input as entered by the user, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimDraft {
    pub payment_method: String,
    pub trx_id: String,
}

/// A payment claim that has passed validation.
///
/// Only constructible through [`validate`], so downstream code can rely on
/// the method being a known provider and the reference being well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentClaim {
    method: PaymentMethod,
    trx_id: String,
}

impl PaymentClaim {
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn trx_id(&self) -> &str {
        &self.trx_id
    }
}

/// Validates a draft claim. Pure and total: no I/O, every input maps to
/// either a claim or the full list of violated rules.
pub fn validate(draft: &ClaimDraft) -> Result<PaymentClaim, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let method = draft.payment_method.parse::<PaymentMethod>().ok();
    if method.is_none() {
        issues.push(ValidationIssue::InvalidPaymentMethod);
    }

    if draft.trx_id.is_empty() {
        issues.push(ValidationIssue::TrxIdRequired);
    } else if draft.trx_id.chars().count() < MIN_TRX_ID_LEN {
        issues.push(ValidationIssue::TrxIdTooShort);
    }

    match (method, issues.is_empty()) {
        (Some(method), true) => Ok(PaymentClaim {
            method,
            trx_id: draft.trx_id.clone(),
        }),
        _ => Err(issues),
    }
}
