use crate::domain::claim::ValidationIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    /// Field-level validation failures. Submission is blocked until the
    /// form is corrected.
    #[error("claim validation failed: {}", format_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// The status load failed (network or decode). The workflow stays in
    /// `Loading`; the caller may retry by calling `load` again.
    #[error("failed to load registration: {reason}")]
    Load { reason: String },

    /// The claim submission failed (network error or non-2xx response).
    /// Record and form state are preserved so the claim can be resubmitted.
    #[error("failed to submit payment claim: {reason}")]
    Submit { reason: String },

    /// The registration is already verified; no further submission is
    /// permitted.
    #[error("payment already verified; submission is closed")]
    SubmissionClosed,

    #[error("invalid backend base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("registration identifier must not be empty")]
    EmptyObjectId,
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, PaymentError>;
