use serde::{Deserialize, Serialize, Serializer};

/// Verification status of a registration's payment.
///
/// The backend models this as a JSON boolean; locally we need a third state
/// for "not loaded yet", so the wire boolean maps onto `Submitted`/`Verified`
/// and `Unknown` exists only before a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    /// No load has completed yet (or the backend has no status).
    #[default]
    Unknown,
    /// A claim was submitted and is awaiting manual verification
    /// (wire value `false`).
    Submitted,
    /// Payment verified; the registration is final (wire value `true`).
    Verified,
}

impl PaymentStatus {
    pub fn is_verified(&self) -> bool {
        *self == Self::Verified
    }
}

fn serialize_status<S>(status: &PaymentStatus, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_bool(status.is_verified())
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<PaymentStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let verified = bool::deserialize(deserializer)?;
    if verified {
        Ok(PaymentStatus::Verified)
    } else {
        Ok(PaymentStatus::Submitted)
    }
}

/// The record fragment the backend returns, both from the status endpoint
/// and from a successful claim submission.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    #[serde(
        rename = "paymentStatus",
        serialize_with = "serialize_status",
        deserialize_with = "deserialize_status"
    )]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trx_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<u32>,
}

/// Local view of an externally stored registration record.
///
/// Created with an identifier and `Unknown` status, then patched by loads
/// and successful submissions. Never deleted by this component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub object_id: String,
    pub team_id: Option<u32>,
    pub payment_status: PaymentStatus,
    pub trx_id: Option<String>,
}

impl RegistrationRecord {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            team_id: None,
            payment_status: PaymentStatus::Unknown,
            trx_id: None,
        }
    }

    /// Replaces the local payment fields with a backend response fragment.
    /// The backend is authoritative: a response without a transaction
    /// reference clears a previously stored one.
    pub fn merge(&mut self, fields: RegistrationFields) {
        self.payment_status = fields.payment_status;
        self.trx_id = fields.trx_id;
        self.team_id = fields.team_id;
    }
}

/// The derived display mode of the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// A load is in flight (or has failed); the form is suppressed.
    Loading,
    /// Payment verified; terminal.
    Verified,
    /// A transaction reference is on file and awaits verification.
    Processing,
    /// No claim submitted yet; show the form.
    AwaitingSubmission,
}

impl ViewState {
    /// The Presenter: maps `(is_loading, payment_status, trx_id)` onto a
    /// display state.
    pub fn derive(is_loading: bool, record: &RegistrationRecord) -> Self {
        if is_loading {
            return Self::Loading;
        }
        match (record.payment_status, record.trx_id.is_some()) {
            (PaymentStatus::Verified, _) => Self::Verified,
            (PaymentStatus::Submitted, true) => Self::Processing,
            (PaymentStatus::Submitted, false) | (PaymentStatus::Unknown, _) => {
                Self::AwaitingSubmission
            }
        }
    }
}
