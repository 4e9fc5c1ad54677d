use super::claim::PaymentClaim;
use super::registration::RegistrationFields;
use crate::error::Result;
use async_trait::async_trait;

/// The remote service holding registration records.
///
/// The workflow only ever reads a record and patches its payment fields;
/// creation and deletion happen elsewhere.
#[async_trait]
pub trait RegistrationGateway: Send + Sync {
    /// Retrieves the current record fragment for `object_id`.
    async fn fetch(&self, object_id: &str) -> Result<RegistrationFields>;

    /// Posts a validated claim and returns the updated record fragment.
    async fn submit(&self, object_id: &str, claim: &PaymentClaim) -> Result<RegistrationFields>;
}

pub type RegistrationGatewayBox = Box<dyn RegistrationGateway>;
