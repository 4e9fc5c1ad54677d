use crate::domain::claim::PaymentClaim;
use crate::domain::ports::RegistrationGateway;
use crate::domain::registration::{PaymentStatus, RegistrationFields};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct GatewayState {
    records: HashMap<String, RegistrationFields>,
    fail_next_fetch: bool,
    fail_next_submit: bool,
}

/// An in-process registration service.
///
/// Behaves like the real backend for the cases this crate exercises: a
/// stored record is returned on fetch, and an accepted claim comes back as
/// `paymentStatus=false` with the submitted transaction reference. One-shot
/// failure injection stands in for network faults and 5xx responses.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    state: Arc<RwLock<GatewayState>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a record fragment under `object_id`.
    pub async fn seed(&self, object_id: &str, fields: RegistrationFields) {
        let mut state = self.state.write().await;
        state.records.insert(object_id.to_string(), fields);
    }

    /// Makes the next `fetch` fail with a load error.
    pub async fn fail_next_fetch(&self) {
        self.state.write().await.fail_next_fetch = true;
    }

    /// Makes the next `submit` fail with a submit error.
    pub async fn fail_next_submit(&self) {
        self.state.write().await.fail_next_submit = true;
    }
}

#[async_trait]
impl RegistrationGateway for InMemoryGateway {
    async fn fetch(&self, object_id: &str) -> Result<RegistrationFields> {
        let mut state = self.state.write().await;
        if state.fail_next_fetch {
            state.fail_next_fetch = false;
            return Err(PaymentError::Load {
                reason: "injected fetch failure".to_string(),
            });
        }
        state
            .records
            .get(object_id)
            .cloned()
            .ok_or_else(|| PaymentError::Load {
                reason: format!("no registration for '{object_id}'"),
            })
    }

    async fn submit(&self, object_id: &str, claim: &PaymentClaim) -> Result<RegistrationFields> {
        let mut state = self.state.write().await;
        if state.fail_next_submit {
            state.fail_next_submit = false;
            return Err(PaymentError::Submit {
                reason: "injected submit failure".to_string(),
            });
        }
        let record = state
            .records
            .get_mut(object_id)
            .ok_or_else(|| PaymentError::Submit {
                reason: format!("no registration for '{object_id}'"),
            })?;
        record.payment_status = PaymentStatus::Submitted;
        record.trx_id = Some(claim.trx_id().to_string());
        Ok(record.clone())
    }
}
