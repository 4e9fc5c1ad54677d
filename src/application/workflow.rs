use crate::domain::claim::{self, ClaimDraft};
use crate::domain::ports::RegistrationGatewayBox;
use crate::domain::registration::{RegistrationRecord, ViewState};
use crate::error::{PaymentError, Result};
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded retry with exponential backoff for the status load.
///
/// The default is a single attempt, matching the original contract which
/// has no retry at all. Submissions are never retried automatically.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 1,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after the given 1-based failed attempt:
    /// `base_delay * 2^(attempt - 1)`.
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// The payment status workflow for a single registration record.
///
/// Owns the record, the loading flag, and the claim form exclusively; the
/// gateway is the only collaborator. At most one operation runs per record
/// at a time: `load` and `submit` take `&mut self`, so the exclusive borrow
/// is the submit-disable guard and a second call cannot start while one is
/// in flight. A submit future dropped mid-flight leaves the record and the
/// form untouched, so the claim can simply be resubmitted.
pub struct PaymentWorkflow {
    gateway: RegistrationGatewayBox,
    record: RegistrationRecord,
    form: ClaimDraft,
    retry: RetryPolicy,
    is_loading: bool,
}

impl PaymentWorkflow {
    /// Creates a workflow for `object_id`. The workflow starts in `Loading`
    /// with the form suppressed until the first `load` completes.
    pub fn new(object_id: impl Into<String>, gateway: RegistrationGatewayBox) -> Result<Self> {
        let object_id = object_id.into();
        if object_id.is_empty() {
            return Err(PaymentError::EmptyObjectId);
        }
        Ok(Self {
            gateway,
            record: RegistrationRecord::new(object_id),
            form: ClaimDraft::default(),
            retry: RetryPolicy::default(),
            is_loading: true,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    pub fn form(&self) -> &ClaimDraft {
        &self.form
    }

    pub fn set_payment_method(&mut self, method: impl Into<String>) {
        self.form.payment_method = method.into();
    }

    pub fn set_trx_id(&mut self, trx_id: impl Into<String>) {
        self.form.trx_id = trx_id.into();
    }

    /// Derives the current display state.
    pub fn view(&self) -> ViewState {
        ViewState::derive(self.is_loading, &self.record)
    }

    /// Fetches the record from the gateway and merges it into local state.
    ///
    /// On failure the workflow stays in `Loading` (the caller keeps showing
    /// a non-blocking indicator) and the error is returned; calling `load`
    /// again is the only recovery path.
    pub async fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        let mut attempt = 1;
        loop {
            match self.gateway.fetch(&self.record.object_id).await {
                Ok(fields) => {
                    debug!(object_id = %self.record.object_id, "registration loaded");
                    self.record.merge(fields);
                    self.is_loading = false;
                    return Ok(());
                }
                Err(err) if attempt < self.retry.attempts => {
                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        object_id = %self.record.object_id,
                        %err,
                        attempt,
                        ?delay,
                        "load failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Validates the current form and submits it as a payment claim.
    ///
    /// On success the gateway's response is merged into the record and the
    /// form is cleared. On failure the record and the form are untouched so
    /// the claim can be corrected or resubmitted.
    pub async fn submit(&mut self) -> Result<ViewState> {
        if self.record.payment_status.is_verified() {
            return Err(PaymentError::SubmissionClosed);
        }
        let claim = claim::validate(&self.form).map_err(PaymentError::Validation)?;

        let fields = self.gateway.submit(&self.record.object_id, &claim).await?;
        debug!(object_id = %self.record.object_id, trx_id = claim.trx_id(), "claim accepted");
        self.record.merge(fields);
        self.form = ClaimDraft::default();
        Ok(self.view())
    }
}
