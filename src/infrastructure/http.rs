use crate::domain::claim::PaymentClaim;
use crate::domain::ports::RegistrationGateway;
use crate::domain::registration::RegistrationFields;
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default per-request timeout. The original contract has none; this is a
/// hardening measure so a stalled backend cannot hang the workflow forever.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ClaimBody<'a> {
    trx_id: &'a str,
    payment_method: &'a str,
}

/// `RegistrationGateway` backed by the team-registration HTTP backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    http: Client,
    timeout: Duration,
}

impl HttpGateway {
    /// Builds a gateway against `base_url`, e.g. `https://api.example.com`.
    ///
    /// The URL must parse, use http or https, and carry a host.
    pub fn new(base_url: &str) -> Result<Self> {
        validate_base_url(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn status_url(&self, object_id: &str) -> String {
        format!("{}/team-registration/{}", self.base_url, object_id)
    }

    fn payment_url(&self, object_id: &str) -> String {
        format!("{}/team-registration/payment/{}", self.base_url, object_id)
    }
}

#[async_trait]
impl RegistrationGateway for HttpGateway {
    async fn fetch(&self, object_id: &str) -> Result<RegistrationFields> {
        let url = self.status_url(object_id);
        debug!(%url, "fetching registration");

        let response = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PaymentError::Load {
                reason: e.to_string(),
            })?;

        let status = response.status();
        debug!(%url, %status, "fetch response");
        if !status.is_success() {
            return Err(PaymentError::Load {
                reason: format!("backend returned {status}"),
            });
        }

        response
            .json::<RegistrationFields>()
            .await
            .map_err(|e| PaymentError::Load {
                reason: format!("invalid response body: {e}"),
            })
    }

    async fn submit(&self, object_id: &str, claim: &PaymentClaim) -> Result<RegistrationFields> {
        let url = self.payment_url(object_id);
        debug!(%url, method = %claim.method(), "submitting payment claim");

        let body = ClaimBody {
            trx_id: claim.trx_id(),
            payment_method: claim.method().as_str(),
        };
        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Submit {
                reason: e.to_string(),
            })?;

        let status = response.status();
        debug!(%url, %status, "submit response");
        if !status.is_success() {
            return Err(PaymentError::Submit {
                reason: format!("backend returned {status}"),
            });
        }

        response
            .json::<RegistrationFields>()
            .await
            .map_err(|e| PaymentError::Submit {
                reason: format!("invalid response body: {e}"),
            })
    }
}

fn validate_base_url(base: &str) -> Result<()> {
    let parsed = Url::parse(base).map_err(|e| PaymentError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PaymentError::InvalidBaseUrl {
            url: base.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none() {
        return Err(PaymentError::InvalidBaseUrl {
            url: base.to_string(),
            reason: "missing host".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https_bases() {
        assert!(HttpGateway::new("http://localhost:8080").is_ok());
        assert!(HttpGateway::new("https://api.example.com/").is_ok());
    }

    #[test]
    fn test_rejects_bad_bases() {
        for base in ["", "not a url", "ftp://example.com", "file:///tmp"] {
            assert!(matches!(
                HttpGateway::new(base),
                Err(PaymentError::InvalidBaseUrl { .. })
            ));
        }
    }

    #[test]
    fn test_endpoint_paths() {
        let gateway = HttpGateway::new("http://localhost:8080/").unwrap();
        assert_eq!(
            gateway.status_url("abc123"),
            "http://localhost:8080/team-registration/abc123"
        );
        assert_eq!(
            gateway.payment_url("abc123"),
            "http://localhost:8080/team-registration/payment/abc123"
        );
    }

    #[test]
    fn test_claim_body_wire_shape() {
        let body = ClaimBody {
            trx_id: "TX1234567",
            payment_method: "Bkash",
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"trxId":"TX1234567","paymentMethod":"Bkash"}"#
        );
    }
}
