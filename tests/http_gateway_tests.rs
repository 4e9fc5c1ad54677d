use regpay::domain::claim::{self, ClaimDraft, PaymentClaim};
use regpay::domain::ports::RegistrationGateway;
use regpay::domain::registration::PaymentStatus;
use regpay::error::PaymentError;
use regpay::infrastructure::http::HttpGateway;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves exactly one canned HTTP response and hands back the base URL plus
/// a channel carrying the raw request the fixture received.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        // Drain the request: headers first, then any Content-Length body.
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let header_end = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break buf.len();
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < header_end + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\n\
             content-type: application/json\r\n\
             content-length: {}\r\n\
             connection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });

    (format!("http://{addr}"), rx)
}

fn valid_claim() -> PaymentClaim {
    claim::validate(&ClaimDraft {
        payment_method: "Bkash".to_string(),
        trx_id: "TX1234567".to_string(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_fetch_decodes_registration() {
    let (base, request) = serve_once(
        "200 OK",
        r#"{"paymentStatus":false,"trxId":"TX1234567","teamId":42}"#,
    )
    .await;

    let gateway = HttpGateway::new(&base).unwrap();
    let fields = gateway.fetch("obj-1").await.unwrap();

    assert_eq!(fields.payment_status, PaymentStatus::Submitted);
    assert_eq!(fields.trx_id.as_deref(), Some("TX1234567"));
    assert_eq!(fields.team_id, Some(42));

    let raw = request.await.unwrap();
    assert!(raw.starts_with("GET /team-registration/obj-1 HTTP/1.1"));
}

#[tokio::test]
async fn test_fetch_maps_server_error_to_load_error() {
    let (base, _request) = serve_once("500 Internal Server Error", "{}").await;

    let gateway = HttpGateway::new(&base).unwrap();
    let err = gateway.fetch("obj-1").await.unwrap_err();
    assert!(matches!(err, PaymentError::Load { .. }));
}

#[tokio::test]
async fn test_fetch_rejects_malformed_body() {
    let (base, _request) = serve_once("200 OK", "not json").await;

    let gateway = HttpGateway::new(&base).unwrap();
    let err = gateway.fetch("obj-1").await.unwrap_err();
    assert!(matches!(err, PaymentError::Load { .. }));
}

#[tokio::test]
async fn test_fetch_maps_connection_failure_to_load_error() {
    // Bind then drop so the port is very likely unused.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let gateway = HttpGateway::new(&base).unwrap();
    let err = gateway.fetch("obj-1").await.unwrap_err();
    assert!(matches!(err, PaymentError::Load { .. }));
}

#[tokio::test]
async fn test_submit_posts_claim_and_decodes_response() {
    let (base, request) = serve_once(
        "200 OK",
        r#"{"paymentStatus":false,"trxId":"TX1234567","teamId":42}"#,
    )
    .await;

    let gateway = HttpGateway::new(&base).unwrap();
    let fields = gateway.submit("obj-1", &valid_claim()).await.unwrap();

    assert_eq!(fields.payment_status, PaymentStatus::Submitted);
    assert_eq!(fields.trx_id.as_deref(), Some("TX1234567"));

    let raw = request.await.unwrap();
    assert!(raw.starts_with("POST /team-registration/payment/obj-1 HTTP/1.1"));
    assert!(raw.contains(r#""trxId":"TX1234567""#));
    assert!(raw.contains(r#""paymentMethod":"Bkash""#));
}

#[tokio::test]
async fn test_submit_maps_server_error_to_submit_error() {
    let (base, _request) = serve_once("500 Internal Server Error", "{}").await;

    let gateway = HttpGateway::new(&base).unwrap();
    let err = gateway.submit("obj-1", &valid_claim()).await.unwrap_err();
    assert!(matches!(err, PaymentError::Submit { .. }));
}
