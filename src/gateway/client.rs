//! HTTP client wrapper - builds one request per gateway op and parses
//! the service's reply envelope.

use serde_json::json;

use crate::messages::gateway::{ApiOp, GatewayReply};
use crate::models::Envelope;

/// Map an op to its endpoint and payload
fn build_request(
    client: &reqwest::Client,
    base_url: &str,
    op: &ApiOp,
) -> reqwest::RequestBuilder {
    let url = |path: &str| format!("{}{}", base_url.trim_end_matches('/'), path);

    match op {
        ApiOp::AccountList => client.get(url("/account")),
        ApiOp::AccountGet { id } => client.get(url(&format!("/account/{id}"))),
        ApiOp::AccountCreate { payload } => client.post(url("/account")).json(payload),
        ApiOp::AccountRemove { id } => client.delete(url("/account")).json(&json!({ "id": id })),
        ApiOp::TransactionList { account_id } => client
            .get(url("/transaction"))
            .query(&[("account_id", account_id)]),
        ApiOp::TransactionCreate { payload } => client.post(url("/transaction")).json(payload),
        ApiOp::TransactionRemove { id } => {
            client.delete(url("/transaction")).json(&json!({ "id": id }))
        }
        ApiOp::Login { payload } => client.post(url("/user/login")).json(payload),
        ApiOp::Logout => client.post(url("/user/logout")),
        ApiOp::CurrentUser => client.get(url("/user/current")),
    }
}

/// Execute one remote call and produce its single reply.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    op: ApiOp,
    request_id: u64,
) -> GatewayReply {
    let result = build_request(client, base_url, &op).send().await;

    let outcome = match result {
        Ok(resp) => match resp.text().await {
            Ok(body) => match serde_json::from_str::<Envelope>(&body) {
                Ok(envelope) => Ok(envelope),
                Err(e) => Err(format!("unexpected response body: {}", e)),
            },
            Err(e) => Err(format!("error reading body: {}", e)),
        },
        Err(e) => {
            let msg = if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                format!("request failed: {}", e)
            };
            Err(msg)
        }
    };

    GatewayReply {
        id: request_id,
        outcome,
    }
}

/// Create the shared HTTP client. The session cookie set by the login
/// endpoint rides along automatically; there is deliberately no request
/// timeout - a stalled call simply never reports back.
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
