//! Gateway messages - communication between App and Gateway layers

use serde_json::Value;

use crate::models::Envelope;

/// One remote call. Every variant maps to a single service endpoint; the
/// `payload` variants carry a form's serialized field values untouched.
#[derive(Debug, Clone)]
pub enum ApiOp {
    AccountList,
    AccountGet { id: String },
    AccountCreate { payload: Value },
    AccountRemove { id: String },
    TransactionList { account_id: String },
    TransactionCreate { payload: Value },
    TransactionRemove { id: String },
    Login { payload: Value },
    Logout,
    CurrentUser,
}

/// Commands sent from App layer to Gateway layer
#[derive(Debug, Clone)]
pub enum GatewayCommand {
    /// Execute one remote call; exactly one reply carries the same id
    Request { id: u64, op: ApiOp },
    /// Shutdown the gateway actor
    Shutdown,
}

/// Either the service's reply envelope or a transport failure. Mirrors
/// the `(error, response)` pair every continuation receives.
pub type ApiOutcome = Result<Envelope, String>;

/// Reply sent from Gateway layer to App layer, exactly once per request
#[derive(Debug, Clone)]
pub struct GatewayReply {
    pub id: u64,
    pub outcome: ApiOutcome,
}
