use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Direction of a money record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

/// A financial account as the service reports it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sum: f64,
}

/// A single income or expense record belonging to an account
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sum: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub created_at: String,
    pub account_id: String,
}

/// The authenticated user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Filter a page renders under; retained between renders so invalidation
/// can redraw without the caller re-supplying it
#[derive(Clone, Debug, PartialEq)]
pub struct PageOptions {
    pub account_id: String,
}

/// Serialized reply envelope every service endpoint answers with
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    /// Decode the carried payload into a concrete model type
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Option<T> {
        serde_json::from_value(self.data.clone()).ok()
    }
}
