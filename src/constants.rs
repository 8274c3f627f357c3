//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the remote tracker service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Application name
pub const APP_NAME: &str = "MoneyBox";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// View registry names. Every cross-component refresh call resolves one of
// these through the registry; an unknown name makes the call a no-op.

pub const MODAL_LOGIN: &str = "login";
pub const MODAL_CREATE_ACCOUNT: &str = "createAccount";
pub const MODAL_NEW_INCOME: &str = "newIncome";
pub const MODAL_NEW_EXPENSE: &str = "newExpense";

pub const FORM_LOGIN: &str = "login";
pub const FORM_CREATE_ACCOUNT: &str = "createAccount";
pub const FORM_CREATE_INCOME: &str = "createIncome";
pub const FORM_CREATE_EXPENSE: &str = "createExpense";

pub const PAGE_TRANSACTIONS: &str = "transactions";

pub const WIDGET_ACCOUNTS: &str = "accounts";
pub const WIDGET_TRANSACTIONS: &str = "transactions";
pub const WIDGET_USER: &str = "user";

/// Title shown by the transactions page when no account is bound
pub const EMPTY_PAGE_TITLE: &str = "Account name";
