//! # MoneyBox TUI
//!
//! A terminal client for the MoneyBox personal finance tracker.
//!
//! ## Features
//! - Accounts sidebar with balances and one active selection
//! - Transactions page bound to the selected account
//! - Dialog-hosted forms: sign in, new account, new income, new expense
//! - Confirmation-gated removals with automatic view refresh
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous, draws from RenderState snapshots
//! - App Layer (State machine + view registry + refresh choreography)
//! - Gateway Layer (Tokio + reqwest remote CRUD execution)

pub mod app;
pub mod config;
pub mod constants;
pub mod format;
pub mod gateway;
pub mod messages;
pub mod models;
pub mod ui;
pub mod views;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use config::Config;
pub use gateway::GatewayActor;
pub use messages::{ApiOp, GatewayCommand, GatewayReply, RenderState, UiEvent};
pub use models::{Account, Envelope, PageOptions, Transaction, TransactionKind, User};
pub use views::{Modal, TransactionsPage, ViewError, ViewTree, Views};
