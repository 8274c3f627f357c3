//! Gateway layer - remote CRUD execution and outcome classification
//!
//! The gateway actor receives id-tagged commands and answers each one
//! exactly once with the service's envelope or a transport error.

pub mod actor;
pub mod client;
pub mod outcome;

pub use actor::GatewayActor;
