//! App layer - central state management and refresh choreography
//!
//! The App actor receives UI events and gateway replies, updates the
//! registered view components, and emits gateway commands and render
//! state.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
