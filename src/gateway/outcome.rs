//! Outcome classification - the single predicate separating successful
//! remote calls from failed ones.
//!
//! Every read and mutation passes its reply through `handle_error` before
//! acting on the carried data. Transport failures and `success:false`
//! envelopes are logged and collapse to the same answer; nothing retries.

use crate::messages::gateway::ApiOutcome;

/// True iff the transport succeeded and the service reported success.
/// Failures are logged here so call sites only branch.
pub fn handle_error(outcome: &ApiOutcome) -> bool {
    match outcome {
        Ok(envelope) if envelope.success => true,
        Ok(envelope) => {
            let reason = envelope.error.as_deref().unwrap_or("request rejected");
            tracing::error!(error = reason, "service refused request");
            false
        }
        Err(message) => {
            tracing::error!(error = %message, "transport failure");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Envelope;
    use serde_json::Value;

    fn envelope(success: bool, error: Option<&str>) -> Envelope {
        Envelope {
            success,
            data: Value::Null,
            error: error.map(String::from),
        }
    }

    #[test]
    fn test_success_envelope_passes() {
        assert!(handle_error(&Ok(envelope(true, None))));
    }

    #[test]
    fn test_rejected_envelope_fails() {
        assert!(!handle_error(&Ok(envelope(false, Some("Unauthorized")))));
        assert!(!handle_error(&Ok(envelope(false, None))));
    }

    #[test]
    fn test_transport_error_fails() {
        assert!(!handle_error(&Err("connection refused".to_string())));
    }

    #[test]
    fn test_success_flag_wins_over_stray_error_field() {
        // a well-formed success envelope is a success even if the
        // service also filled the error field
        assert!(handle_error(&Ok(envelope(true, Some("noise")))));
    }
}
