//! Gateway actor - executes remote CRUD calls in the Tokio runtime.
//!
//! Each `Request` spawns an independent task; callers may have several
//! requests in flight at once with no ordering guarantee between their
//! completions. Every request id is answered exactly once - no retries,
//! no cancellation.

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::gateway::client::{create_client, execute};
use crate::messages::{GatewayCommand, GatewayReply};

/// Gateway actor that processes remote-call commands
pub struct GatewayActor {
    client: reqwest::Client,
    base_url: String,
    reply_tx: mpsc::UnboundedSender<GatewayReply>,
    active_requests: JoinSet<()>,
}

impl GatewayActor {
    pub fn new(base_url: String, reply_tx: mpsc::UnboundedSender<GatewayReply>) -> Self {
        GatewayActor {
            client: create_client(),
            base_url,
            reply_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the gateway actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<GatewayCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(GatewayCommand::Request { id, op }) => {
                            let reply_tx = self.reply_tx.clone();
                            let client = self.client.clone();
                            let base_url = self.base_url.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, ?op, "executing request");
                                let reply = execute(&client, &base_url, op, id).await;
                                tracing::info!(id, ok = reply.outcome.is_ok(), "request completed");
                                let _ = reply_tx.send(reply);
                            });
                        }

                        Some(GatewayCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
