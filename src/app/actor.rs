//! App actor - message loop processing UI events and gateway replies

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{GatewayCommand, GatewayReply, RenderState, UiEvent};

/// App actor that processes UI events and gateway replies
pub struct AppActor {
    state: AppState,
    gateway_tx: mpsc::UnboundedSender<GatewayCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        gateway_tx: mpsc::UnboundedSender<GatewayCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            gateway_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut reply_rx: mpsc::UnboundedReceiver<GatewayReply>,
    ) {
        // session bootstrap: current user + form selectors
        self.state.bootstrap();
        self.flush();

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.state.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.gateway_tx.send(GatewayCommand::Shutdown);
                        break;
                    }
                    self.flush();
                }
                Some(reply) = reply_rx.recv() => {
                    self.state.handle_reply(reply);
                    self.flush();
                }
                else => break,
            }
        }
    }

    /// Forward queued gateway commands and publish a fresh snapshot.
    fn flush(&mut self) {
        for cmd in self.state.drain_commands() {
            let _ = self.gateway_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());
    }
}
