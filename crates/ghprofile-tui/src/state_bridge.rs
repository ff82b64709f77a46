//! Bridges published lookup states into the TUI action channel.
//!
//! Runs as a background task watching the client's `watch` channel and
//! forwarding every transition as [`Action::StateChanged`].

use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use ghprofile_core::UiState;

use crate::action::Action;

/// Forward state changes until cancelled or either side hangs up.
pub async fn forward_states(
    mut states: watch::Receiver<UiState>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                debug!(state = state.label(), "forwarding lookup state");
                if action_tx.send(Action::StateChanged(Box::new(state))).is_err() {
                    break;
                }
            }
        }
    }
    debug!("state bridge stopped");
}
