//! Async run controller.
//!
//! Owns all backend I/O: consumes commands from presentation layers, issues
//! requests, and emits [`RunEvent`]s. Errors are converted to user-visible
//! message strings here and never propagate further. There is no
//! cancellation: an issued request runs to completion or transport failure,
//! and a superseded response is discarded by the session's sequence guard
//! rather than aborted.

use crate::api::NewsroomClient;
use crate::model::{ClientConfig, DraftRequest, EvalRequest, RunEvent};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Commands emitted by UI/CLI layers. Each start carries the sequence
/// number handed out by `Session::begin_*`.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    StartDraft { seq: u64, game_id: String },
    StartEval { seq: u64, request: EvalRequest },
    CheckHealth,
    Quit,
}

/// Drive backend requests until `Quit` or the command channel closes.
pub(crate) async fn run_controller(
    cfg: &ClientConfig,
    event_tx: UnboundedSender<RunEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let client = Arc::new(NewsroomClient::new(cfg)?);

    loop {
        let cmd = match cmd_rx.recv().await {
            Some(cmd) => cmd,
            None => break,
        };
        match cmd {
            UiCommand::StartDraft { seq, game_id } => {
                let _ = event_tx.send(RunEvent::Info(format!(
                    "Drafting article for game {game_id}…"
                )));
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let req = DraftRequest { game_id };
                    let event = match client.draft(&req).await {
                        Ok(result) => RunEvent::DraftCompleted {
                            seq,
                            result: Box::new(result),
                        },
                        Err(e) => RunEvent::DraftFailed {
                            seq,
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
            UiCommand::StartEval { seq, request } => {
                let _ = event_tx.send(RunEvent::Info(format!(
                    "Running batch of {} ({} iteration(s))…",
                    request.batch_size, request.iterations
                )));
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let event = match client.evaluate(&request).await {
                        Ok(result) => RunEvent::EvalCompleted {
                            seq,
                            result: Box::new(result),
                        },
                        Err(e) => RunEvent::EvalFailed {
                            seq,
                            message: e.to_string(),
                        },
                    };
                    let _ = tx.send(event);
                });
            }
            UiCommand::CheckHealth => {
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let online = client.health().await;
                    let _ = tx.send(RunEvent::Health { online });
                });
            }
            UiCommand::Quit => break,
        }
    }

    Ok(())
}
