use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use assistant_core::{RequestId, SelectionRequest};
use assistant_logging::{assistant_error, assistant_info};

use crate::dispatch::{DispatchSettings, Dispatcher, ReqwestDispatcher};
use crate::{EngineEvent, ProcessingError};

enum EngineCommand {
    Process {
        request_id: RequestId,
        request: SelectionRequest,
    },
}

/// Runs dispatches on a background tokio runtime and reports completions over a channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: DispatchSettings) -> Self {
        Self::with_dispatcher(Arc::new(ReqwestDispatcher::new(settings)))
    }

    pub fn with_dispatcher(dispatcher: Arc<dyn Dispatcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    assistant_error!("Failed to start engine runtime: {}", err);
                    fail_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let dispatcher = dispatcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(dispatcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn process(&self, request_id: RequestId, request: SelectionRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Process {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next completion or until `timeout` passes.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    dispatcher: &dyn Dispatcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Process {
            request_id,
            request,
        } => {
            let result = dispatcher.process(&request).await;
            match &result {
                Ok(_) => assistant_info!("Request {} completed", request_id),
                Err(err) => assistant_info!("Request {} failed: {}", request_id, err),
            }
            let _ = event_tx.send(EngineEvent::ProcessCompleted { request_id, result });
        }
    }
}

fn fail_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Process { request_id, .. }) = cmd_rx.recv() {
        let _ = event_tx.send(EngineEvent::ProcessCompleted {
            request_id,
            result: Err(ProcessingError::transport(format!(
                "engine runtime unavailable: {reason}"
            ))),
        });
    }
}
