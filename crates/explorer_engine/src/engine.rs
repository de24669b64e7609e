use std::io;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info};
use explorer_core::{RecordId, RequestId};

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::EngineEvent;

enum EngineCommand {
    FetchAll { request_id: RequestId },
    FetchOne { request_id: RequestId, id: RecordId },
}

/// Runs fetches on a background tokio runtime and hands results back as
/// [`EngineEvent`]s. Fetches are never cancelled; callers drop stale results.
///
/// Clones share the same command and event channels.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Self::with_fetcher(Arc::new(ReqwestFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("explorer-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, event_tx).await;
                    });
                }
                engine_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch_all(&self, request_id: RequestId) {
        let _ = self.cmd_tx.send(EngineCommand::FetchAll { request_id });
    }

    pub fn fetch_one(&self, request_id: RequestId, id: impl Into<RecordId>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchOne {
            request_id,
            id: id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        let rx = self.event_rx.lock().ok()?;
        rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event. `Disconnected` means no
    /// further events can arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        let rx = self
            .event_rx
            .lock()
            .map_err(|_| RecvTimeoutError::Disconnected)?;
        rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchAll { request_id } => {
            let result = fetcher.fetch_all().await;
            match &result {
                Ok(records) => engine_info!(
                    "Request {} fetched {} launches",
                    request_id,
                    records.len()
                ),
                Err(err) => engine_info!("Request {} failed: {}", request_id, err),
            }
            EngineEvent::AllFetched { request_id, result }
        }
        EngineCommand::FetchOne { request_id, id } => {
            let result = fetcher.fetch_one(&id).await;
            engine_info!(
                "Lookup {} for {} finished: found={:?}",
                request_id,
                id,
                result.as_ref().map(Option::is_some)
            );
            EngineEvent::OneFetched {
                request_id,
                id,
                result,
            }
        }
    };
    let _ = event_tx.send(event);
}
