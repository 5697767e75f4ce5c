//! Background execution of provider calls.
//!
//! The grid controller lives on the UI thread and must never block on a
//! provider. `ProviderWorker` owns the provider on a dedicated thread; the
//! UI thread submits [`LoadRequest`]s and drains [`Completion`]s with a
//! non-blocking [`ProviderWorker::poll`] once per frame.

use super::{execute, ContentProvider};
use crate::grid::{LoadRequest, LoadTicket};
use crate::model::{ContentItem, ProviderError};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;
use tracing::{debug, warn};

/// Result of one provider call, tagged with the ticket it answers.
#[derive(Debug)]
pub struct Completion {
    /// Ticket of the request.
    pub ticket: LoadTicket,
    /// Provider answer.
    pub result: Result<Vec<ContentItem>, ProviderError>,
}

/// Provider running on a background thread.
#[derive(Debug)]
pub struct ProviderWorker {
    requests: Option<Sender<LoadRequest>>,
    completions: Receiver<Completion>,
    handle: Option<JoinHandle<()>>,
}

impl ProviderWorker {
    /// Move `provider` onto a new worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Unavailable`] if the thread cannot be spawned.
    pub fn spawn<P>(mut provider: P) -> Result<Self, ProviderError>
    where
        P: ContentProvider + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<LoadRequest>();
        let (completion_tx, completion_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("driftgrid-provider".to_string())
            .spawn(move || {
                for request in request_rx {
                    let result = execute(&mut provider, &request);
                    let completion = Completion {
                        ticket: request.ticket,
                        result,
                    };
                    if completion_tx.send(completion).is_err() {
                        break;
                    }
                }
                debug!("Provider worker stopped");
            })
            .map_err(|e| ProviderError::Unavailable(format!("failed to spawn worker: {e}")))?;

        Ok(Self {
            requests: Some(request_tx),
            completions: completion_rx,
            handle: Some(handle),
        })
    }

    /// Queue a request for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Disconnected`] if the worker thread is gone.
    /// The caller should feed that error back as the request's completion.
    pub fn submit(&self, request: LoadRequest) -> Result<(), ProviderError> {
        let sender = self.requests.as_ref().ok_or(ProviderError::Disconnected)?;
        sender.send(request).map_err(|_| {
            warn!("Provider worker is gone, request dropped");
            ProviderError::Disconnected
        })
    }

    /// Next finished call, if any. Never blocks.
    pub fn poll(&self) -> Option<Completion> {
        match self.completions.try_recv() {
            Ok(completion) => Some(completion),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                debug!("Completion channel closed");
                None
            }
        }
    }

    /// Wait up to `timeout` for the next finished call.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Completion> {
        match self.completions.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for ProviderWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Provider worker panicked");
            }
        }
    }
}
