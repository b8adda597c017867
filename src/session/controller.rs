//! Ownership of one live session's capture task.

use anyhow::{bail, Context, Result};
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::runner::{run_session, FrameSource, SessionReport};
use crate::tracking::VisibilityTracker;

/// Starts and stops the capture loop. The loop itself is synchronous and
/// runs on the blocking pool; only one session may be active at a time.
pub struct SessionController {
    handle: Option<JoinHandle<SessionReport>>,
    cancel_token: Option<CancellationToken>,
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start<S>(&mut self, mut source: S, tracker: VisibilityTracker) -> Result<()>
    where
        S: FrameSource + Send + 'static,
    {
        if self.handle.is_some() {
            bail!("session already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle =
            tokio::task::spawn_blocking(move || run_session(&mut source, tracker, &token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Signal the loop to stop and wait for its report. The tracker was
    /// already closed inside the loop; the report is all that survives.
    pub async fn stop(&mut self) -> Result<SessionReport> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
            info!("quit signal sent to session loop");
        }

        let handle = match self.handle.take() {
            Some(handle) => handle,
            None => bail!("no session active"),
        };

        handle.await.context("session loop task failed to join")
    }
}
