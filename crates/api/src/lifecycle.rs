//! Process lifecycle: `Starting -> Serving -> Draining -> Stopped`.
//!
//! [`Lifecycle::run`] owns the race between the server future and the
//! shutdown signal. The server is handed a [`CancellationToken`] that fires
//! when draining begins; it then gets a fixed grace period to finish
//! in-flight requests before the run returns regardless.
//!
//! Nothing here touches the network, so every transition can be exercised
//! with plain futures in tests.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// Externally observable process phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Loading config, opening the database, binding the listener.
    Starting,
    /// Accepting connections.
    Serving,
    /// Shutdown requested; no new connections, in-flight requests finishing.
    Draining,
    /// Server future has completed or been abandoned.
    Stopped,
}

/// How a successful run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Shutdown was requested and in-flight work finished within the grace period.
    Graceful,
    /// Shutdown was requested but the grace period elapsed first.
    ForcedAfterGrace,
    /// The server future returned `Ok` without a shutdown request.
    ServerExited,
}

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("server failed: {0}")]
    Serve(#[from] io::Error),
}

/// Tracks and publishes the current [`Phase`].
#[derive(Debug)]
pub struct Lifecycle {
    phase: watch::Sender<Phase>,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(Phase::Starting);
        Self { phase }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    /// Receive every phase change from now on.
    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    fn transition(&self, next: Phase) {
        let previous = self.phase.send_replace(next);
        tracing::info!(from = ?previous, to = ?next, "Lifecycle transition");
    }

    /// Drive the server until it fails or `shutdown` resolves.
    ///
    /// - Server finishes first: its error (e.g. the listener died) is
    ///   returned immediately.
    /// - `shutdown` resolves first: the drain token is cancelled and the
    ///   server gets `grace` to finish. If it does not, the run returns
    ///   [`Outcome::ForcedAfterGrace`] and the server future is dropped.
    ///
    /// The phase is always [`Phase::Stopped`] when this returns.
    pub async fn run<F, Fut, S>(
        &self,
        serve: F,
        shutdown: S,
        grace: Duration,
    ) -> Result<Outcome, LifecycleError>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = io::Result<()>>,
        S: Future<Output = ()>,
    {
        let drain = CancellationToken::new();
        let server = serve(drain.clone());
        tokio::pin!(server);
        tokio::pin!(shutdown);

        self.transition(Phase::Serving);

        let result = tokio::select! {
            result = &mut server => {
                result.map(|()| Outcome::ServerExited).map_err(LifecycleError::from)
            }
            () = &mut shutdown => {
                self.transition(Phase::Draining);
                drain.cancel();

                match tokio::time::timeout(grace, &mut server).await {
                    Ok(Ok(())) => Ok(Outcome::Graceful),
                    Ok(Err(err)) => Err(LifecycleError::Serve(err)),
                    Err(_) => {
                        tracing::warn!(
                            grace_ms = grace.as_millis() as u64,
                            "In-flight requests did not finish in time, forcing shutdown"
                        );
                        Ok(Outcome::ForcedAfterGrace)
                    }
                }
            }
        };

        self.transition(Phase::Stopped);
        result
    }
}
