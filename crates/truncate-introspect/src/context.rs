use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

use truncate_core::Error;

/// Cancellation signal and optional deadline for one or more discovery calls.
///
/// Clones share the cancellation signal, so one [`CancelHandle`] can stop
/// table and index discovery running concurrently.
#[derive(Debug, Clone)]
pub struct DiscoveryContext {
    cancelled: watch::Receiver<bool>,
    deadline: Option<Instant>,
}

/// Triggers cancellation of every context created alongside it.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl DiscoveryContext {
    /// A cancellable context without a deadline.
    pub fn cancellable() -> (Self, CancelHandle) {
        let (sender, cancelled) = watch::channel(false);
        (
            Self {
                cancelled,
                deadline: None,
            },
            CancelHandle { sender },
        )
    }

    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        let (_sender, cancelled) = watch::channel(false);
        Self {
            cancelled,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Check the context without waiting.
    pub fn check(&self) -> Result<(), Error> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Resolves with the reason once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> Error {
        let mut cancelled = self.cancelled.clone();
        let cancellation = async move {
            // A dropped handle can no longer cancel.
            if cancelled.wait_for(|value| *value).await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    _ = cancellation => Error::Cancelled,
                    _ = tokio::time::sleep_until(deadline) => Error::DeadlineExceeded,
                }
            }
            None => {
                cancellation.await;
                Error::Cancelled
            }
        }
    }
}

impl Default for DiscoveryContext {
    fn default() -> Self {
        Self::background()
    }
}
