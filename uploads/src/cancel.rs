//! Caller-controlled cancellation for long token walks.
//!
//! A [`CancelSignal`] fires either when its [`CancelHandle`] is triggered or when its deadline
//! passes, whichever comes first. Every upstream call made by the pager is raced against the
//! signal, and a signal that has already fired stops the next call from being issued.

use crate::error::FetchError;
use std::future::Future;
use tokio::sync::watch;
use tokio::time::Instant;

/// Triggers the [`CancelSignal`]s created alongside it by [`cancel_pair`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        // send_replace succeeds even when every receiver is gone
        self.tx.send_replace(true);
    }
}

/// Observes cancellation requested through a [`CancelHandle`] or a deadline.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Creates a connected handle and signal. The signal can be cloned freely.
pub fn cancel_pair() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (
        CancelHandle { tx },
        CancelSignal {
            rx: Some(rx),
            deadline: None,
        },
    )
}

impl CancelSignal {
    /// A signal that never fires.
    pub fn never() -> Self {
        Self::default()
    }

    /// A signal that fires once `at` has passed.
    pub fn deadline(at: Instant) -> Self {
        Self::never().with_deadline(at)
    }

    /// Adds (or tightens) a deadline on an existing signal.
    pub fn with_deadline(mut self, at: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(at),
            None => at,
        });
        self
    }

    pub fn is_cancelled(&self) -> bool {
        let requested = self.rx.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|at| Instant::now() >= at);
        requested || expired
    }

    /// Resolves once the signal fires. Never resolves for [`CancelSignal::never`].
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        let requested = async {
            if let Some(rx) = rx.as_mut() {
                let fired = rx.wait_for(|cancelled| *cancelled).await.is_ok();
                if fired {
                    return;
                }
            }
            // handle dropped without cancelling
            std::future::pending::<()>().await
        };
        let expired = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = requested => {}
            _ = expired => {}
        }
    }

    /// Runs `call` unless the signal has already fired, abandoning it if the signal fires
    /// while it is in flight.
    pub(crate) async fn guard<T>(&self, call: impl Future<Output = T>) -> Result<T, FetchError> {
        if self.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(FetchError::Cancelled),
            output = call => Ok(output),
        }
    }
}
