//! Cancellation of in-flight requests that belong to a view.
//!
//! A [ViewScope] lives as long as the view that started the requests. Every request runs through
//! a [ScopeToken] of that scope. Once the scope is cancelled or dropped, pending requests are
//! abandoned and their results are never handed back, so they can't be written to the store.

use std::{future::Future, pin::pin};

use futures::future::{self, Either};
use tokio::sync::watch;

#[derive(Debug)]
pub struct ViewScope {
    tx: watch::Sender<bool>,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn token(&self) -> ScopeToken {
        ScopeToken {
            rx: self.tx.subscribe(),
        }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct ScopeToken {
    rx: watch::Receiver<bool>,
}

impl ScopeToken {
    /// A closed channel means the scope was dropped
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Runs the future until it completes or the scope is cancelled. Returns `None` if the scope
    /// was cancelled first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        if self.is_cancelled() {
            return None;
        }
        let mut rx = self.rx.clone();
        let cancelled = async move {
            // errors once the scope is dropped, which cancels as well
            let _ = rx.wait_for(|cancelled| *cancelled).await;
        };
        match future::select(pin!(fut), pin!(cancelled)).await {
            Either::Left((output, _)) if !self.is_cancelled() => Some(output),
            _ => None,
        }
    }
}
