//! Search session identity and cooperative cancellation.

use std::sync::Arc;
use tokio::sync::watch;

/// Cooperative cancellation token, tied 1:1 to a search session.
///
/// Clones share state: cancelling any clone is observed by all of them.
/// In-flight requests race against `cancelled()` so they settle as soon as
/// their session is superseded instead of waiting out the transport.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<watch::Sender<bool>>,
}

impl CancellationToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            inner: Arc::new(tx),
        }
    }

    /// Request cancellation. All clones of this token will observe it.
    pub fn cancel(&self) {
        self.inner.send_replace(true);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        *self.inner.borrow()
    }

    /// Resolves once cancellation has been requested.
    pub async fn cancelled(&self) {
        let mut rx = self.inner.subscribe();
        while !*rx.borrow_and_update() {
            // The sender lives as long as any token clone, so this cannot fail
            // while we are awaiting; bail out anyway rather than spin.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// One logical search query's lifetime, from submission to supersession or
/// exhaustion. At most one session is current at any time; a session that is
/// no longer current has lost its right to mutate shared render state.
#[derive(Debug, Clone)]
pub struct SearchSession {
    pub id: u64,
    pub query: String,
    pub token: CancellationToken,
    /// Zero-based cursor of the next page to request.
    pub page: u32,
    pub exhausted: bool,
    pub loading: bool,
}

impl SearchSession {
    pub fn new(id: u64, query: impl Into<String>) -> Self {
        Self {
            id,
            query: query.into(),
            token: CancellationToken::new(),
            page: 0,
            exhausted: false,
            loading: false,
        }
    }
}
