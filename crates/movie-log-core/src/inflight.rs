use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A spawned fetch plus the token that supersedes it.
pub(crate) struct Inflight {
    pub token: CancellationToken,
    pub handle: JoinHandle<()>,
}

impl Inflight {
    /// Cancel the fetch and hand back its handle so callers can still await
    /// full settlement.
    pub fn cancel(self) -> JoinHandle<()> {
        self.token.cancel();
        self.handle
    }
}
