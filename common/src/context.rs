use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct Shared {
	token: CancellationToken,
	// Closed once the last context is dropped, which wakes the handler.
	_alive: mpsc::Sender<()>,
}

/// The shutdown signal handed to every long running task of the service.
/// Clones are cheap and all observe the same cancellation.
#[derive(Clone)]
pub struct Context(Arc<Shared>);

/// The owning side of a [`Context`].
pub struct Handler {
	token: CancellationToken,
	alive: mpsc::Receiver<()>,
}

impl Context {
	#[must_use]
	pub fn new() -> (Self, Handler) {
		let (alive, recv) = mpsc::channel(1);
		let token = CancellationToken::new();

		let ctx = Self(Arc::new(Shared {
			token: token.clone(),
			_alive: alive,
		}));

		(ctx, Handler { token, alive: recv })
	}

	/// Resolves once the handler has cancelled the context.
	pub async fn done(&self) {
		self.0.token.cancelled().await;
	}
}

impl Handler {
	/// Cancels every context and waits until all of them are dropped.
	pub async fn cancel(mut self) {
		self.token.cancel();
		while self.alive.recv().await.is_some() {}
	}
}
