//! The producer stage: setup once, then drain a cursor into a result stream.

use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::StageConfig;
use crate::error::Result;
use crate::result::StageResult;
use crate::traits::Cursor;

/// A read-only stream of per-item results, closed when its stage finishes.
pub type ResultStream<T> = ReceiverStream<StageResult<T>>;

type SetupFn = Box<dyn FnOnce() -> BoxFuture<'static, Result<()>> + Send>;

/// Drives a [`Cursor`] on its own task and emits one result per item.
///
/// An optional setup step runs exactly once before the cursor is first
/// advanced. If it fails, the stream carries that single error and closes.
///
/// # Examples
///
/// ```rust
/// use pipefeed::prelude::*;
/// use tokio_stream::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let mut results = Producer::new(VecCursor::new(vec!["a", "b"]))
///     .with_setup(|| async { Ok(()) })
///     .start(token, 8);
///
/// while let Some(result) = results.next().await {
///     assert!(result.error().is_none());
/// }
/// # }
/// ```
pub struct Producer<C> {
    setup: Option<SetupFn>,
    cursor: C,
    config: StageConfig,
}

impl<C> Producer<C>
where
    C: Cursor + Send + 'static,
{
    /// Create a producer without a setup step
    pub fn new(cursor: C) -> Self {
        Self {
            setup: None,
            cursor,
            config: StageConfig::default().name("producer"),
        }
    }

    /// Run `setup` once before the cursor is first advanced.
    pub fn with_setup<F, Fut>(mut self, setup: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.setup = Some(Box::new(move || setup().boxed()));
        self
    }

    /// Set the stage name used in logs and metrics
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.name(name);
        self
    }

    /// Spawn the producer task and return its output stream immediately.
    ///
    /// Must be called from within a tokio runtime. A `buffer_size` of zero is
    /// treated as one.
    pub fn start(mut self, token: CancellationToken, buffer_size: usize) -> ResultStream<C::Item> {
        self.config = self.config.buffer_size(buffer_size);
        let (tx, rx) = mpsc::channel(self.config.capacity());

        tokio::spawn(self.run(token, tx));

        ReceiverStream::new(rx)
    }

    async fn run(self, token: CancellationToken, tx: mpsc::Sender<StageResult<C::Item>>) {
        let Producer {
            setup,
            mut cursor,
            config,
        } = self;
        debug!(stage = %config.name, "producer started");

        if let Some(setup) = setup {
            if let Err(e) = setup().await {
                warn!(stage = %config.name, error = %e, "producer setup failed");
                #[cfg(feature = "metrics")]
                crate::metrics::record_setup_failure(&config.name);
                // The receiver may already be gone; nothing else to report to.
                let _ = tx.send(StageResult::err(e)).await;
                return;
            }
        }

        let mut emitted = 0usize;
        loop {
            if token.is_cancelled() {
                debug!(stage = %config.name, emitted, "producer cancelled");
                break;
            }

            let item = match cursor.advance().await {
                Some(item) => item,
                None => break, // Cursor exhausted
            };

            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(stage = %config.name, emitted, "producer cancelled");
                    break;
                }
                sent = tx.send(StageResult::ok(item)) => {
                    if sent.is_err() {
                        debug!(stage = %config.name, emitted, "result receiver dropped");
                        break;
                    }
                }
            }

            emitted += 1;
            #[cfg(feature = "metrics")]
            crate::metrics::record_emitted(&config.name);
        }

        debug!(stage = %config.name, emitted, "producer finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursors::VecCursor;
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_stream::StreamExt;

    struct CountingCursor {
        inner: VecCursor<i32>,
        advances: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Cursor for CountingCursor {
        type Item = i32;

        async fn advance(&mut self) -> Option<Self::Item> {
            self.advances.fetch_add(1, Ordering::SeqCst);
            self.inner.advance().await
        }
    }

    #[tokio::test]
    async fn setup_runs_before_the_first_item() {
        let advances = Arc::new(AtomicUsize::new(0));
        let setup_calls = Arc::new(AtomicUsize::new(0));
        // Cursor advances observed at the moment setup ran
        let (seen_tx, mut seen_rx) = mpsc::unbounded_channel();

        let cursor = CountingCursor {
            inner: VecCursor::new(vec![1, 2]),
            advances: advances.clone(),
        };
        let (observed, calls) = (advances.clone(), setup_calls.clone());
        let mut stream = Producer::new(cursor)
            .with_setup(move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                seen_tx
                    .send(observed.load(Ordering::SeqCst))
                    .map_err(|e| Error::custom(e.to_string()))
            })
            .start(CancellationToken::new(), 1);

        assert_eq!(stream.next().await.and_then(|r| r.into_output()), Some(1));
        assert_eq!(stream.next().await.and_then(|r| r.into_output()), Some(2));
        assert!(stream.next().await.is_none());

        assert_eq!(seen_rx.recv().await, Some(0));
        assert_eq!(setup_calls.load(Ordering::SeqCst), 1);
        // Two items plus the call that reported exhaustion
        assert_eq!(advances.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_buffer_still_delivers() {
        let mut stream =
            Producer::new(VecCursor::new(vec!["x"])).start(CancellationToken::new(), 0);
        assert!(stream.next().await.is_some_and(|r| r.is_ok()));
        assert!(stream.next().await.is_none());
    }
}
