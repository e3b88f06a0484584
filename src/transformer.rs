//! The transformer stage: map each item of a result stream, dropping skips.

use futures_core::Stream;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::StageConfig;
use crate::error::{Error, Result};
use crate::producer::ResultStream;
use crate::result::StageResult;
use crate::traits::Mapper;
use crate::util::map_fn;

/// Callback observing every error a mapper returns, skips included.
pub type ErrorHandler = Arc<dyn Fn(&Error) + Send + Sync>;

/// Default error handler: skips at debug level, failures at warn level.
pub fn log_error(err: &Error) {
    if err.is_skip() {
        debug!("item skipped");
    } else {
        warn!(error = %err, "item transform failed");
    }
}

/// Maps a stream of results on its own task.
///
/// For each successful input the mapper decides the outcome:
///
/// - `Ok(output)` is emitted as a successful result;
/// - [`Error::Skip`] goes to the error handler and nothing is emitted;
/// - any other error goes to the error handler and is emitted as a failed
///   result.
///
/// Inputs that already carry an error are forwarded unchanged. Output order
/// follows input order.
#[derive(Clone)]
pub struct Transformer {
    on_error: ErrorHandler,
    config: StageConfig,
}

impl Transformer {
    /// Create a transformer that logs mapping errors through `tracing`
    pub fn new() -> Self {
        Self::with_error_handler(log_error)
    }

    /// Create a transformer reporting mapping errors to `handler`
    pub fn with_error_handler<F>(handler: F) -> Self
    where
        F: Fn(&Error) + Send + Sync + 'static,
    {
        Self {
            on_error: Arc::new(handler),
            config: StageConfig::default().name("transformer"),
        }
    }

    /// Set the stage name used in logs and metrics
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config = self.config.name(name);
        self
    }

    /// Set the output buffer size
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.config = self.config.buffer_size(size);
        self
    }

    /// Map `input` with a plain fallible function.
    ///
    /// Must be called from within a tokio runtime.
    pub fn transform<S, F, T, U>(&self, token: CancellationToken, input: S, f: F) -> ResultStream<U>
    where
        S: Stream<Item = StageResult<T>> + Send + 'static,
        F: FnMut(T) -> Result<U> + Send + 'static,
        T: Send + 'static,
        U: Send + 'static,
    {
        self.transform_with(token, input, map_fn(f))
    }

    /// Map `input` with any [`Mapper`], including async ones.
    pub fn transform_with<S, M>(
        &self,
        token: CancellationToken,
        input: S,
        mapper: M,
    ) -> ResultStream<M::Output>
    where
        S: Stream<Item = StageResult<M::Input>> + Send + 'static,
        M: Mapper + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.config.capacity());

        tokio::spawn(run(
            input,
            mapper,
            tx,
            token,
            self.on_error.clone(),
            self.config.name.clone(),
        ));

        ReceiverStream::new(rx)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-stage tallies reported when a transformer finishes.
///
/// `emitted` counts results the mapper produced and that were sent, failed
/// ones included. Upstream failures passed through are counted in
/// `forwarded` only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct StageCounts {
    emitted: usize,
    forwarded: usize,
    skipped: usize,
    failed: usize,
}

async fn run<S, M>(
    input: S,
    mut mapper: M,
    tx: mpsc::Sender<StageResult<M::Output>>,
    token: CancellationToken,
    on_error: ErrorHandler,
    stage: String,
) -> StageCounts
where
    S: Stream<Item = StageResult<M::Input>> + Send,
    M: Mapper + Send,
{
    tokio::pin!(input);
    debug!(stage = %stage, "transformer started");

    let mut counts = StageCounts::default();
    loop {
        let next = tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(stage = %stage, "transformer cancelled");
                break;
            }
            next = input.next() => next,
        };
        let Some(result) = next else {
            break; // Upstream closed
        };

        let (outgoing, mapped) = match result.into_result() {
            Ok(item) => match mapper.map(item).await {
                Ok(output) => (StageResult::ok(output), true),
                Err(e) if e.is_skip() => {
                    on_error(&e);
                    counts.skipped += 1;
                    #[cfg(feature = "metrics")]
                    crate::metrics::record_skipped(&stage);
                    continue;
                }
                Err(e) => {
                    on_error(&e);
                    counts.failed += 1;
                    #[cfg(feature = "metrics")]
                    crate::metrics::record_failed(&stage);
                    (StageResult::err(e), true)
                }
            },
            // Upstream failures pass through untouched
            Err(e) => (StageResult::err(e), false),
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(stage = %stage, "transformer cancelled");
                break;
            }
            sent = tx.send(outgoing) => {
                if sent.is_err() {
                    debug!(stage = %stage, "result receiver dropped");
                    break;
                }
            }
        }

        if mapped {
            counts.emitted += 1;
            #[cfg(feature = "metrics")]
            crate::metrics::record_emitted(&stage);
        } else {
            counts.forwarded += 1;
            #[cfg(feature = "metrics")]
            crate::metrics::record_forwarded(&stage);
        }
    }

    debug!(
        stage = %stage,
        emitted = counts.emitted,
        forwarded = counts.forwarded,
        skipped = counts.skipped,
        failed = counts.failed,
        "transformer finished"
    );
    counts
}
