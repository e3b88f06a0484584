//! Wiring helpers around producer and transformer stages.
//!
//! [`build_producer`] covers the common case of items already in memory;
//! [`fan_in`] and [`partition`] sit on the consuming side.

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::DEFAULT_BUFFER_SIZE;
use crate::cursors::VecCursor;
use crate::error::Error;
use crate::producer::{Producer, ResultStream};
use crate::result::StageResult;

/// Start a producer over an in-memory sequence, without a setup step.
///
/// # Examples
///
/// ```rust
/// use pipefeed::prelude::*;
/// use tokio_stream::StreamExt;
///
/// # #[tokio::main]
/// # async fn main() {
/// let results = build_producer(CancellationToken::new(), vec!["1", "2", "3", "4"]);
/// let collected: Vec<_> = results.collect().await;
/// assert_eq!(collected.len(), 4);
/// # }
/// ```
pub fn build_producer<I>(token: CancellationToken, items: I) -> ResultStream<I::Item>
where
    I: IntoIterator,
    I::Item: Send + 'static,
{
    let cursor: VecCursor<I::Item> = items.into_iter().collect();
    Producer::new(cursor).start(token, DEFAULT_BUFFER_SIZE)
}

/// Merge several result streams into one.
///
/// Results from one input keep their relative order; there is no ordering
/// between inputs. The merged stream closes once every input has closed or
/// the token is cancelled.
pub fn fan_in<T>(
    token: CancellationToken,
    streams: Vec<ResultStream<T>>,
    buffer_size: usize,
) -> ResultStream<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(buffer_size.max(1));
    let inputs = streams.len();

    tokio::spawn(async move {
        let mut merged = stream::select_all(streams);
        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                next = merged.next() => next,
            };
            let Some(result) = next else { break };

            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                sent = tx.send(result) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }
        debug!(inputs, "fan-in finished");
    });

    ReceiverStream::new(rx)
}

/// Drain a result stream, splitting outputs from errors.
pub async fn partition<S, T>(results: S) -> (Vec<T>, Vec<Error>)
where
    S: futures_core::Stream<Item = StageResult<T>>,
{
    let mut outputs = Vec::new();
    let mut errors = Vec::new();

    let mut results = std::pin::pin!(results);
    while let Some(result) = results.next().await {
        match result.into_result() {
            Ok(output) => outputs.push(output),
            Err(e) => errors.push(e),
        }
    }

    (outputs, errors)
}
