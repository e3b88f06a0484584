//! Core traits for producer and transformer stages.
//!
//! A [`Cursor`] is the pull side a producer drains; a [`Mapper`] is the
//! per-item logic a transformer applies.

use crate::error::Result;
use async_trait::async_trait;

/// A stateful cursor over a bounded or unbounded source.
///
/// Cursors are driven by exactly one producer, one call at a time.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use pipefeed::traits::Cursor;
///
/// struct Countdown {
///     remaining: u32,
/// }
///
/// #[async_trait]
/// impl Cursor for Countdown {
///     type Item = u32;
///
///     async fn advance(&mut self) -> Option<Self::Item> {
///         if self.remaining == 0 {
///             return None; // Exhausted
///         }
///         self.remaining -= 1;
///         Some(self.remaining)
///     }
/// }
/// ```
#[async_trait]
pub trait Cursor {
    /// The type of items this cursor yields
    type Item: Send + 'static;

    /// Yield the next item, or None once the source is exhausted.
    ///
    /// Exhaustion is not an error. A producer calls this until it returns
    /// None or its cancellation token fires.
    async fn advance(&mut self) -> Option<Self::Item>;
}

#[async_trait]
impl<T: Send + 'static> Cursor for Box<dyn Cursor<Item = T> + Send> {
    type Item = T;

    async fn advance(&mut self) -> Option<Self::Item> {
        (**self).advance().await
    }
}

/// Per-item transform logic applied by a [`Transformer`](crate::transformer::Transformer).
///
/// Returning [`Error::Skip`](crate::error::Error::Skip) drops the item without
/// signalling a failure.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use pipefeed::error::{Error, Result};
/// use pipefeed::traits::Mapper;
///
/// struct EvenOnly;
///
/// #[async_trait]
/// impl Mapper for EvenOnly {
///     type Input = i64;
///     type Output = i64;
///
///     async fn map(&mut self, item: Self::Input) -> Result<Self::Output> {
///         if item % 2 == 0 {
///             Ok(item)
///         } else {
///             Err(Error::Skip)
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Mapper {
    /// The type of items this mapper accepts
    type Input: Send + 'static;
    /// The type of items this mapper produces
    type Output: Send + 'static;

    /// Map one item to an output, a failure, or a skip.
    async fn map(&mut self, item: Self::Input) -> Result<Self::Output>;
}
