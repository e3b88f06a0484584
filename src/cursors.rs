//! Cursor implementations for common sources.
//!
//! Storage listings and similar external sources usually arrive as a
//! [`Stream`]; wrap them in a [`StreamCursor`] to feed a producer.

use async_trait::async_trait;
use futures::StreamExt;
use futures_core::Stream;
use std::collections::VecDeque;

use crate::traits::Cursor;

/// A cursor that yields items from an in-memory queue
pub struct VecCursor<T> {
    items: VecDeque<T>,
}

impl<T> VecCursor<T> {
    /// Create a new vector cursor
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Add more items to the end of the cursor
    pub fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Check if the cursor has more items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of remaining items
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> FromIterator<T> for VecCursor<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl<T: Send + 'static> Cursor for VecCursor<T> {
    type Item = T;

    async fn advance(&mut self) -> Option<Self::Item> {
        self.items.pop_front()
    }
}

/// A cursor over any std iterator
pub struct IterCursor<I> {
    iter: I,
}

impl<I> IterCursor<I> {
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: iter.into_iter(),
        }
    }
}

#[async_trait]
impl<I> Cursor for IterCursor<I>
where
    I: Iterator + Send,
    I::Item: Send + 'static,
{
    type Item = I::Item;

    async fn advance(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

/// A cursor that pulls from an async stream
pub struct StreamCursor<S> {
    stream: S,
}

impl<S> StreamCursor<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl<S> Cursor for StreamCursor<S>
where
    S: Stream + Send + Unpin,
    S::Item: Send + 'static,
{
    type Item = S::Item;

    async fn advance(&mut self) -> Option<Self::Item> {
        self.stream.next().await
    }
}
