//! Helpers for building cursors and mappers from closures.

use async_trait::async_trait;
use std::future::Future;
use std::marker::PhantomData;

use crate::error::Result;
use crate::traits::{Cursor, Mapper};

/// Helper function to create a cursor from an async function
pub fn cursor_from_fn<F, Fut, T>(f: F) -> FnCursor<F, Fut, T>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Option<T>> + Send,
    T: Send + 'static,
{
    FnCursor {
        f,
        _phantom: PhantomData,
    }
}

/// A cursor created from a function
pub struct FnCursor<F, Fut, T> {
    f: F,
    _phantom: PhantomData<fn() -> (Fut, T)>,
}

#[async_trait]
impl<F, Fut, T> Cursor for FnCursor<F, Fut, T>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Option<T>> + Send,
    T: Send + 'static,
{
    type Item = T;

    async fn advance(&mut self) -> Option<Self::Item> {
        (self.f)().await
    }
}

/// Helper function to create a mapper from a plain fallible function
pub fn map_fn<F, T, U>(f: F) -> FnMapper<F, T, U>
where
    F: FnMut(T) -> Result<U> + Send,
    T: Send + 'static,
    U: Send + 'static,
{
    FnMapper {
        f,
        _phantom: PhantomData,
    }
}

/// A mapper created from a plain function
pub struct FnMapper<F, T, U> {
    f: F,
    _phantom: PhantomData<fn(T) -> U>,
}

#[async_trait]
impl<F, T, U> Mapper for FnMapper<F, T, U>
where
    F: FnMut(T) -> Result<U> + Send,
    T: Send + 'static,
    U: Send + 'static,
{
    type Input = T;
    type Output = U;

    async fn map(&mut self, item: Self::Input) -> Result<Self::Output> {
        (self.f)(item)
    }
}

/// Helper function to create a mapper from an async function
pub fn async_map_fn<F, Fut, T, U>(f: F) -> AsyncFnMapper<F, Fut, T, U>
where
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<U>> + Send,
    T: Send + 'static,
    U: Send + 'static,
{
    AsyncFnMapper {
        f,
        _phantom: PhantomData,
    }
}

/// A mapper created from an async function
pub struct AsyncFnMapper<F, Fut, T, U> {
    f: F,
    _phantom: PhantomData<fn(T) -> (Fut, U)>,
}

#[async_trait]
impl<F, Fut, T, U> Mapper for AsyncFnMapper<F, Fut, T, U>
where
    F: FnMut(T) -> Fut + Send,
    Fut: Future<Output = Result<U>> + Send,
    T: Send + 'static,
    U: Send + 'static,
{
    type Input = T;
    type Output = U;

    async fn map(&mut self, item: Self::Input) -> Result<Self::Output> {
        (self.f)(item).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[tokio::test]
    async fn fn_cursor_stops_on_none() {
        let mut next = 0;
        let mut cursor = cursor_from_fn(move || {
            next += 1;
            let item = (next <= 2).then_some(next);
            async move { item }
        });

        assert_eq!(cursor.advance().await, Some(1));
        assert_eq!(cursor.advance().await, Some(2));
        assert_eq!(cursor.advance().await, None);
    }

    #[tokio::test]
    async fn mappers_pass_errors_through() {
        let mut parse = map_fn(|s: &'static str| s.parse::<u32>().map_err(Error::transform));
        assert_eq!(parse.map("12").await.ok(), Some(12));
        assert!(matches!(parse.map("x").await, Err(Error::Transform(_))));

        let mut skip_odd = async_map_fn(|n: u32| async move {
            if n % 2 == 0 {
                Ok(n)
            } else {
                Err(Error::Skip)
            }
        });
        assert_eq!(skip_odd.map(4).await.ok(), Some(4));
        assert!(skip_odd.map(5).await.unwrap_err().is_skip());
    }
}
