//! The per-item result container carried on every stage stream.

use crate::error::{Error, Result};

/// The outcome of processing exactly one item: an output or an error.
///
/// Consumers must check [`err`](StageResult::err) before trusting the output.
#[derive(Debug, Clone)]
pub struct StageResult<T> {
    inner: Result<T>,
}

impl<T> StageResult<T> {
    /// Build a result from an output/error pair.
    ///
    /// The error wins when present; the output is then discarded.
    pub fn new(output: T, err: Option<Error>) -> Self {
        match err {
            Some(err) => Self::err(err),
            None => Self::ok(output),
        }
    }

    /// A successful result
    pub fn ok(output: T) -> Self {
        Self { inner: Ok(output) }
    }

    /// A failed result
    pub fn err(err: Error) -> Self {
        Self { inner: Err(err) }
    }

    /// The stored error, if the item failed.
    pub fn error(&self) -> Option<&Error> {
        self.inner.as_ref().err()
    }

    /// The stored output, if the item succeeded.
    pub fn output(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    /// Consume the container, returning the output if there was no error.
    pub fn into_output(self) -> Option<T> {
        self.inner.ok()
    }

    pub fn into_result(self) -> Result<T> {
        self.inner
    }

    /// Map the output, leaving an error untouched.
    pub fn map<U, F>(self, f: F) -> StageResult<U>
    where
        F: FnOnce(T) -> U,
    {
        StageResult {
            inner: self.inner.map(f),
        }
    }
}

impl<T> From<Result<T>> for StageResult<T> {
    fn from(inner: Result<T>) -> Self {
        Self { inner }
    }
}

impl<T> From<StageResult<T>> for Result<T> {
    fn from(result: StageResult<T>) -> Self {
        result.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prefers_the_error() {
        let failed = StageResult::new("ignored", Some(Error::custom("boom")));
        assert!(failed.is_err());
        assert!(failed.output().is_none());
        assert_eq!(failed.error().map(|e| e.to_string()), Some("boom".into()));

        let ok = StageResult::new(7, None);
        assert!(ok.error().is_none());
        assert_eq!(ok.output(), Some(&7));
    }

    #[test]
    fn map_leaves_errors_alone() {
        let doubled = StageResult::ok(21).map(|x| x * 2);
        assert_eq!(doubled.into_output(), Some(42));

        let failed: StageResult<i32> = StageResult::err(Error::Skip);
        assert!(failed.map(|x| x * 2).error().is_some_and(Error::is_skip));
    }
}
