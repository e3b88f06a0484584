//! # Producer/transformer stages for batch jobs
//!
//! This crate turns a bounded source of work items into an asynchronous stream
//! of per-item results, optionally mapping each item through a fallible step.
//! One bad item never stops the stream, and items can be skipped without being
//! reported as failures.
//!
//! ## Core Concepts
//!
//! - **Cursor**: Pull-based source of items (in-memory, iterator, async stream)
//! - **Producer**: Runs an optional setup step, then drains a cursor into a stream
//! - **Transformer**: Maps a stream of results, dropping items mapped to [`Error::Skip`]
//! - **StageResult**: The output or error for exactly one item
//!
//! Every stage runs on its own tokio task and talks to the next one only
//! through a bounded channel. Cancellation is cooperative, through a
//! [`CancellationToken`](tokio_util::sync::CancellationToken).
//!
//! ## Example
//!
//! ```rust
//! use pipefeed::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let token = CancellationToken::new();
//!     let paths = build_producer(token.clone(), vec!["pr/7/log", "pr/12/log"]);
//!
//!     let numbers = Transformer::new().transform(token, paths, |path: &str| {
//!         let n: u32 = path
//!             .split('/')
//!             .nth(1)
//!             .and_then(|s| s.parse().ok())
//!             .ok_or_else(|| Error::custom("bad path"))?;
//!         if n > 10 {
//!             return Err(Error::Skip);
//!         }
//!         Ok(n)
//!     });
//!
//!     let (outputs, errors) = partition(numbers).await;
//!     assert_eq!(outputs, vec![7]);
//!     assert!(errors.is_empty());
//! }
//! ```

pub mod config;
pub mod cursors;
pub mod error;
pub mod pipeline;
pub mod producer;
pub mod result;
pub mod traits;
pub mod transformer;
pub mod util;

// Re-export commonly used items
pub mod prelude {
    pub use crate::config::StageConfig;
    pub use crate::cursors::{IterCursor, StreamCursor, VecCursor};
    pub use crate::error::{Error, IntoError, Result};
    pub use crate::pipeline::{build_producer, fan_in, partition};
    pub use crate::producer::{Producer, ResultStream};
    pub use crate::result::StageResult;
    pub use crate::traits::{Cursor, Mapper};
    pub use crate::transformer::{log_error, ErrorHandler, Transformer};
    pub use crate::util::{async_map_fn, cursor_from_fn, map_fn};
    pub use tokio_util::sync::CancellationToken;
}

// Re-export main error type
pub use error::{Error, Result};

// Feature flags for optional dependencies
#[cfg(feature = "metrics")]
mod metrics;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
