//! Stage configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default capacity of a stage's output channel
pub const DEFAULT_BUFFER_SIZE: usize = 64;

/// Configuration shared by producer and transformer stages
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageConfig {
    /// Name used in log fields and metric labels
    pub name: String,
    /// Maximum number of results buffered in the output channel
    pub buffer_size: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            name: "stage".to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl StageConfig {
    /// Set the stage name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the buffer size
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Channel capacity actually used; tokio channels need at least one slot.
    pub(crate) fn capacity(&self) -> usize {
        self.buffer_size.max(1)
    }
}
