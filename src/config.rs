use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Behavior applied when writing to a full bounded queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverflowPolicy {
    /// Suspend the write until space frees up or the generation is cancelled.
    Wait,
    /// Evict the oldest buffered item to make room for the new one.
    DropOldest,
    /// Discard the newest item instead of suspending.
    ///
    /// The queue only pops in FIFO order, so the item discarded is the one
    /// being written; see DESIGN.md for the rationale.
    DropNewest,
    /// Discard the item being written without suspending.
    DropWrite,
}

/// Options for a fixed-capacity queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedConfig {
    /// Maximum number of buffered events.
    pub capacity: usize,
    /// What to do with a write when the queue is full.
    pub overflow: OverflowPolicy,
    /// Hint that only one producer will write to the channel.
    pub single_writer: bool,
    /// Number of concurrent reader loops started per generation.
    pub readers_count: usize,
}

impl Default for BoundedConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            overflow: OverflowPolicy::Wait,
            single_writer: false,
            readers_count: 1,
        }
    }
}

/// Options for a queue limited only by memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnboundedConfig {
    /// Hint that only one producer will write to the channel.
    pub single_writer: bool,
    /// Number of concurrent reader loops started per generation.
    pub readers_count: usize,
}

impl Default for UnboundedConfig {
    fn default() -> Self {
        Self {
            single_writer: false,
            readers_count: 1,
        }
    }
}

/// Queue configuration for one channel, fixed for the life of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelConfig {
    Bounded(BoundedConfig),
    Unbounded(UnboundedConfig),
}

impl ChannelConfig {
    pub fn readers_count(&self) -> usize {
        match self {
            ChannelConfig::Bounded(options) => options.readers_count,
            ChannelConfig::Unbounded(options) => options.readers_count,
        }
    }

    pub fn single_writer(&self) -> bool {
        match self {
            ChannelConfig::Bounded(options) => options.single_writer,
            ChannelConfig::Unbounded(options) => options.single_writer,
        }
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, ChannelConfig::Bounded(_))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ChannelConfig::Bounded(options) if options.capacity == 0 => {
                Err(ConfigError::ZeroCapacity)
            }
            _ => Ok(()),
        }
    }
}
