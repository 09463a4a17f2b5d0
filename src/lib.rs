//! In-process, typed event channel.
//!
//! Producers enqueue discriminated events; a pool of concurrent reader loops
//! drains the queue and routes each event to the handler registered for its
//! kind. Backpressure is configurable (bounded with an overflow policy, or
//! unbounded), and the start/stop lifecycle is idempotent and safe under
//! concurrent access.

pub mod builder;
pub mod channel;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod logger;
pub mod reader;
pub mod registry;

mod queue;

// Re-export key types for easier usage
pub use builder::{BoundedChannelBuilder, ChannelBuilder, UnboundedChannelBuilder};
pub use channel::EventChannel;
pub use config::{BoundedConfig, ChannelConfig, OverflowPolicy, UnboundedConfig};
pub use dispatcher::EventDispatcher;
pub use error::{ChannelError, ChannelResult, ConfigError, EventError, EventResult};
pub use event::{Event, EventHandler, EventKind};
pub use logger::{DispatchLogger, TracingLogger};
pub use reader::ReaderPool;
pub use registry::HandlerRegistry;
