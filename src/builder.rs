//! Fluent configuration surface terminating in a built [`EventChannel`].
//!
//! The builder owns the handler registry and logger; `bounded()` or
//! `unbounded()` selects the queue flavor and exposes the options that flavor
//! supports.

use std::sync::Arc;

use crate::channel::EventChannel;
use crate::config::{BoundedConfig, ChannelConfig, OverflowPolicy, UnboundedConfig};
use crate::error::ConfigError;
use crate::event::Event;
use crate::logger::{DispatchLogger, TracingLogger};
use crate::registry::HandlerRegistry;

/// Entry point for building a channel.
pub struct ChannelBuilder<E: Event> {
    registry: HandlerRegistry<E>,
    logger: Arc<dyn DispatchLogger>,
}

impl<E: Event> ChannelBuilder<E> {
    /// Creates a builder with the default tracing-backed logger.
    pub fn new(registry: HandlerRegistry<E>) -> Self {
        Self {
            registry,
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replaces the dispatch logger.
    pub fn with_logger(mut self, logger: Arc<dyn DispatchLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Configures a fixed-capacity channel.
    pub fn bounded(self) -> BoundedChannelBuilder<E> {
        BoundedChannelBuilder {
            registry: self.registry,
            logger: self.logger,
            options: BoundedConfig::default(),
        }
    }

    /// Configures a channel limited only by memory.
    pub fn unbounded(self) -> UnboundedChannelBuilder<E> {
        UnboundedChannelBuilder {
            registry: self.registry,
            logger: self.logger,
            options: UnboundedConfig::default(),
        }
    }
}

/// Builder for bounded channels.
pub struct BoundedChannelBuilder<E: Event> {
    registry: HandlerRegistry<E>,
    logger: Arc<dyn DispatchLogger>,
    options: BoundedConfig,
}

impl<E: Event> BoundedChannelBuilder<E> {
    /// Sets the maximum number of buffered events.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.options.capacity = capacity;
        self
    }

    /// Sets the number of concurrent reader loops.
    pub fn with_readers_count(mut self, count: usize) -> Self {
        self.options.readers_count = count;
        self
    }

    /// Declares whether more than one producer will write to the channel.
    pub fn with_multiple_writers(mut self, multiple: bool) -> Self {
        self.options.single_writer = !multiple;
        self
    }

    /// Sets the behavior applied when the channel is full.
    pub fn with_overflow(mut self, policy: OverflowPolicy) -> Self {
        self.options.overflow = policy;
        self
    }

    /// Builds the channel.
    pub fn build(self) -> Result<EventChannel<E>, ConfigError> {
        EventChannel::new(
            ChannelConfig::Bounded(self.options),
            self.registry,
            self.logger,
        )
    }
}

/// Builder for unbounded channels.
pub struct UnboundedChannelBuilder<E: Event> {
    registry: HandlerRegistry<E>,
    logger: Arc<dyn DispatchLogger>,
    options: UnboundedConfig,
}

impl<E: Event> UnboundedChannelBuilder<E> {
    /// Sets the number of concurrent reader loops.
    pub fn with_readers_count(mut self, count: usize) -> Self {
        self.options.readers_count = count;
        self
    }

    /// Declares whether more than one producer will write to the channel.
    pub fn with_multiple_writers(mut self, multiple: bool) -> Self {
        self.options.single_writer = !multiple;
        self
    }

    /// Builds the channel.
    pub fn build(self) -> Result<EventChannel<E>, ConfigError> {
        EventChannel::new(
            ChannelConfig::Unbounded(self.options),
            self.registry,
            self.logger,
        )
    }
}
