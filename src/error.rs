use thiserror::Error;

/// Errors surfaced to producers by [`EventChannel::enqueue`](crate::EventChannel::enqueue).
///
/// Both variants mean the same thing to the caller: the write did not happen,
/// try again later or drop the event. `NotReady` is returned when the channel
/// was observably stopped before the write; `Closed` when the write raced a
/// concurrent stop or cancellation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    /// The channel is not running; the event was not accepted.
    #[error("channel not ready")]
    NotReady,

    /// The channel was completed or cancelled while the write was in flight.
    #[error("channel closed")]
    Closed,
}

/// Type alias for Result with ChannelError
pub type ChannelResult<T> = Result<T, ChannelError>;

/// Configuration faults raised synchronously at construction time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A bounded channel was configured with capacity zero.
    #[error("bounded channel capacity must be greater than zero")]
    ZeroCapacity,

    /// Two handlers declared the same event kind during registry construction.
    #[error("duplicate handler registered for event kind {0}")]
    DuplicateHandler(String),
}

/// Errors a handler can raise while processing an event.
///
/// These never propagate past the dispatcher; they are logged and the event
/// is dropped.
#[derive(Error, Debug, Clone)]
pub enum EventError {
    /// Failed to process an event
    #[error("failed to process event: {0}")]
    Processing(String),
}

/// Type alias for Result with EventError
pub type EventResult<T> = Result<T, EventError>;
