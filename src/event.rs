//--------------------------------------------------------------------------------------------------
// STRUCTS & TRAITS
//--------------------------------------------------------------------------------------------------
// | Name          | Description                                        | Key Methods              |
// |---------------|----------------------------------------------------|--------------------------|
// | EventKind     | Marker for discriminator types                     | (blanket impl)           |
// | Event         | A dispatchable unit tagged with a discriminator    | kind                     |
// | EventHandler  | Trait for processing events of one declared kind   | event_kind, handle       |
//--------------------------------------------------------------------------------------------------

use std::fmt::Debug;
use std::hash::Hash;

use tokio_util::sync::CancellationToken;

use crate::error::EventResult;

/// Marker trait for event discriminators.
///
/// A discriminator tags an event with its category and keys the handler map,
/// so it needs equality, ordering and hashing. Implemented automatically for
/// any type that satisfies the bounds (integers, strings, small enums).
pub trait EventKind: Clone + Eq + Hash + Ord + Debug + Send + Sync + 'static {}

impl<T> EventKind for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync + 'static {}

/// A unit of work flowing through the channel.
///
/// The event value itself is the payload; its discriminator is derived from
/// it via [`Event::kind`]. Events are moved into the queue on enqueue and
/// moved into their handler on dispatch.
pub trait Event: Send + 'static {
    /// The discriminator type used to route this event.
    type Kind: EventKind;

    /// Returns the discriminator identifying this event's category.
    fn kind(&self) -> Self::Kind;
}

/// Handler for events of a single declared kind.
///
/// Each handler instance declares the discriminator it serves; the registry
/// is keyed by that declaration. A handler signals its own failures through
/// the returned result, which the dispatcher logs and swallows.
#[async_trait::async_trait]
pub trait EventHandler<E: Event>: Send + Sync {
    /// The discriminator this handler processes.
    fn event_kind(&self) -> E::Kind;

    /// Processes one event.
    ///
    /// The cancellation token is the owning generation's; a handler doing
    /// long work may observe it to bail out early during shutdown.
    async fn handle(&self, event: E, cancel: CancellationToken) -> EventResult<()>;
}
