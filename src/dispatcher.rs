//--------------------------------------------------------------------------------------------------
// STRUCTS & TRAITS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods      |
// |-------------------------|---------------------------------------------------|------------------|
// | EventDispatcher         | Routes one event to its registered handler        | dispatch         |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::event::Event;
use crate::logger::DispatchLogger;
use crate::registry::HandlerRegistry;

/// Routes events to registered handlers and isolates per-event failures.
///
/// A missing handler produces one warning and drops the event; a handler
/// error produces one error line and drops the event. Neither outcome is
/// visible to the calling reader loop: `dispatch` always completes normally.
pub struct EventDispatcher<E: Event> {
    registry: HandlerRegistry<E>,
    logger: Arc<dyn DispatchLogger>,
}

impl<E: Event> EventDispatcher<E> {
    pub fn new(registry: HandlerRegistry<E>, logger: Arc<dyn DispatchLogger>) -> Self {
        Self { registry, logger }
    }

    /// Dispatches one event to the handler registered for its kind.
    pub async fn dispatch(&self, event: E, cancel: CancellationToken) {
        let kind = event.kind();
        match self.registry.get(&kind) {
            Some(handler) => {
                if let Err(err) = handler.handle(event, cancel).await {
                    self.logger.error_with_cause(
                        &format!("handler failed for event kind {:?}", kind),
                        &err,
                    );
                }
            }
            None => {
                self.logger.warning(&format!(
                    "can't dispatch event with kind {:?}, handler not registered",
                    kind
                ));
            }
        }
    }
}
