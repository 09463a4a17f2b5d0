use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::event::{Event, EventHandler};

/// Immutable mapping from event kind to handler.
///
/// Built once before the channel starts; never mutated afterwards, so reader
/// loops share it without synchronization. Each handler is keyed by the kind
/// it declares through [`EventHandler::event_kind`]. Registering two handlers
/// for the same kind is a configuration fault, not a silent overwrite.
pub struct HandlerRegistry<E: Event> {
    handlers: HashMap<E::Kind, Arc<dyn EventHandler<E>>>,
}

impl<E: Event> HandlerRegistry<E> {
    /// Builds a registry from a collection of handler instances.
    ///
    /// # Errors
    /// Returns [`ConfigError::DuplicateHandler`] when two handlers declare
    /// the same kind.
    pub fn from_handlers<I>(handlers: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = Arc<dyn EventHandler<E>>>,
    {
        let mut map: HashMap<E::Kind, Arc<dyn EventHandler<E>>> = HashMap::new();
        for handler in handlers {
            let kind = handler.event_kind();
            if map.contains_key(&kind) {
                return Err(ConfigError::DuplicateHandler(format!("{:?}", kind)));
            }
            map.insert(kind, handler);
        }
        Ok(Self { handlers: map })
    }

    /// Looks up the handler registered for the given kind.
    pub fn get(&self, kind: &E::Kind) -> Option<&Arc<dyn EventHandler<E>>> {
        self.handlers.get(kind)
    }

    pub fn contains(&self, kind: &E::Kind) -> bool {
        self.handlers.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
