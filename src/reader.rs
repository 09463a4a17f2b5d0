//--------------------------------------------------------------------------------------------------
// STRUCTS & TRAITS
//--------------------------------------------------------------------------------------------------
// | Name                    | Description                                       | Key Methods      |
// |-------------------------|---------------------------------------------------|------------------|
// | ReaderPool              | Spawns N consumer loops over one queue            | spawn_readers    |
//--------------------------------------------------------------------------------------------------

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::dispatcher::EventDispatcher;
use crate::event::Event;
use crate::logger::DispatchLogger;

/// Spawns the consumer side of a generation: independent reader loops that
/// compete for items on a shared queue and feed them to the dispatcher.
///
/// Loops never coordinate with each other. Each exits on its own when the
/// queue completes with no more items, or when the generation's cancellation
/// token fires; a loop that is mid-dispatch finishes that dispatch first.
pub struct ReaderPool<E: Event> {
    dispatcher: Arc<EventDispatcher<E>>,
    logger: Arc<dyn DispatchLogger>,
}

impl<E: Event> ReaderPool<E> {
    pub fn new(dispatcher: Arc<EventDispatcher<E>>, logger: Arc<dyn DispatchLogger>) -> Self {
        Self { dispatcher, logger }
    }

    /// Starts `count` reader loops bound to the given queue and token.
    ///
    /// Returns one handle per loop; a count of zero yields an empty set, not
    /// an error. Must be called from within a tokio runtime.
    pub fn spawn_readers(
        &self,
        queue: flume::Receiver<E>,
        count: usize,
        cancel: CancellationToken,
    ) -> Vec<JoinHandle<()>> {
        (0..count)
            .map(|slot| {
                let dispatcher = Arc::clone(&self.dispatcher);
                let logger = Arc::clone(&self.logger);
                let queue = queue.clone();
                let cancel = cancel.clone();
                tokio::spawn(read_loop(slot, queue, dispatcher, logger, cancel))
            })
            .collect()
    }
}

async fn read_loop<E: Event>(
    slot: usize,
    queue: flume::Receiver<E>,
    dispatcher: Arc<EventDispatcher<E>>,
    logger: Arc<dyn DispatchLogger>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!(reader = slot, "reader stopped");
                break;
            }
            received = queue.recv_async() => match received {
                Ok(event) => {
                    let dispatch = dispatcher.dispatch(event, cancel.clone());
                    if AssertUnwindSafe(dispatch).catch_unwind().await.is_err() {
                        logger.error(&format!(
                            "reader {}: panic while dispatching event, event dropped",
                            slot
                        ));
                    }
                }
                Err(_) => {
                    debug!(reader = slot, "queue completed, reader exiting");
                    break;
                }
            }
        }
    }
}
