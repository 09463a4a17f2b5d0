//--------------------------------------------------------------------------------------------------
// MODULE OVERVIEW
//--------------------------------------------------------------------------------------------------
// This module implements the channel lifecycle: one queue generation at a time, created by Start
// and retired by Stop, with producers enqueuing through a lock-free fast path.
//
// | Component     | Description                                                 |
// |---------------|-------------------------------------------------------------|
// | EventChannel  | Owns the current generation; Start/Stop/Enqueue surface     |
// | Generation    | One (queue, reader set, cancellation token) triple          |
//--------------------------------------------------------------------------------------------------

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;
use uuid::Uuid;

use crate::config::ChannelConfig;
use crate::dispatcher::EventDispatcher;
use crate::error::{ChannelError, ChannelResult, ConfigError};
use crate::event::Event;
use crate::logger::DispatchLogger;
use crate::queue::EventQueue;
use crate::reader::ReaderPool;
use crate::registry::HandlerRegistry;

/// One complete consumer setup: the queue, the reader tasks bound to it and
/// the cancellation token they observe. Created whole by `start`, retired
/// whole by `stop`, never reused across restarts.
struct Generation<E: Event> {
    id: Uuid,
    queue: EventQueue<E>,
    cancel: CancellationToken,
    readers: Vec<JoinHandle<()>>,
}

/// Typed event channel with a race-safe, idempotent start/stop lifecycle.
///
/// Producers call [`enqueue`](Self::enqueue) from any task; a pool of reader
/// loops drains the queue and routes each event to the handler registered for
/// its kind. `start` and `stop` may be called concurrently from any thread;
/// `start` while running performs a full restart.
///
/// `start` spawns reader tasks, so it must be called from within a tokio
/// runtime.
pub struct EventChannel<E: Event> {
    config: ChannelConfig,
    readers: ReaderPool<E>,
    /// Serializes start/stop; enqueue never takes it.
    lifecycle: Mutex<()>,
    running: AtomicBool,
    generation: RwLock<Option<Generation<E>>>,
}

impl<E: Event> EventChannel<E> {
    /// Builds a channel from a validated configuration, a pre-built handler
    /// registry and a logger for the dispatch path.
    ///
    /// # Errors
    /// Returns [`ConfigError::ZeroCapacity`] for a bounded configuration with
    /// capacity zero.
    pub fn new(
        config: ChannelConfig,
        registry: HandlerRegistry<E>,
        logger: Arc<dyn DispatchLogger>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let dispatcher = Arc::new(EventDispatcher::new(registry, Arc::clone(&logger)));
        let readers = ReaderPool::new(dispatcher, logger);
        Ok(Self {
            config,
            readers,
            lifecycle: Mutex::new(()),
            running: AtomicBool::new(false),
            generation: RwLock::new(None),
        })
    }

    /// Starts the channel, replacing any generation that is already running.
    ///
    /// Builds a fresh queue from the configuration, spawns the reader loops
    /// and only then flips the running flag, so a concurrent enqueue never
    /// observes a half-built generation.
    pub fn start(&self) {
        let _guard = self.lifecycle.lock();
        self.retire_generation();

        let queue = EventQueue::from_config(&self.config);
        let cancel = CancellationToken::new();
        let handles =
            self.readers
                .spawn_readers(queue.reader(), self.config.readers_count(), cancel.clone());
        let generation = Generation {
            id: Uuid::new_v4(),
            queue,
            cancel,
            readers: handles,
        };

        info!(
            generation = %generation.id,
            bounded = self.config.is_bounded(),
            readers = generation.readers.len(),
            single_writer = self.config.single_writer(),
            "event channel started"
        );

        *self.generation.write() = Some(generation);
        self.running.store(true, Ordering::SeqCst);
    }

    /// Stops the channel. Idempotent; a no-op when already stopped or never
    /// started.
    ///
    /// Completes the queue's producer side and cancels the generation token.
    /// Reader tasks terminate cooperatively on their own; this call does not
    /// wait for them.
    pub fn stop(&self) {
        // fast path, no lock: the common case under contention
        if !self.running.load(Ordering::SeqCst) {
            return;
        }

        let _guard = self.lifecycle.lock();
        if !self.running.load(Ordering::SeqCst) {
            return;
        }
        self.retire_generation();
    }

    /// Retires the current generation. Caller must hold the lifecycle lock.
    fn retire_generation(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(generation) = self.generation.write().take() {
            generation.cancel.cancel();
            info!(generation = %generation.id, "event channel stopped");
            // dropping the generation drops its queue sender, completing the
            // producer side; readers observe cancellation or disconnection
            // and exit without being joined
        }
    }

    /// Enqueues one event for asynchronous processing.
    ///
    /// Returns [`ChannelError::NotReady`] immediately when the channel is
    /// stopped; never blocks waiting for a start. With a bounded queue and
    /// the `Wait` overflow policy the call suspends until space frees up or
    /// the generation is cancelled.
    ///
    /// # Errors
    /// [`ChannelError::Closed`] when the write raced a concurrent stop:
    /// intentionally not synchronized with `start`/`stop`, so it can never
    /// deadlock against them. The queue handle and cancellation token are
    /// captured at call time and stay valid even if the generation is
    /// replaced mid-write; the stale write then fails instead of corrupting
    /// the new generation.
    pub async fn enqueue(&self, event: E) -> ChannelResult<()> {
        if !self.running.load(Ordering::SeqCst) {
            return Err(ChannelError::NotReady);
        }

        let Some((queue, cancel)) = self.snapshot() else {
            return Err(ChannelError::Closed);
        };
        queue.write(event, &cancel).await
    }

    /// Clones the current generation's queue handle and token out of the
    /// slot. The read lock is held only for the clone, never across an await.
    fn snapshot(&self) -> Option<(EventQueue<E>, CancellationToken)> {
        let slot = self.generation.read();
        slot.as_ref()
            .map(|generation| (generation.queue.clone(), generation.cancel.clone()))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }
}

impl<E: Event> Drop for EventChannel<E> {
    fn drop(&mut self) {
        self.stop();
    }
}
