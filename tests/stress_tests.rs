//! Integration tests for the channel lifecycle under heavy concurrency.
//!
//! The stress runs interleave 100,000 start/stop/enqueue calls (roughly a
//! third each) across spawned tasks, for bounded and unbounded queues and
//! several reader counts. The run must finish within the time budget, the
//! only enqueue failures must be the not-ready/closed pair, and the channel
//! must remain usable afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use event_channel::{
    ChannelBuilder, ChannelError, Event, EventChannel, EventHandler, EventResult,
    HandlerRegistry, OverflowPolicy,
};
use rand::Rng;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

const OPERATIONS: usize = 100_000;

/// Payload value reserved for the post-stress liveness check.
const LIVENESS_MARKER: u64 = u64::MAX;

#[derive(Debug, Clone)]
struct StressEvent(u64);

impl Event for StressEvent {
    type Kind = u32;

    fn kind(&self) -> u32 {
        1
    }
}

#[derive(Default)]
struct StressHandler {
    processed: AtomicUsize,
    marker_seen: AtomicBool,
}

#[async_trait::async_trait]
impl EventHandler<StressEvent> for StressHandler {
    fn event_kind(&self) -> u32 {
        1
    }

    async fn handle(&self, event: StressEvent, _cancel: CancellationToken) -> EventResult<()> {
        // simulate a small payload
        tokio::task::yield_now().await;
        self.processed.fetch_add(1, Ordering::SeqCst);
        if event.0 == LIVENESS_MARKER {
            self.marker_seen.store(true, Ordering::SeqCst);
        }
        Ok(())
    }
}

fn stress_registry(handler: Arc<StressHandler>) -> HandlerRegistry<StressEvent> {
    let handlers: Vec<Arc<dyn EventHandler<StressEvent>>> = vec![handler];
    HandlerRegistry::from_handlers(handlers).unwrap()
}

/// Interleaves starts, stops and enqueues across spawned tasks, then checks
/// the channel still works with a fresh stop/start/enqueue sequence.
async fn run_stress(channel: Arc<EventChannel<StressEvent>>, handler: Arc<StressHandler>) {
    let rolls: Vec<u8> = {
        let mut rng = rand::thread_rng();
        (0..OPERATIONS).map(|_| rng.gen_range(0..100)).collect()
    };

    let mut tasks = Vec::with_capacity(OPERATIONS);
    for (sequence, roll) in rolls.into_iter().enumerate() {
        let channel = Arc::clone(&channel);
        tasks.push(tokio::spawn(async move {
            if roll < 33 {
                channel.start();
            } else if roll < 66 {
                channel.stop();
            } else {
                // enqueue is the only call that may fail, and only with the
                // expected not-ready/closed pair
                if let Err(err) = channel.enqueue(StressEvent(sequence as u64)).await {
                    assert!(
                        matches!(err, ChannelError::NotReady | ChannelError::Closed),
                        "unexpected enqueue failure: {err}"
                    );
                }
            }
        }));
    }

    timeout(Duration::from_secs(120), async {
        for task in tasks {
            task.await.expect("stress task panicked");
        }
    })
    .await
    .expect("stress run did not complete within the time budget");

    // the channel must be fully usable after the storm
    channel.stop();
    channel.start();
    channel
        .enqueue(StressEvent(LIVENESS_MARKER))
        .await
        .expect("enqueue after restart failed");

    timeout(Duration::from_secs(10), async {
        while !handler.marker_seen.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("marker event was not processed after restart");

    assert!(handler.processed.load(Ordering::SeqCst) >= 1);
    channel.stop();
    assert!(!channel.is_running());
}

fn bounded_channel(
    handler: Arc<StressHandler>,
    readers: usize,
    overflow: OverflowPolicy,
) -> Arc<EventChannel<StressEvent>> {
    Arc::new(
        ChannelBuilder::new(stress_registry(handler))
            .bounded()
            .with_capacity(64)
            .with_readers_count(readers)
            .with_multiple_writers(true)
            .with_overflow(overflow)
            .build()
            .unwrap(),
    )
}

fn unbounded_channel(
    handler: Arc<StressHandler>,
    readers: usize,
) -> Arc<EventChannel<StressEvent>> {
    Arc::new(
        ChannelBuilder::new(stress_registry(handler))
            .unbounded()
            .with_readers_count(readers)
            .with_multiple_writers(true)
            .build()
            .unwrap(),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_bounded_single_reader() {
    let handler = Arc::new(StressHandler::default());
    let channel = bounded_channel(handler.clone(), 1, OverflowPolicy::Wait);
    run_stress(channel, handler).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_bounded_reader_pool() {
    let handler = Arc::new(StressHandler::default());
    let channel = bounded_channel(handler.clone(), 4, OverflowPolicy::Wait);
    run_stress(channel, handler).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_bounded_drop_write() {
    let handler = Arc::new(StressHandler::default());
    let channel = bounded_channel(handler.clone(), 2, OverflowPolicy::DropWrite);
    run_stress(channel, handler).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_unbounded_single_reader() {
    let handler = Arc::new(StressHandler::default());
    let channel = unbounded_channel(handler.clone(), 1);
    run_stress(channel, handler).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stress_unbounded_reader_pool() {
    let handler = Arc::new(StressHandler::default());
    let channel = unbounded_channel(handler.clone(), 4);
    run_stress(channel, handler).await;
}
