//! Queue construction and policy-aware writes.
//!
//! One generation owns one `EventQueue`: a flume MPMC channel, bounded or
//! unbounded per the channel configuration. Reader loops compete for items
//! through cloned receivers; producers write through [`EventQueue::write`],
//! which applies the configured overflow policy.

use tokio_util::sync::CancellationToken;

use crate::config::{ChannelConfig, OverflowPolicy};
use crate::error::{ChannelError, ChannelResult};

pub(crate) struct EventQueue<E> {
    sender: flume::Sender<E>,
    receiver: flume::Receiver<E>,
    policy: OverflowPolicy,
}

impl<E> Clone for EventQueue<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            receiver: self.receiver.clone(),
            policy: self.policy,
        }
    }
}

impl<E: Send + 'static> EventQueue<E> {
    /// Builds the queue flavor the configuration asks for.
    pub(crate) fn from_config(config: &ChannelConfig) -> Self {
        match config {
            ChannelConfig::Bounded(options) => {
                let (sender, receiver) = flume::bounded(options.capacity);
                Self {
                    sender,
                    receiver,
                    policy: options.overflow,
                }
            }
            ChannelConfig::Unbounded(_) => {
                let (sender, receiver) = flume::unbounded();
                Self {
                    sender,
                    receiver,
                    // an unbounded queue is never full, so the write path
                    // degenerates to a plain send
                    policy: OverflowPolicy::Wait,
                }
            }
        }
    }

    /// Returns a receiver handle for one reader loop.
    pub(crate) fn reader(&self) -> flume::Receiver<E> {
        self.receiver.clone()
    }

    /// Writes one event, applying the overflow policy.
    ///
    /// The caller captures the cancellation token together with this queue
    /// handle; a generation retired mid-write surfaces as
    /// [`ChannelError::Closed`].
    pub(crate) async fn write(&self, event: E, cancel: &CancellationToken) -> ChannelResult<()> {
        if cancel.is_cancelled() {
            return Err(ChannelError::Closed);
        }

        match self.policy {
            OverflowPolicy::Wait => tokio::select! {
                _ = cancel.cancelled() => Err(ChannelError::Closed),
                sent = self.sender.send_async(event) => sent.map_err(|_| ChannelError::Closed),
            },
            OverflowPolicy::DropWrite | OverflowPolicy::DropNewest => {
                match self.sender.try_send(event) {
                    Ok(()) => Ok(()),
                    // full queue: the write completes and the item is dropped
                    Err(flume::TrySendError::Full(_)) => Ok(()),
                    Err(flume::TrySendError::Disconnected(_)) => Err(ChannelError::Closed),
                }
            }
            OverflowPolicy::DropOldest => {
                let mut event = event;
                loop {
                    match self.sender.try_send(event) {
                        Ok(()) => return Ok(()),
                        Err(flume::TrySendError::Full(returned)) => {
                            // evict the head to make room; a competing reader
                            // may win the pop, which frees space all the same
                            let _ = self.receiver.try_recv();
                            event = returned;
                        }
                        Err(flume::TrySendError::Disconnected(_)) => {
                            return Err(ChannelError::Closed);
                        }
                    }
                }
            }
        }
    }
}
