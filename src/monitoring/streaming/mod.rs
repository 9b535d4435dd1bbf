/*!
 * Event Streaming
 * Per-subscriber delivery of engine notifications over flume channels
 */

use crate::monitoring::events::Event;

/// Event statistics for monitoring the observer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub events_produced: u64,
    pub events_delivered: u64,
    pub active_subscribers: usize,
}

/// Receiving end handed to a driver
///
/// Events are buffered without bound until drained; dropping the subscriber
/// detaches it from the engine on the next emit.
#[derive(Debug)]
pub struct Subscriber {
    receiver: flume::Receiver<Event>,
}

impl Subscriber {
    pub(crate) fn new(receiver: flume::Receiver<Event>) -> Self {
        Self { receiver }
    }

    /// Take the next pending event, if any
    #[inline]
    pub fn next(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Take all pending events in emission order
    pub fn drain(&mut self) -> Vec<Event> {
        self.receiver.drain().collect()
    }

    /// Number of events waiting
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
