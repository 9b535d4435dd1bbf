/*!
 * Notification Collector
 * Synchronous fan-out of engine events to every live subscriber
 */

use crate::monitoring::events::{Event, Severity};
use crate::monitoring::streaming::{StreamStats, Subscriber};

/// Engine-owned notification hub
#[derive(Debug, Default)]
pub struct Collector {
    senders: Vec<flume::Sender<Event>>,
    produced: u64,
    delivered: u64,
}

impl Collector {
    /// Create a collector with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber; it only sees events emitted after this call
    pub fn subscribe(&mut self) -> Subscriber {
        let (tx, rx) = flume::unbounded();
        self.senders.push(tx);
        Subscriber::new(rx)
    }

    /// Emit an event to all subscribers (primary API)
    ///
    /// Unbounded channels never block; a failed send means the receiver was
    /// dropped, so that sender is pruned.
    pub fn emit(&mut self, event: Event) {
        self.produced += 1;
        let mut delivered = 0;
        self.senders.retain(|tx| {
            let ok = tx.send(event.clone()).is_ok();
            if ok {
                delivered += 1;
            }
            ok
        });
        self.delivered += delivered;
    }

    /// Emit a log entry
    #[inline]
    pub fn log(&mut self, severity: Severity, message: impl Into<String>) {
        self.emit(Event::log(severity, message));
    }

    /// Emit a layout change notification
    #[inline]
    pub fn memory_changed(&mut self) {
        self.emit(Event::MemoryChanged);
    }

    /// Get stream statistics
    pub fn stream_stats(&self) -> StreamStats {
        StreamStats {
            events_produced: self.produced,
            events_delivered: self.delivered,
            active_subscribers: self.senders.len(),
        }
    }
}
