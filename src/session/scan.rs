//! Scan Session Bridge
//!
//! Carries discovered devices from the radio's event context to the
//! console poll loop. The queue is bounded; when it stays full for longer
//! than the offer timeout the newest event is dropped and counted.
//!
//! ```text
//!  radio event ctx          ScanQueue (cap 20)           poll loop
//!  ───────────────  offer   ┌────────────────┐  recv   ─────────────
//!   ScanSink  ────────────► │ e0 e1 e2 ...   │ ───────► print line
//!                           └────────────────┘
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embedded_hal::delay::DelayNs;

use crate::config::{QUEUE_SLICE_MS, SCAN_PUSH_TIMEOUT_MS, SCAN_QUEUE_CAPACITY};
use crate::types::ScanEvent;

type EventChannel = Channel<CriticalSectionRawMutex, ScanEvent, SCAN_QUEUE_CAPACITY>;

/// Bounded queue of scan events
///
/// Lives in a `static` so the radio's event context can hold a handle to
/// it for the duration of a scan.
pub struct ScanQueue {
    events: EventChannel,
    dropped: AtomicU32,
}

impl ScanQueue {
    /// Create an empty queue
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Producer handle for the radio's scan callback
    #[must_use]
    pub fn sink(&'static self) -> ScanSink {
        ScanSink { queue: self }
    }

    /// Take the oldest event without waiting
    pub fn try_recv(&self) -> Option<ScanEvent> {
        self.events.try_receive().ok()
    }

    /// Take the oldest event, waiting up to `timeout_ms` for one to arrive
    pub fn recv_timeout<D: DelayNs + ?Sized>(&self, delay: &mut D, timeout_ms: u32) -> Option<ScanEvent> {
        let mut waited = 0;
        loop {
            if let Some(event) = self.try_recv() {
                return Some(event);
            }
            if waited >= timeout_ms {
                return None;
            }
            let slice = QUEUE_SLICE_MS.min(timeout_ms - waited);
            delay.delay_ms(slice);
            waited += slice;
        }
    }

    /// Discard buffered events and clear the drop counter
    ///
    /// Returns how many buffered events were discarded.
    pub fn reset(&self) -> usize {
        let discarded = self.events.len();
        self.events.clear();
        self.dropped.store(0, Ordering::Relaxed);
        discarded
    }

    /// Events rejected because the queue was full
    #[must_use]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Events waiting for the consumer
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check whether no event is waiting
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Maximum number of waiting events
    #[must_use]
    pub const fn capacity(&self) -> usize {
        SCAN_QUEUE_CAPACITY
    }
}

impl Default for ScanQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer side of a [`ScanQueue`]
///
/// Cheap to copy and safe to move into the radio's event context.
#[derive(Clone, Copy)]
pub struct ScanSink {
    queue: &'static ScanQueue,
}

impl ScanSink {
    /// Enqueue without waiting
    ///
    /// Returns `false` and counts a drop if the queue is full.
    pub fn offer(&self, event: ScanEvent) -> bool {
        if self.queue.events.try_send(event).is_ok() {
            true
        } else {
            self.queue.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Deliver a discovered device from the radio's scan callback
    ///
    /// This is the callback contract: waits up to [`SCAN_PUSH_TIMEOUT_MS`]
    /// for room, then drops the event. Returns `false` and counts a drop
    /// if the queue stayed full.
    pub fn push<D: DelayNs + ?Sized>(&self, event: ScanEvent, delay: &mut D) -> bool {
        self.offer_timeout(event, delay, SCAN_PUSH_TIMEOUT_MS)
    }

    /// Enqueue, waiting up to `timeout_ms` for room
    ///
    /// Returns `false` and counts a drop if the queue stayed full.
    pub fn offer_timeout<D: DelayNs + ?Sized>(&self, event: ScanEvent, delay: &mut D, timeout_ms: u32) -> bool {
        let mut waited = 0;
        while waited < timeout_ms {
            if self.queue.events.try_send(event).is_ok() {
                return true;
            }
            let slice = QUEUE_SLICE_MS.min(timeout_ms - waited);
            delay.delay_ms(slice);
            waited += slice;
        }
        self.offer(event)
    }
}

impl core::fmt::Debug for ScanSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScanSink")
            .field("pending", &self.queue.len())
            .finish()
    }
}
