//! Bounded single-producer/single-consumer relay from the audio thread to a UI.
//!
//! Built on `rtrb`. The producer side never blocks and never allocates: when
//! the ring is full the newest event is dropped, unread events are never
//! overwritten. The consumer drains whatever is available once per refresh.

use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Visualization record published by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualEvent {
    /// A note started or stopped sounding.
    Note { note: u8, on: bool },
    /// Arpeggiator step, carrying a coarse band index in `0..5`.
    Band(u8),
    /// Chord mode was re-armed; every displayed note is gone.
    Reset,
}

/// Number of bands in `VisualEvent::Band`.
pub const BAND_COUNT: u8 = 5;

pub struct RelaySender<T> {
    tx: Producer<T>,
    dropped: u64,
}

pub struct RelayReceiver<T> {
    rx: Consumer<T>,
}

/// Create a relay holding at most `capacity` unread events.
pub fn channel<T>(capacity: usize) -> (RelaySender<T>, RelayReceiver<T>) {
    let (tx, rx) = RingBuffer::<T>::new(capacity);
    (RelaySender { tx, dropped: 0 }, RelayReceiver { rx })
}

/// Typed constructor for the engine's visualization stream.
pub fn visual_channel(
    capacity: usize,
) -> (RelaySender<VisualEvent>, RelayReceiver<VisualEvent>) {
    log::debug!(target: "relay", "visual relay created (capacity {capacity})");
    channel(capacity)
}

impl<T> RelaySender<T> {
    /// Publish an event. Returns `false` if the ring was full and the event dropped.
    #[inline]
    pub fn push(&mut self, event: T) -> bool {
        match self.tx.push(event) {
            Ok(()) => true,
            Err(PushError::Full(_)) => {
                self.dropped = self.dropped.wrapping_add(1);
                false
            }
        }
    }

    /// Events dropped because the consumer fell behind.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl<T> RelayReceiver<T> {
    /// Take every event available right now.
    ///
    /// Events pushed while the iterator is being consumed are left for the
    /// next call.
    pub fn drain(&mut self) -> Drain<'_, T> {
        let remaining = self.rx.slots();
        Drain {
            rx: &mut self.rx,
            remaining,
        }
    }

    pub fn pop(&mut self) -> Option<T> {
        self.rx.pop().ok()
    }

    pub fn len(&self) -> usize {
        self.rx.slots()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

pub struct Drain<'a, T> {
    rx: &'a mut Consumer<T>,
    remaining: usize,
}

impl<T> Iterator for Drain<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.rx.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
