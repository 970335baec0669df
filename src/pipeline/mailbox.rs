//! Single-slot handoff between the capture worker and the game loop.
//!
//! Publishing replaces whatever is waiting, so the consumer always gets
//! the freshest result and never more than one stale one. Neither side
//! ever waits on the other beyond the slot's lock.

use parking_lot::Mutex;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    closed: bool,
    /// Results replaced before the consumer saw them.
    overwritten: u64,
}

/// What a consumer finds in the mailbox.
#[derive(Debug, PartialEq, Eq)]
pub enum Received<T> {
    Value(T),
    Empty,
    /// The producer has shut down and nothing is left to take.
    Closed,
}

#[derive(Debug)]
pub struct Mailbox<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Mailbox<T> {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot {
                value: None,
                closed: false,
                overwritten: 0,
            }),
        }
    }

    /// Store `value`, dropping any result the consumer has not taken yet.
    /// Returns true if an older result was dropped. Publishing into a
    /// closed mailbox is a no-op.
    pub fn publish(&self, value: T) -> bool {
        let mut slot = self.slot.lock();
        if slot.closed {
            return false;
        }
        let replaced = slot.value.replace(value).is_some();
        if replaced {
            slot.overwritten += 1;
        }
        replaced
    }

    /// Take the waiting result without blocking.
    ///
    /// A result published before [`close`](Self::close) can still be taken.
    pub fn take(&self) -> Received<T> {
        let mut slot = self.slot.lock();
        match slot.value.take() {
            Some(value) => Received::Value(value),
            None if slot.closed => Received::Closed,
            None => Received::Empty,
        }
    }

    pub fn close(&self) {
        self.slot.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.slot.lock().closed
    }

    pub fn overwritten(&self) -> u64 {
        self.slot.lock().overwritten
    }
}
