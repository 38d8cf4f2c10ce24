// SPDX-License-Identifier: MPL-2.0
//! FIFO queue of messages waiting to be shown.
//!
//! Backed by two stacks: `front` holds the oldest entries in reverse so
//! dequeue is a `pop`, `back` receives new entries. `front` is refilled from
//! `back` only when it runs dry, which keeps both operations amortized O(1).

use super::MessageId;

/// Anything that can be looked up in the queue by message identity.
pub trait Identified {
    fn message_id(&self) -> MessageId;
}

/// Ordered, identity-addressable collection of pending messages.
#[derive(Debug)]
pub struct PendingQueue<T> {
    front: Vec<T>,
    back: Vec<T>,
}

impl<T> Default for PendingQueue<T> {
    fn default() -> Self {
        Self {
            front: Vec::new(),
            back: Vec::new(),
        }
    }
}

impl<T: Identified> PendingQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry; it will be dequeued after everything already queued.
    pub fn enqueue(&mut self, item: T) {
        self.back.push(item);
    }

    /// Removes and returns the oldest entry.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.front.is_empty() {
            self.front.extend(self.back.drain(..).rev());
        }
        self.front.pop()
    }

    /// Removes the entry with the given identity, if queued.
    ///
    /// Relative order of the remaining entries is unchanged.
    pub fn remove(&mut self, id: MessageId) -> Option<T> {
        if let Some(idx) = self.front.iter().position(|item| item.message_id() == id) {
            return Some(self.front.remove(idx));
        }
        if let Some(idx) = self.back.iter().position(|item| item.message_id() == id) {
            return Some(self.back.remove(idx));
        }
        None
    }

    #[must_use]
    pub fn contains(&self, id: MessageId) -> bool {
        self.iter().any(|item| item.message_id() == id)
    }

    /// Iterates entries in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.front.iter().rev().chain(self.back.iter())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.is_empty() && self.back.is_empty()
    }

    /// Drops every queued entry.
    pub fn clear(&mut self) {
        self.front.clear();
        self.back.clear();
    }
}
