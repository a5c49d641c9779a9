//! Event signals with RAII subscriptions.
//!
//! # Design
//!
//! A [`Signal<T>`] fans events out into per-subscriber mailboxes.  The
//! subscriber holds the only strong reference to its mailbox inside a
//! [`Subscription<T>`]; the signal keeps a `Weak`.  Dropping the
//! subscription therefore revokes it on every exit path, and the next
//! `emit` prunes the dead entry.  There is no `unsubscribe` call to forget.
//!
//! Delivery is deferred: `emit` only enqueues, and the subscriber drains its
//! mailbox during its own update.  This keeps event handling free of
//! re-entrant borrows of the world that raised the event.
//!
//! ```rust
//! use gf_core::Signal;
//!
//! let mut damaged: Signal<f32> = Signal::default();
//! let sub = damaged.subscribe();
//! damaged.emit(10.0);
//! assert_eq!(sub.pop(), Some(10.0));
//!
//! drop(sub);
//! assert_eq!(damaged.emit(5.0), 0); // nobody is listening any more
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Mailbox<T> = RefCell<VecDeque<T>>;

// ── Signal ────────────────────────────────────────────────────────────────────

/// A multicast event source.
pub struct Signal<T> {
    subscribers: Vec<Weak<Mailbox<T>>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self { subscribers: Vec::new() }
    }
}

impl<T: Clone> Signal<T> {
    /// Register a new subscriber.  Events emitted from now on are queued in
    /// the returned handle until it is dropped.
    pub fn subscribe(&mut self) -> Subscription<T> {
        let mailbox = Rc::new(RefCell::new(VecDeque::new()));
        self.subscribers.push(Rc::downgrade(&mailbox));
        Subscription { mailbox }
    }

    /// Queue `event` for every live subscriber and prune revoked ones.
    ///
    /// Returns the number of subscribers that received the event.
    pub fn emit(&mut self, event: T) -> usize {
        let mut delivered = 0;
        self.subscribers.retain(|weak| match weak.upgrade() {
            Some(mailbox) => {
                mailbox.borrow_mut().push_back(event.clone());
                delivered += 1;
                true
            }
            None => false,
        });
        delivered
    }
}

impl<T> Signal<T> {
    /// Number of subscriptions that are still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.iter().filter(|w| w.strong_count() > 0).count()
    }

    /// Detach every subscriber.  Their handles stay valid but never receive
    /// another event.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// ── Subscription ──────────────────────────────────────────────────────────────

/// Receiving end of a [`Signal`].  Revoked when dropped.
pub struct Subscription<T> {
    mailbox: Rc<Mailbox<T>>,
}

impl<T> Subscription<T> {
    /// Take the oldest pending event, if any.
    pub fn pop(&self) -> Option<T> {
        self.mailbox.borrow_mut().pop_front()
    }

    /// Number of events waiting in the mailbox.
    pub fn len(&self) -> usize {
        self.mailbox.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.mailbox.borrow().is_empty()
    }

    /// Discard all pending events.
    pub fn clear(&self) {
        self.mailbox.borrow_mut().clear();
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("pending", &self.len())
            .finish()
    }
}
