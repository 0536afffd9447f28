//! Explicit subscriber lists for view lifecycle signals.
//!
//! # Responsibility
//! - Hold the handlers a presenter registers on a view.
//! - Tie each registration to a `Subscription` guard that removes it on drop.
//!
//! # Invariants
//! - Signals are UI-thread affine (`Rc`/`RefCell`), never shared across threads.
//! - `raise` dispatches to a snapshot of the handler list, so handlers may
//!   subscribe or drop subscriptions while a signal is being raised.
//! - A handler removed during dispatch still sees the in-flight raise.

use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::rc::{Rc, Weak};

type Handler<T> = Rc<dyn Fn(&T)>;

struct Slots<T: ?Sized> {
    next_id: u64,
    handlers: Vec<(u64, Handler<T>)>,
}

trait SlotRemoval {
    fn remove(&self, id: u64);
    fn contains(&self, id: u64) -> bool;
}

impl<T: ?Sized> SlotRemoval for RefCell<Slots<T>> {
    fn remove(&self, id: u64) {
        if let Ok(mut slots) = self.try_borrow_mut() {
            slots.handlers.retain(|(slot_id, _)| *slot_id != id);
        }
    }

    fn contains(&self, id: u64) -> bool {
        self.try_borrow()
            .map(|slots| slots.handlers.iter().any(|(slot_id, _)| *slot_id == id))
            .unwrap_or(false)
    }
}

/// Subscriber list for one view signal. `T` is the payload type.
pub struct Signal<T: ?Sized + 'static = ()> {
    slots: Rc<RefCell<Slots<T>>>,
}

impl<T: ?Sized + 'static> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: Rc::new(RefCell::new(Slots {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Registers `handler`; it stays registered while the returned guard lives.
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let mut slots = self.slots.borrow_mut();
        let id = slots.next_id;
        slots.next_id += 1;
        let handler: Handler<T> = Rc::new(handler);
        slots.handlers.push((id, handler));

        let weak: Weak<RefCell<Slots<T>>> = Rc::downgrade(&self.slots);
        let slots_ref: Weak<dyn SlotRemoval> = weak;
        Subscription {
            slots: slots_ref,
            id,
        }
    }

    /// Invokes every registered handler with `payload`, in subscription order.
    pub fn raise_with(&self, payload: &T) {
        let snapshot: Vec<Handler<T>> = self
            .slots
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(payload);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.slots.borrow().handlers.len()
    }
}

impl Signal<()> {
    /// Raises a payload-less signal.
    pub fn raise(&self) {
        self.raise_with(&());
    }
}

impl<T: ?Sized + 'static> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> Debug for Signal<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Registration guard returned by [`Signal::subscribe`].
///
/// Dropping the guard deregisters the handler. Outliving the signal is fine.
#[must_use = "dropping a Subscription immediately deregisters its handler"]
pub struct Subscription {
    slots: Weak<dyn SlotRemoval>,
    id: u64,
}

impl Subscription {
    /// Whether the handler is still registered on a live signal.
    pub fn is_active(&self) -> bool {
        self.slots
            .upgrade()
            .map(|slots| slots.contains(self.id))
            .unwrap_or(false)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(slots) = self.slots.upgrade() {
            slots.remove(self.id);
        }
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Signal, Subscription};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn raise_reaches_handlers_in_subscription_order() {
        let signal = Signal::<()>::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        let _a = signal.subscribe(move |_| first.borrow_mut().push("a"));
        let second = Rc::clone(&order);
        let _b = signal.subscribe(move |_| second.borrow_mut().push("b"));

        signal.raise();
        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn dropping_subscription_deregisters_handler() {
        let signal = Signal::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let subscription = signal.subscribe(move |_| counter.set(counter.get() + 1));

        signal.raise();
        assert!(subscription.is_active());
        drop(subscription);
        signal.raise();

        assert_eq!(hits.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn payload_signal_passes_borrowed_value() {
        let signal = Signal::<str>::new();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        let _guard = signal.subscribe(move |name: &str| sink.borrow_mut().push_str(name));

        signal.raise_with("title");
        assert_eq!(seen.borrow().as_str(), "title");
    }

    #[test]
    fn handler_may_drop_its_own_subscription_during_raise() {
        let signal = Rc::new(Signal::<()>::new());
        let holder: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let hits = Rc::new(Cell::new(0));

        let inner_holder = Rc::clone(&holder);
        let counter = Rc::clone(&hits);
        let subscription = signal.subscribe(move |_| {
            counter.set(counter.get() + 1);
            inner_holder.borrow_mut().take();
        });
        *holder.borrow_mut() = Some(subscription);

        signal.raise();
        signal.raise();
        assert_eq!(hits.get(), 1);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn subscription_outliving_signal_is_inactive() {
        let signal = Signal::<()>::new();
        let subscription = signal.subscribe(|_| {});
        drop(signal);
        assert!(!subscription.is_active());
    }
}
