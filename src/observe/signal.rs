//! Change signal and subscription guard

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn()>;

struct SignalInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl SignalInner {
    fn emit(&self) {
        // Snapshot first so a callback may subscribe or unsubscribe.
        let snapshot: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener();
        }
    }
}

/// A "something changed" signal with any number of listeners
///
/// Listeners are called in registration order. Cloning a signal produces an
/// independent signal with no listeners: a copied item or budget does not
/// inherit the observers of the original.
pub struct ChangeSignal {
    inner: Rc<SignalInner>,
}

impl ChangeSignal {
    /// Create a signal with no listeners
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SignalInner {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Register a callback, returning a guard that unregisters it on drop
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            id,
            signal: Rc::downgrade(&self.inner),
        }
    }

    /// Notify every listener
    pub fn emit(&self) {
        self.inner.emit();
    }

    /// A callback that re-emits on this signal
    ///
    /// The callback holds only a weak reference, so it does nothing once the
    /// signal is gone.
    pub fn forwarder(&self) -> impl Fn() + 'static {
        let target = Rc::downgrade(&self.inner);
        move || {
            if let Some(inner) = target.upgrade() {
                inner.emit();
            }
        }
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }
}

impl Default for ChangeSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ChangeSignal {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for a registered listener
///
/// The listener stays registered until the guard is dropped.
#[must_use = "dropping a Subscription unregisters the listener immediately"]
pub struct Subscription {
    id: u64,
    signal: Weak<SignalInner>,
}

impl Subscription {
    /// Whether the signal this guard belongs to still exists
    pub fn is_active(&self) -> bool {
        self.signal.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.signal.upgrade() {
            if let Ok(mut listeners) = inner.listeners.try_borrow_mut() {
                listeners.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter(signal: &ChangeSignal) -> (Rc<Cell<u32>>, Subscription) {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let sub = signal.subscribe(move || seen.set(seen.get() + 1));
        (count, sub)
    }

    #[test]
    fn test_emit_reaches_listener() {
        let signal = ChangeSignal::new();
        let (count, _sub) = counter(&signal);

        signal.emit();
        signal.emit();

        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let signal = ChangeSignal::new();
        let (count, sub) = counter(&signal);
        assert_eq!(signal.listener_count(), 1);

        drop(sub);
        signal.emit();

        assert_eq!(count.get(), 0);
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn test_listeners_called_in_order() {
        let signal = ChangeSignal::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        let _a = signal.subscribe(move || first.borrow_mut().push(1));
        let second = Rc::clone(&order);
        let _b = signal.subscribe(move || second.borrow_mut().push(2));

        signal.emit();

        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_forwarder_chains_signals() {
        let child = ChangeSignal::new();
        let parent = ChangeSignal::new();
        let (count, _sub) = counter(&parent);

        let _link = child.subscribe(parent.forwarder());
        child.emit();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_forwarder_after_target_dropped() {
        let child = ChangeSignal::new();
        let parent = ChangeSignal::new();
        let _link = child.subscribe(parent.forwarder());

        drop(parent);
        child.emit();
    }

    #[test]
    fn test_subscription_outlives_signal() {
        let signal = ChangeSignal::new();
        let (_count, sub) = counter(&signal);
        assert!(sub.is_active());

        drop(signal);

        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_clone_has_no_listeners() {
        let signal = ChangeSignal::new();
        let (count, _sub) = counter(&signal);

        let copy = signal.clone();
        copy.emit();

        assert_eq!(copy.listener_count(), 0);
        assert_eq!(count.get(), 0);
    }
}
