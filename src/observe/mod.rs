//! Change notification primitives
//!
//! Budgets and budget items announce mutations through a [`ChangeSignal`].
//! Observers register a callback with [`ChangeSignal::subscribe`] and keep the
//! returned [`Subscription`] alive for as long as they want to hear about
//! changes. Dropping the guard removes the callback.
//!
//! # Architecture
//!
//! Signals use `Rc<RefCell<..>>` for single-threaded shared ownership. A
//! subscription only holds a `Weak` reference back to its signal, so a guard
//! that outlives its signal is harmless.
//!
//! A budget links each of its items to its own signal with
//! [`ChangeSignal::forwarder`]. The links are rebuilt whenever the item lists
//! change, so an item removed from a budget no longer reaches it.

mod signal;

pub use signal::{ChangeSignal, Subscription};
