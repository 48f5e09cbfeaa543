//! # State Module
//!
//! The two pieces of mutable ordering state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐      ┌──────────────────────────┐    │
//! │  │      SelectionContext        │      │       CartStore          │    │
//! │  │                              │      │                          │    │
//! │  │  Mutex<                      │      │  Mutex<Cart>             │    │
//! │  │    directory: [Restaurant]   │      │                          │    │
//! │  │    view: Browsing | Viewing  │      │                          │    │
//! │  │  >                           │      │                          │    │
//! │  │  AtomicU64 latest ticket     │      │                          │    │
//! │  └──────────────┬───────────────┘      └────────────▲─────────────┘    │
//! │                 │   open_restaurant commits: clear() │                  │
//! │                 └────────────────────────────────────┘                  │
//! │                                                                         │
//! │  LOCK ORDER: selection, then cart. No lock is held across an .await.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Neither owns the other. [`OrderingSession`](crate::session::OrderingSession)
//! owns both and passes the cart in where a selection change must clear it.

mod cart;
mod selection;

pub use cart::CartStore;
pub use selection::{OpenOutcome, SelectionContext, SelectionView};

use std::sync::{Mutex, MutexGuard};

/// Locks `mutex`, recovering the data if a previous holder panicked.
///
/// Every critical section in this crate is a short synchronous update that
/// leaves the data valid at each step, so a poisoned lock still guards
/// consistent state.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
