// Copyright 2016 The vow Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The promise object: a deferred value behind a shared handle.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace};

use crate::error::{PromiseError, Rejection};

/// The states a promise can be in. The settled states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Pending,
    Resolved,
    Rejected,
}

/// What the promise currently holds. The slot is the state: a pending
/// promise holds `Empty`, a resolved one the value, a rejected one the
/// error carrier. Once the slot leaves `Empty` it never changes again.
pub(crate) enum Slot<T> {
    Empty,
    Value(T),
    Error(Rejection),
}

/// Fires exactly once with the settlement outcome. Its return value carries
/// contract errors from further down the chain back to the settling call.
type Continuation<T> = Box<dyn FnOnce(Result<T, Rejection>) -> Result<(), PromiseError>>;

struct Core<T> {
    slot: Slot<T>,
    on_settle: Option<Continuation<T>>,
}

/// A shared handle to a deferred value.
///
/// The producer settles the promise exactly once, with
/// [`resolve`](Promise::resolve) or [`reject`](Promise::reject); consumers
/// chain settle handlers with `then`, `success`, `rescue` and `finally`.
/// Cloning a `Promise` clones the handle, not the value: every clone refers
/// to the same settlement.
///
/// Settlement is synchronous. The handle is deliberately not `Send`; a
/// promise shared across threads is the caller's synchronization problem,
/// not this crate's.
pub struct Promise<T: 'static>(Rc<RefCell<Core<T>>>);

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Promise<T> {
        Promise(Rc::clone(&self.0))
    }
}

impl<T: Clone + 'static> Promise<T> {
    pub(crate) fn with_slot(slot: Slot<T>) -> Promise<T> {
        Promise(Rc::new(RefCell::new(Core {
            slot,
            on_settle: None,
        })))
    }

    pub(crate) fn pending() -> Promise<T> {
        Promise::with_slot(Slot::Empty)
    }

    /// Resolves the promise with `value`, then fires the settle handler if
    /// one is attached. Fails with `AlreadySettled` if the promise is not
    /// pending.
    pub fn resolve(&self, value: T) -> Result<(), PromiseError> {
        let handler = {
            let mut core = self.0.borrow_mut();
            if !matches!(core.slot, Slot::Empty) {
                return Err(PromiseError::AlreadySettled);
            }
            core.slot = Slot::Value(value.clone());
            core.on_settle.take()
        };
        trace!(
            "Promise({:p}): resolve => Resolved (handler: {})",
            self.addr(),
            handler.is_some()
        );
        match handler {
            Some(fire) => fire(Ok(value)),
            None => Ok(()),
        }
    }

    /// Rejects the promise with `error`, then fires the settle handler.
    /// With no handler attached the promise still transitions, but the call
    /// fails with `UnhandledRejection`. Fails with `AlreadySettled` if the
    /// promise is not pending.
    ///
    /// `error` may be any `'static` value; it is wrapped into a
    /// [`Rejection`] carrier unless it already is one.
    pub fn reject<E: Any>(&self, error: E) -> Result<(), PromiseError> {
        self.settle_err(Rejection::new(error))
    }

    /// Rejection path shared with the chaining machinery: stores an
    /// existing carrier without re-wrapping it.
    pub(crate) fn settle_err(&self, error: Rejection) -> Result<(), PromiseError> {
        let handler = {
            let mut core = self.0.borrow_mut();
            if !matches!(core.slot, Slot::Empty) {
                return Err(PromiseError::AlreadySettled);
            }
            core.slot = Slot::Error(error.clone());
            core.on_settle.take()
        };
        trace!(
            "Promise({:p}): reject => Rejected (handler: {})",
            self.addr(),
            handler.is_some()
        );
        match handler {
            Some(fire) => fire(Err(error)),
            None => Err(PromiseError::UnhandledRejection),
        }
    }

    /// Installs the settle continuation, replacing any previous one. If the
    /// promise is already settled the continuation fires before this call
    /// returns, and its outcome is handed back to the caller.
    ///
    /// The core is never borrowed across the continuation call, so handlers
    /// may settle other promises, or attempt to re-settle this one, freely.
    pub(crate) fn attach<F>(&self, on_settle: F) -> Result<(), PromiseError>
    where
        F: FnOnce(Result<T, Rejection>) -> Result<(), PromiseError> + 'static,
    {
        let mut core = self.0.borrow_mut();
        if matches!(core.slot, Slot::Empty) {
            if core.on_settle.is_some() {
                debug!("Promise({:p}): replacing settle handler", self.addr());
            }
            core.on_settle = Some(Box::new(on_settle));
            return Ok(());
        }
        let settled = match &core.slot {
            Slot::Value(value) => Ok(value.clone()),
            Slot::Error(error) => Err(error.clone()),
            Slot::Empty => unreachable!(),
        };
        drop(core);
        trace!("Promise({:p}): attach => firing immediately", self.addr());
        on_settle(settled)
    }

    /// Current state of the promise.
    pub fn state(&self) -> State {
        match self.0.borrow().slot {
            Slot::Empty => State::Pending,
            Slot::Value(_) => State::Resolved,
            Slot::Error(_) => State::Rejected,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state() == State::Pending
    }

    pub fn is_resolved(&self) -> bool {
        self.state() == State::Resolved
    }

    pub fn is_rejected(&self) -> bool {
        self.state() == State::Rejected
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// True if a settle handler is currently installed.
    pub fn has_handler(&self) -> bool {
        self.0.borrow().on_settle.is_some()
    }

    /// A copy of the resolved value, if the promise is resolved.
    pub fn value(&self) -> Option<T> {
        match &self.0.borrow().slot {
            Slot::Value(value) => Some(value.clone()),
            _ => None,
        }
    }

    /// The rejection carrier, if the promise is rejected.
    pub fn error(&self) -> Option<Rejection> {
        match &self.0.borrow().slot {
            Slot::Error(error) => Some(error.clone()),
            _ => None,
        }
    }

    pub(crate) fn addr(&self) -> *const () {
        Rc::as_ptr(&self.0) as *const ()
    }
}

impl<T: Clone + 'static> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("state", &self.state())
            .field("has_handler", &self.has_handler())
            .finish()
    }
}
