// Copyright 2016 The vow Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Construction surface: pending, resolved and rejected promises.

use std::any::Any;

use crate::error::Rejection;
use crate::promise::{Promise, Slot};

/// Allocates a pending promise and hands the fresh handle to `launcher`
/// before returning it. The launcher runs synchronously; it may settle the
/// promise on the spot or stash a clone of the handle for later.
pub fn make_promise<T, F>(launcher: F) -> Promise<T>
where
    T: Clone + 'static,
    F: FnOnce(&Promise<T>),
{
    let promise = Promise::pending();
    launcher(&promise);
    promise
}

/// A promise that is already resolved with `value`. `make_resolved(())` is
/// the unit form.
pub fn make_resolved<T: Clone + 'static>(value: T) -> Promise<T> {
    Promise::with_slot(Slot::Value(value))
}

/// A promise that is already rejected with `error`, without the unhandled
/// rejection check: this is the sanctioned way to produce a rejected
/// promise that has no handler attached yet. The value type is the
/// caller's choice.
pub fn make_rejected<T: Clone + 'static, E: Any>(error: E) -> Promise<T> {
    Promise::with_slot(Slot::Error(Rejection::new(error)))
}
