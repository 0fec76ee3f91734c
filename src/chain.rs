// Copyright 2016 The vow Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Chaining: `then` and friends, and the transfer of a handler's result
//! into the downstream promise.

use std::panic::{self, AssertUnwindSafe};

use log::trace;

use crate::error::{PromiseError, Rejection};
use crate::promise::Promise;

/// Transfers a settle handler's return value into the downstream promise.
///
/// Two forms are accepted for a downstream of type `U`: a plain `U`, which
/// resolves the downstream directly, and a `Promise<U>`, which the
/// downstream *adopts*: it settles exactly as the returned promise does,
/// one level deep. Where the two branches of a [`then`](Promise::then)
/// disagree, the downstream type names the common container (`Option<X>`
/// when one branch yields nothing, [`Either<A, B>`](either::Either) for two
/// distinct value types) and the branches return `Some`/`None` or
/// `Left`/`Right` accordingly. Inference picks `U` from the handlers and
/// the use site; as with `collect()`, annotate the destination when more
/// than one form applies.
pub trait ChainInto<U: Clone + 'static> {
    fn chain_into(self, next: &Promise<U>) -> Result<(), PromiseError>;
}

impl<U: Clone + 'static> ChainInto<U> for U {
    fn chain_into(self, next: &Promise<U>) -> Result<(), PromiseError> {
        next.resolve(self)
    }
}

impl<U: Clone + 'static> ChainInto<U> for Promise<U> {
    fn chain_into(self, next: &Promise<U>) -> Result<(), PromiseError> {
        self.pipe(next.clone())
    }
}

/// Runs a settle handler, turning a panic into rejection of the downstream
/// promise with the panic payload as the carried value.
fn run_handler<A, R, U, F>(handler: F, argument: A, next: &Promise<U>) -> Result<(), PromiseError>
where
    U: Clone + 'static,
    R: ChainInto<U>,
    F: FnOnce(A) -> R,
{
    match panic::catch_unwind(AssertUnwindSafe(move || handler(argument))) {
        Ok(output) => output.chain_into(next),
        Err(payload) => next.settle_err(Rejection::from_panic(payload)),
    }
}

impl<T: Clone + 'static> Promise<T> {
    /// Attaches a pair of settle handlers and returns the downstream
    /// promise they feed. `on_resolve` receives the resolved value,
    /// `on_reject` the rejection carrier; either return value chains per
    /// [`ChainInto`]. A panic inside a handler rejects the downstream
    /// promise with the panic payload.
    ///
    /// If the promise is already settled, the matching handler runs before
    /// `then` returns.
    pub fn then<U, Ro, Re, Fo, Fe>(&self, on_resolve: Fo, on_reject: Fe) -> Promise<U>
    where
        U: Clone + 'static,
        Ro: ChainInto<U>,
        Re: ChainInto<U>,
        Fo: FnOnce(T) -> Ro + 'static,
        Fe: FnOnce(Rejection) -> Re + 'static,
    {
        let next = Promise::pending();
        let down = next.clone();
        // An immediate fire may land a rejection in the downstream we are
        // about to hand back; the caller can still attach its rescue.
        let _ = self.attach(move |settled| match settled {
            Ok(value) => run_handler(on_resolve, value, &down),
            Err(error) => run_handler(on_reject, error, &down),
        });
        next
    }

    /// Resolve-only form of [`then`](Promise::then): a rejection passes to
    /// the downstream promise carrier-identical.
    pub fn success<U, Ro, Fo>(&self, on_resolve: Fo) -> Promise<U>
    where
        U: Clone + 'static,
        Ro: ChainInto<U>,
        Fo: FnOnce(T) -> Ro + 'static,
    {
        let next = Promise::pending();
        let down = next.clone();
        let _ = self.attach(move |settled| match settled {
            Ok(value) => run_handler(on_resolve, value, &down),
            Err(error) => down.settle_err(error),
        });
        next
    }

    /// Reject-only form of [`then`](Promise::then): a resolved value is
    /// forwarded untouched, so the downstream type must admit it alongside
    /// the handler's return.
    pub fn rescue<U, Re, Fe>(&self, on_reject: Fe) -> Promise<U>
    where
        U: Clone + 'static,
        T: ChainInto<U>,
        Re: ChainInto<U>,
        Fe: FnOnce(Rejection) -> Re + 'static,
    {
        let next = Promise::pending();
        let down = next.clone();
        let _ = self.attach(move |settled| match settled {
            Ok(value) => value.chain_into(&down),
            Err(error) => run_handler(on_reject, error, &down),
        });
        next
    }

    /// Attaches a single handler invoked on both settlement paths with the
    /// outcome, value or carrier. Its return value chains like a `then`
    /// handler's.
    pub fn finally<U, R, F>(&self, on_settle: F) -> Promise<U>
    where
        U: Clone + 'static,
        R: ChainInto<U>,
        F: FnOnce(Result<T, Rejection>) -> R + 'static,
    {
        let next = Promise::pending();
        let down = next.clone();
        let _ = self.attach(move |settled| run_handler(on_settle, settled, &down));
        next
    }

    /// Adoption: `next` settles exactly as `self` does. One level deep
    /// only; a promise resolved with another promise hands that inner
    /// promise over as a plain value.
    pub(crate) fn pipe(&self, next: Promise<T>) -> Result<(), PromiseError> {
        trace!(
            "Promise({:p}): piping into Promise({:p})",
            self.addr(),
            next.addr()
        );
        self.attach(move |settled| match settled {
            Ok(value) => next.resolve(value),
            Err(error) => next.settle_err(error),
        })
    }
}
