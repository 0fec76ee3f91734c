// Copyright 2016 The vow Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Deferred values with typed, composable chaining.
//!
//! A [`Promise`] stands for a value that is not available yet. The producer
//! settles it exactly once, resolving it with a value or rejecting it with
//! an arbitrary error; consumers chain settle handlers that fire
//! synchronously at settlement, each chain step yielding a new promise
//! typed by what its handlers return.
//!
//! ```
//! use vow::{make_promise, make_resolved};
//!
//! let doubled = make_resolved(21).success(|n| n * 2);
//! assert_eq!(doubled.value(), Some(42));
//!
//! // Deferred settlement: stash the handle, settle later.
//! let mut stashed = None;
//! let pending = make_promise(|p| stashed = Some(p.clone()));
//! let chained = pending.success(|n: i32| n + 1);
//! assert!(chained.is_pending());
//! stashed.unwrap().resolve(4).unwrap();
//! assert_eq!(chained.value(), Some(5));
//! ```
//!
//! There is no scheduler and no internal locking: settlement happens on the
//! thread of the settling call, handler invocation is synchronous and
//! recursive, and handles are reference-counted and single-threaded.
//! Concurrency integration, if any, belongs to the caller.

mod chain;
mod error;
mod factory;
mod promise;

pub use either::Either;

pub use crate::chain::ChainInto;
pub use crate::error::{PromiseError, Rejection};
pub use crate::factory::{make_promise, make_rejected, make_resolved};
pub use crate::promise::{Promise, State};
