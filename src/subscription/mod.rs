// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription bookkeeping.
//!
//! # Overview
//!
//! - [`HandlerId`] - Per-publisher handler number, strictly increasing
//! - [`HandlerToken`] - Capability returned by `subscribe`, used to unsubscribe
//! - [`Subscribable`] - Trait for services that embed a publisher
//!
//! Internally, each typed closure is wrapped in a type-erased adapter and
//! stored in a subscription table keyed by [`EventTypeId`]. The adapter
//! checks the identity it is invoked under before touching the event, so a
//! handler can never observe an event of the wrong type.
//!
//! [`EventTypeId`]: crate::event::EventTypeId
//!
//! # Usage
//!
//! ```
//! use publisher_lib::Publisher;
//!
//! struct UserRemoved {
//!     username: String,
//! }
//!
//! let publisher = Publisher::new();
//! let token = publisher.subscribe(|event: &mut UserRemoved| {
//!     println!("Bye, {}!", event.username);
//! });
//!
//! // Later, unsubscribe
//! assert!(publisher.unsubscribe(token));
//! ```

pub(crate) mod handler;
mod subscribable;
pub(crate) mod table;
mod token;

pub use subscribable::Subscribable;
pub use token::{HandlerId, HandlerToken};
