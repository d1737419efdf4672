// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Publisher Lib - A type-safe, in-process event dispatcher.
//!
//! Components broadcast strongly-typed events to any number of handlers
//! without knowing who listens. A handler subscribes to exactly one event
//! type and receives a mutable reference to every event of that type.
//!
//! # Features
//!
//! - **Typed handlers**: `subscribe(|event: &mut UserCreated| ...)`, no casts
//! - **Registration order**: handlers for one type run in subscription order
//! - **Scoped tokens**: a token only unsubscribes on the publisher that issued it
//! - **Re-entrant**: handlers may subscribe, unsubscribe or publish while running
//! - **Failure policy**: panics either propagate or are isolated and reported
//!
//! # Quick Start
//!
//! ```
//! use publisher_lib::Publisher;
//!
//! struct UserCreated {
//!     username: String,
//! }
//!
//! let publisher = Publisher::new();
//!
//! // Keep the token if you want to remove the handler later
//! let token = publisher.subscribe(|event: &mut UserCreated| {
//!     println!("Hello, {}, thanks for signing up!", event.username);
//! });
//!
//! publisher.publish(UserCreated { username: "max".to_string() });
//!
//! assert!(publisher.unsubscribe(token));
//! ```
//!
//! ## Event Chaining
//!
//! A handler may publish further events. Hold the publisher through a
//! [`Weak`](std::sync::Weak) reference to avoid a reference cycle:
//!
//! ```
//! use std::sync::Arc;
//!
//! use publisher_lib::Publisher;
//!
//! struct UserCreated {
//!     username: String,
//! }
//!
//! struct UserWonLottery {
//!     username: String,
//!     prize_id: u64,
//! }
//!
//! let publisher = Arc::new(Publisher::new());
//!
//! let weak = Arc::downgrade(&publisher);
//! publisher.subscribe(move |event: &mut UserCreated| {
//!     if let Some(publisher) = weak.upgrade() {
//!         publisher.publish(UserWonLottery {
//!             username: std::mem::take(&mut event.username),
//!             prize_id: 33133,
//!         });
//!     }
//! });
//!
//! publisher.subscribe(|event: &mut UserWonLottery| {
//!     println!("Hello, {}, you won prize {}!", event.username, event.prize_id);
//! });
//!
//! publisher.publish(UserCreated { username: "max".to_string() });
//! ```

pub mod error;
pub mod event;
pub mod publisher;
pub mod subscription;

pub use error::{Error, Result};
pub use event::EventTypeId;
pub use publisher::{FailurePolicy, PublishReport, Publisher, PublisherConfig, PublisherId};
pub use subscription::{HandlerId, HandlerToken, Subscribable};
