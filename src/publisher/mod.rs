// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The event dispatcher and its configuration.
//!
//! - [`Publisher`] - Subscribe, unsubscribe, publish
//! - [`PublisherConfig`] / [`FailurePolicy`] - Log name and panic handling
//! - [`PublisherId`] - Instance identity stamped into every token
//! - [`PublishReport`] - Outcome of one dispatch pass
//!
//! # Examples
//!
//! ```
//! use publisher_lib::publisher::{FailurePolicy, Publisher, PublisherConfig};
//!
//! struct OrderPlaced {
//!     order_id: u64,
//! }
//!
//! let publisher = Publisher::with_config(
//!     PublisherConfig::new().with_failure_policy(FailurePolicy::Isolate),
//! );
//!
//! publisher.subscribe(|event: &mut OrderPlaced| {
//!     assert_eq!(event.order_id, 7);
//! });
//!
//! let report = publisher.publish_report(&mut OrderPlaced { order_id: 7 });
//! assert_eq!(report.delivered(), 1);
//! assert!(report.is_success());
//! ```

mod config;
mod dispatcher;
mod publisher_id;
mod report;

pub use config::{FailurePolicy, PublisherConfig};
pub use dispatcher::Publisher;
pub use publisher_id::PublisherId;
pub use report::PublishReport;
