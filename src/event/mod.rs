// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event type identity.
//!
//! Events are plain application-defined values; any `'static` type can be
//! published. What the dispatcher needs from an event is only its runtime
//! identity, [`EventTypeId`], which keys the subscription table.
//!
//! # Examples
//!
//! ```
//! use publisher_lib::event::EventTypeId;
//!
//! struct UserCreated {
//!     username: String,
//! }
//!
//! let id = EventTypeId::of::<UserCreated>();
//! assert!(id.is::<UserCreated>());
//! ```

mod event_type;

pub use event_type::EventTypeId;
