// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the publisher library.
//!
//! The dispatcher has a deliberately narrow failure surface: subscribing and
//! publishing cannot fail, and a rejected unsubscription is reported as
//! `false` rather than as an error. The variants below describe what can go
//! wrong *inside* a dispatch pass.

use thiserror::Error;

use crate::event::EventTypeId;
use crate::subscription::HandlerId;

/// The main error type for this library.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A type-erased handler was invoked with an event of a type other than
    /// the one it was registered for.
    ///
    /// The public API never produces this; it signals a broken internal
    /// pairing between a handler and the table entry holding it.
    #[error("handler for `{expected}` invoked with `{actual}`")]
    EventTypeMismatch {
        /// The event type the handler was registered for.
        expected: EventTypeId,
        /// The event type that was presented.
        actual: EventTypeId,
    },

    /// A handler panicked while the publisher was isolating failures.
    #[error("handler {handler} panicked on `{event_type}`: {message}")]
    HandlerPanicked {
        /// The handler that panicked.
        handler: HandlerId,
        /// The event type being dispatched.
        event_type: EventTypeId,
        /// The panic payload, when it was a string.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
