// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handler identifiers and subscription tokens.
//!
//! - [`HandlerId`] - Per-publisher, strictly increasing handler number
//! - [`HandlerToken`] - Capability returned by `subscribe`, used to unsubscribe

use std::fmt;

use crate::event::EventTypeId;
use crate::publisher::PublisherId;

/// Identifier of one registered handler.
///
/// IDs are assigned from a per-publisher counter starting at 1 and are never
/// reused within a publisher's lifetime. Because they only increase, each
/// table entry is naturally ordered by ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Creates a handler ID with the given value.
    #[must_use]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({})", self.0)
    }
}

/// Opaque capability identifying one subscription.
///
/// Returned by [`Publisher::subscribe`](crate::Publisher::subscribe) and
/// accepted by [`Publisher::unsubscribe`](crate::Publisher::unsubscribe).
/// The token records which publisher issued it, so presenting it to any
/// other publisher (including one created after the issuing publisher was
/// dropped) is rejected.
///
/// Tokens are `Copy`. Only the first successful `unsubscribe` has an effect;
/// later presentations of the same token return `false`.
///
/// # Examples
///
/// ```
/// use publisher_lib::Publisher;
///
/// struct UserCreated;
///
/// let publisher = Publisher::new();
/// let token = publisher.subscribe(|_: &mut UserCreated| {});
///
/// assert!(publisher.unsubscribe(token));
/// assert!(!publisher.unsubscribe(token));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerToken {
    publisher: PublisherId,
    handler: HandlerId,
    event_type: EventTypeId,
}

impl HandlerToken {
    pub(crate) fn new(publisher: PublisherId, handler: HandlerId, event_type: EventTypeId) -> Self {
        Self {
            publisher,
            handler,
            event_type,
        }
    }

    /// Returns the ID of the publisher that issued this token.
    #[must_use]
    pub fn publisher_id(&self) -> PublisherId {
        self.publisher
    }

    /// Returns the ID of the subscribed handler.
    #[must_use]
    pub fn handler_id(&self) -> HandlerId {
        self.handler
    }

    /// Returns the event type the handler is subscribed to.
    #[must_use]
    pub fn event_type(&self) -> EventTypeId {
        self.event_type
    }
}

impl fmt::Display for HandlerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.handler, self.event_type)
    }
}
