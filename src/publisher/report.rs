// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outcome of a single dispatch pass.

use crate::error::Error;
use crate::event::EventTypeId;

/// Summary of one `publish` call.
///
/// Returned by [`Publisher::publish_report`](crate::Publisher::publish_report).
/// Failures are only ever collected when the publisher isolates handler
/// panics; under [`FailurePolicy::Propagate`](crate::FailurePolicy::Propagate)
/// a panicking handler unwinds past the report instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    event_type: EventTypeId,
    delivered: usize,
    failures: Vec<Error>,
}

impl PublishReport {
    pub(crate) fn new(event_type: EventTypeId) -> Self {
        Self {
            event_type,
            delivered: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) fn record_delivery(&mut self) {
        self.delivered += 1;
    }

    pub(crate) fn record_failure(&mut self, error: Error) {
        self.failures.push(error);
    }

    /// The event type that was published.
    #[must_use]
    pub fn event_type(&self) -> EventTypeId {
        self.event_type
    }

    /// Number of handlers that ran to completion.
    #[must_use]
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    /// Failures collected during the pass, in handler order.
    #[must_use]
    pub fn failures(&self) -> &[Error] {
        &self.failures
    }

    /// Returns `true` if every handler in the pass completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
