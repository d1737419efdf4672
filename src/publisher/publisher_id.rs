// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Publisher identifier type.

use std::fmt;

use uuid::Uuid;

/// Unique identifier of a [`Publisher`](crate::Publisher) instance.
///
/// Every publisher draws a fresh UUID v4 when it is created and stamps it
/// into each [`HandlerToken`](crate::HandlerToken) it issues. A token whose
/// publisher ID does not match is rejected by `unsubscribe`, which also
/// covers tokens that outlived the publisher that issued them.
///
/// # Examples
///
/// ```
/// use publisher_lib::Publisher;
///
/// let a = Publisher::new();
/// let b = Publisher::new();
/// assert_ne!(a.id(), b.id());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublisherId(Uuid);

impl PublisherId {
    /// Creates a new unique publisher identifier.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for PublisherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First 8 hex digits are enough to tell instances apart in logs.
        let short = &self.0.simple().to_string()[..8];
        write!(f, "PublisherId({short})")
    }
}

impl fmt::Display for PublisherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
