// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event type identity.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of an event type.
///
/// Every distinct `'static` type maps to exactly one `EventTypeId`, and
/// repeated lookups for the same type return equal values. Publishers key
/// their subscription tables by this identity, so a handler registered for
/// `UserCreated` is never reached by publishing a `UserRemoved`.
///
/// Equality and hashing only consider the underlying [`TypeId`]; the type
/// name is carried along for logs and error messages.
///
/// # Examples
///
/// ```
/// use publisher_lib::event::EventTypeId;
///
/// struct UserCreated;
/// struct UserRemoved;
///
/// assert_eq!(EventTypeId::of::<UserCreated>(), EventTypeId::of::<UserCreated>());
/// assert_ne!(EventTypeId::of::<UserCreated>(), EventTypeId::of::<UserRemoved>());
/// ```
#[derive(Clone, Copy)]
pub struct EventTypeId {
    id: TypeId,
    name: &'static str,
}

impl EventTypeId {
    /// Returns the identity of the event type `E`.
    #[must_use]
    pub fn of<E: Any>() -> Self {
        Self {
            id: TypeId::of::<E>(),
            name: std::any::type_name::<E>(),
        }
    }

    /// Returns the fully qualified name of the event type.
    ///
    /// The exact format is not stable across compiler versions and should
    /// only be used for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the underlying [`TypeId`].
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns `true` if this identity belongs to the event type `E`.
    #[must_use]
    pub fn is<E: Any>(&self) -> bool {
        self.id == TypeId::of::<E>()
    }
}

impl PartialEq for EventTypeId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventTypeId {}

impl Hash for EventTypeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventTypeId({})", self.name)
    }
}

impl fmt::Display for EventTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
