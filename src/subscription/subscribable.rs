// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscribable trait for services that publish events.
//!
//! Domain services usually own a [`Publisher`] and emit events from their
//! own methods. Implementing [`Subscribable`] lets callers subscribe to such
//! a service directly instead of reaching for its publisher.

use std::any::Any;

use crate::publisher::Publisher;
use crate::subscription::HandlerToken;

/// Trait for types that expose an embedded [`Publisher`] to subscribers.
///
/// Only [`publisher`](Self::publisher) must be implemented; subscription
/// methods delegate to it.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// use publisher_lib::{Publisher, Subscribable};
///
/// struct UserCreated {
///     id: u64,
/// }
///
/// #[derive(Default)]
/// struct UserService {
///     publisher: Publisher,
///     next_id: AtomicU64,
/// }
///
/// impl UserService {
///     fn create_user(&self) -> u64 {
///         let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
///         self.publisher.publish(UserCreated { id });
///         id
///     }
/// }
///
/// impl Subscribable for UserService {
///     fn publisher(&self) -> &Publisher {
///         &self.publisher
///     }
/// }
///
/// let service = UserService::default();
/// let last = Arc::new(AtomicU64::new(0));
///
/// let seen = last.clone();
/// let token = service.subscribe(move |event: &mut UserCreated| {
///     seen.store(event.id, Ordering::SeqCst);
/// });
///
/// service.create_user();
/// assert_eq!(last.load(Ordering::SeqCst), 1);
///
/// assert!(service.unsubscribe(token));
/// ```
pub trait Subscribable {
    /// Returns the publisher events are emitted through.
    fn publisher(&self) -> &Publisher;

    /// Subscribes to events of type `E` emitted by this service.
    fn subscribe<E, F>(&self, handler: F) -> HandlerToken
    where
        E: Any,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        self.publisher().subscribe(handler)
    }

    /// Unsubscribes a handler by its token.
    ///
    /// Returns `true` if the subscription was found and removed. Tokens
    /// issued by another service are rejected.
    fn unsubscribe(&self, token: HandlerToken) -> bool {
        self.publisher().unsubscribe(token)
    }
}

impl Subscribable for Publisher {
    fn publisher(&self) -> &Publisher {
        self
    }
}
