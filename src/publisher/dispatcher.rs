// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The dispatcher facade.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::event::EventTypeId;
use crate::publisher::{FailurePolicy, PublishReport, PublisherConfig, PublisherId};
use crate::subscription::HandlerToken;
use crate::subscription::handler::HandlerAdapter;
use crate::subscription::table::{HandlerSlot, SubscriptionTable};

/// Type-safe, in-process event dispatcher.
///
/// Handlers subscribe to one concrete event type and are invoked
/// synchronously, on the publishing thread, in the order they subscribed.
/// Publishing a type nobody subscribed to is a silent no-op.
///
/// # Re-entrancy
///
/// A handler may call [`subscribe`](Self::subscribe),
/// [`unsubscribe`](Self::unsubscribe) or [`publish`](Self::publish) on the
/// publisher that is invoking it. Each dispatch pass works from a snapshot
/// of the handlers registered when it started:
///
/// - a handler removed mid-pass still runs in that pass,
/// - a handler added mid-pass first runs on the next publish.
///
/// Handlers must be `'static`, so a handler that publishes on its own
/// publisher should hold a [`Weak`](std::sync::Weak) reference to it.
/// Holding an `Arc` creates a reference cycle.
///
/// # Thread Safety
///
/// The publisher is `Send + Sync`. A single lock guards the subscription
/// table and is released before any handler runs.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use publisher_lib::Publisher;
///
/// struct UserCreated {
///     username: String,
/// }
///
/// let publisher = Publisher::new();
/// let greeted = Arc::new(AtomicUsize::new(0));
///
/// let counter = greeted.clone();
/// let token = publisher.subscribe(move |event: &mut UserCreated| {
///     println!("Hello, {}!", event.username);
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// publisher.publish(UserCreated { username: "max".to_string() });
/// assert_eq!(greeted.load(Ordering::SeqCst), 1);
///
/// assert!(publisher.unsubscribe(token));
/// publisher.publish(UserCreated { username: "john".to_string() });
/// assert_eq!(greeted.load(Ordering::SeqCst), 1);
/// ```
pub struct Publisher {
    id: PublisherId,
    config: PublisherConfig,
    table: SubscriptionTable,
}

impl Publisher {
    /// Creates a publisher with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(PublisherConfig::default())
    }

    /// Creates a publisher with the given configuration.
    #[must_use]
    pub fn with_config(config: PublisherConfig) -> Self {
        let id = PublisherId::new();
        tracing::debug!(publisher = %config.name(), id = ?id, "Created publisher");
        Self {
            id,
            config,
            table: SubscriptionTable::new(),
        }
    }

    /// Returns this publisher's unique ID.
    #[must_use]
    pub fn id(&self) -> PublisherId {
        self.id
    }

    /// Returns this publisher's configuration.
    #[must_use]
    pub fn config(&self) -> &PublisherConfig {
        &self.config
    }

    // =========================================================================
    // Subscription
    // =========================================================================

    /// Registers `handler` for events whose concrete type is exactly `E`.
    ///
    /// Never fails. There is no duplicate detection: registering two
    /// identical handlers yields two independent subscriptions.
    pub fn subscribe<E, F>(&self, handler: F) -> HandlerToken
    where
        E: Any,
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        let event_type = EventTypeId::of::<E>();
        let handler_id = self
            .table
            .insert(Arc::new(HandlerAdapter::<E, F>::new(handler)));

        tracing::debug!(
            publisher = %self.config.name(),
            event_type = %event_type,
            handler = %handler_id,
            "Subscribed handler"
        );
        HandlerToken::new(self.id, handler_id, event_type)
    }

    /// Removes the subscription identified by `token`.
    ///
    /// Returns `true` if the handler was found and removed. Returns `false`
    /// without changing anything if the token was issued by another
    /// publisher or its handler has already been removed.
    pub fn unsubscribe(&self, token: HandlerToken) -> bool {
        if token.publisher_id() != self.id {
            tracing::warn!(
                publisher = %self.config.name(),
                token_publisher = ?token.publisher_id(),
                handler = %token.handler_id(),
                "Rejected token issued by another publisher"
            );
            return false;
        }

        let removed = self.table.remove(token.event_type(), token.handler_id());
        if removed {
            tracing::debug!(
                publisher = %self.config.name(),
                event_type = %token.event_type(),
                handler = %token.handler_id(),
                "Unsubscribed handler"
            );
        } else {
            tracing::debug!(
                publisher = %self.config.name(),
                handler = %token.handler_id(),
                "Handler already unsubscribed"
            );
        }
        removed
    }

    /// Removes every subscription.
    ///
    /// Outstanding tokens become stale; handler IDs are not reused.
    pub fn clear(&self) {
        tracing::debug!(publisher = %self.config.name(), "Clearing all handlers");
        self.table.clear();
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Publishes `event` to every handler subscribed to its type.
    ///
    /// Handlers receive `&mut E` and may move fields out of the event; later
    /// handlers observe those changes.
    pub fn publish<E: Any>(&self, mut event: E) {
        self.publish_mut(&mut event);
    }

    /// Publishes an event the caller keeps ownership of.
    ///
    /// Any changes handlers make to the event are visible afterwards.
    pub fn publish_mut<E: Any>(&self, event: &mut E) {
        let report = self.publish_report(event);
        if !report.is_success() {
            tracing::debug!(
                publisher = %self.config.name(),
                event_type = %report.event_type(),
                failures = report.failures().len(),
                "Publish completed with handler failures"
            );
        }
    }

    /// Publishes an event and returns a summary of the dispatch pass.
    ///
    /// Under [`FailurePolicy::Propagate`] a panicking handler unwinds out of
    /// this call. Under [`FailurePolicy::Isolate`] the panic is caught,
    /// reported, and delivery continues.
    #[must_use]
    pub fn publish_report<E: Any>(&self, event: &mut E) -> PublishReport {
        let event_type = EventTypeId::of::<E>();
        let policy = self.config.failure_policy();
        let mut report = PublishReport::new(event_type);

        let visited = self.table.for_each(event_type, |slot| {
            let outcome = match policy {
                FailurePolicy::Propagate => slot.invoke(event_type, &mut *event),
                FailurePolicy::Isolate => invoke_isolated(slot, event_type, &mut *event),
            };

            match outcome {
                Ok(()) => report.record_delivery(),
                Err(error) => {
                    self.log_failure(slot, &error);
                    report.record_failure(error);
                }
            }
        });

        tracing::trace!(
            publisher = %self.config.name(),
            event_type = %event_type,
            handlers = visited,
            delivered = report.delivered(),
            "Published event"
        );
        report
    }

    fn log_failure(&self, slot: &HandlerSlot, error: &Error) {
        match error {
            Error::HandlerPanicked { .. } => tracing::warn!(
                publisher = %self.config.name(),
                handler = %slot.id(),
                error = %error,
                "Handler panicked, continuing delivery"
            ),
            Error::EventTypeMismatch { .. } => tracing::error!(
                publisher = %self.config.name(),
                handler = %slot.id(),
                error = %error,
                "Handler stored under the wrong event type"
            ),
        }
    }

    // =========================================================================
    // Statistics
    // =========================================================================

    /// Returns the number of handlers subscribed to `E`.
    #[must_use]
    pub fn subscriber_count<E: Any>(&self) -> usize {
        self.table.len(EventTypeId::of::<E>())
    }

    /// Returns the total number of handlers across all event types.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.table.total()
    }

    /// Returns `true` if no handlers are subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handler_count() == 0
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("id", &self.id)
            .field("name", &self.config.name())
            .field("handler_count", &self.handler_count())
            .finish()
    }
}

fn invoke_isolated(slot: &HandlerSlot, event_type: EventTypeId, event: &mut dyn Any) -> Result<()> {
    panic::catch_unwind(AssertUnwindSafe(|| slot.invoke(event_type, event))).unwrap_or_else(
        |payload| {
            Err(Error::HandlerPanicked {
                handler: slot.id(),
                event_type,
                message: panic_message(payload.as_ref()),
            })
        },
    )
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
