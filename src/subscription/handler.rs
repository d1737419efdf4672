// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Type-erased handler adapters.
//!
//! A subscription table stores handlers for many event types side by side,
//! so every typed closure is wrapped in a [`HandlerAdapter`] and stored as
//! `Arc<dyn ErasedHandler>`. The adapter remembers the [`EventTypeId`] it was
//! built for and refuses to run when invoked under any other identity.

use std::any::Any;
use std::marker::PhantomData;

use crate::error::{Error, Result};
use crate::event::EventTypeId;

/// A handler whose event type has been erased.
pub(crate) trait ErasedHandler: Send + Sync {
    /// The event type this handler was registered for.
    fn event_type(&self) -> EventTypeId;

    /// Invokes the handler with an event presented under `event_type`.
    ///
    /// The identity is checked before the event is downcast. A mismatch
    /// returns [`Error::EventTypeMismatch`] without calling the handler.
    fn invoke(&self, event_type: EventTypeId, event: &mut dyn Any) -> Result<()>;
}

/// Adapts a closure taking `&mut E` to [`ErasedHandler`].
pub(crate) struct HandlerAdapter<E, F> {
    handler: F,
    // fn pointer keeps the adapter Send + Sync regardless of E.
    _event: PhantomData<fn(&mut E)>,
}

impl<E, F> HandlerAdapter<E, F>
where
    E: Any,
    F: Fn(&mut E) + Send + Sync + 'static,
{
    pub(crate) fn new(handler: F) -> Self {
        Self {
            handler,
            _event: PhantomData,
        }
    }
}

impl<E, F> ErasedHandler for HandlerAdapter<E, F>
where
    E: Any,
    F: Fn(&mut E) + Send + Sync + 'static,
{
    fn event_type(&self) -> EventTypeId {
        EventTypeId::of::<E>()
    }

    fn invoke(&self, event_type: EventTypeId, event: &mut dyn Any) -> Result<()> {
        let expected = self.event_type();
        let mismatch = Error::EventTypeMismatch {
            expected,
            actual: event_type,
        };

        if event_type != expected {
            return Err(mismatch);
        }

        // Unreachable when the identity matched, but the checked downcast
        // keeps a lying caller from reaching the closure.
        let event = event.downcast_mut::<E>().ok_or(mismatch)?;
        (self.handler)(event);
        Ok(())
    }
}
