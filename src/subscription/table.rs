// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription table keyed by event type.
//!
//! # Layout
//!
//! ```text
//! EventTypeId(UserCreated)    → [Handler(1), Handler(2), Handler(5)]
//! EventTypeId(UserWonLottery) → [Handler(3)]
//! EventTypeId(UserRemoved)    → [Handler(4)]
//! ```
//!
//! Handler IDs are handed out under the same lock that appends the slot, so
//! every entry is sorted by ID and registration order equals ID order.
//!
//! # Dispatch passes
//!
//! [`SubscriptionTable::for_each`] clones the entry (one `Arc` per slot)
//! while holding the lock, releases it, and only then calls into handlers.
//! A handler may therefore subscribe, unsubscribe, or publish again without
//! deadlocking and without disturbing the pass that invoked it.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::event::EventTypeId;
use crate::subscription::HandlerId;
use crate::subscription::handler::ErasedHandler;

/// One registered handler.
#[derive(Clone)]
pub(crate) struct HandlerSlot {
    id: HandlerId,
    handler: Arc<dyn ErasedHandler>,
}

impl HandlerSlot {
    pub(crate) fn id(&self) -> HandlerId {
        self.id
    }

    pub(crate) fn invoke(&self, event_type: EventTypeId, event: &mut dyn Any) -> Result<()> {
        self.handler.invoke(event_type, event)
    }
}

impl std::fmt::Debug for HandlerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerSlot")
            .field("id", &self.id)
            .field("event_type", &self.handler.event_type())
            .finish()
    }
}

struct Entries {
    /// Last handler ID handed out; 0 means none yet.
    last_id: u64,
    slots: HashMap<EventTypeId, Vec<HandlerSlot>>,
}

/// Handler slots grouped by event type, in registration order.
pub(crate) struct SubscriptionTable {
    entries: Mutex<Entries>,
}

impl SubscriptionTable {
    /// Creates an empty table.
    pub(crate) fn new() -> Self {
        Self {
            entries: Mutex::new(Entries {
                last_id: 0,
                slots: HashMap::new(),
            }),
        }
    }

    /// Appends `handler` to the entry for its event type.
    ///
    /// Returns the freshly assigned ID, which is greater than every ID
    /// previously returned by this table.
    pub(crate) fn insert(&self, handler: Arc<dyn ErasedHandler>) -> HandlerId {
        let mut entries = self.entries.lock();
        entries.last_id += 1;
        let id = HandlerId::new(entries.last_id);

        entries
            .slots
            .entry(handler.event_type())
            .or_default()
            .push(HandlerSlot { id, handler });
        id
    }

    /// Removes the slot with `id` from the entry for `event_type`.
    ///
    /// Remaining slots keep their relative order. Returns `false`, leaving
    /// the table untouched, when either the entry or the slot is missing.
    pub(crate) fn remove(&self, event_type: EventTypeId, id: HandlerId) -> bool {
        let mut entries = self.entries.lock();
        let Some(slots) = entries.slots.get_mut(&event_type) else {
            return false;
        };

        let Ok(position) = slots.binary_search_by_key(&id, HandlerSlot::id) else {
            return false;
        };

        slots.remove(position);
        if slots.is_empty() {
            entries.slots.remove(&event_type);
        }
        true
    }

    /// Copies the current entry for `event_type`.
    pub(crate) fn snapshot(&self, event_type: EventTypeId) -> Vec<HandlerSlot> {
        self.entries
            .lock()
            .slots
            .get(&event_type)
            .cloned()
            .unwrap_or_default()
    }

    /// Calls `f` once for each slot registered for `event_type` when the
    /// pass starts, in registration order.
    ///
    /// Returns the number of slots visited.
    pub(crate) fn for_each<F>(&self, event_type: EventTypeId, mut f: F) -> usize
    where
        F: FnMut(&HandlerSlot),
    {
        let snapshot = self.snapshot(event_type);
        for slot in &snapshot {
            f(slot);
        }
        snapshot.len()
    }

    /// Returns the number of slots registered for `event_type`.
    pub(crate) fn len(&self, event_type: EventTypeId) -> usize {
        self.entries
            .lock()
            .slots
            .get(&event_type)
            .map_or(0, Vec::len)
    }

    /// Returns the number of slots across all event types.
    pub(crate) fn total(&self) -> usize {
        self.entries.lock().slots.values().map(Vec::len).sum()
    }

    /// Removes every slot. Handler IDs keep increasing afterwards.
    pub(crate) fn clear(&self) {
        self.entries.lock().slots.clear();
    }
}

impl std::fmt::Debug for SubscriptionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.lock();
        f.debug_struct("SubscriptionTable")
            .field("event_types", &entries.slots.len())
            .field("last_id", &entries.last_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::handler::HandlerAdapter;

    struct UserCreated;
    struct UserRemoved;

    fn noop<E: Any>() -> Arc<dyn ErasedHandler> {
        Arc::new(HandlerAdapter::new(|_: &mut E| {}))
    }

    fn ids(table: &SubscriptionTable, event_type: EventTypeId) -> Vec<u64> {
        table
            .snapshot(event_type)
            .iter()
            .map(|slot| slot.id().value())
            .collect()
    }

    #[test]
    fn new_table_is_empty() {
        let table = SubscriptionTable::new();
        assert_eq!(table.total(), 0);
        assert_eq!(table.len(EventTypeId::of::<UserCreated>()), 0);
        assert!(table.snapshot(EventTypeId::of::<UserCreated>()).is_empty());
    }

    #[test]
    fn insert_assigns_increasing_ids_across_types() {
        let table = SubscriptionTable::new();

        let a = table.insert(noop::<UserCreated>());
        let b = table.insert(noop::<UserRemoved>());
        let c = table.insert(noop::<UserCreated>());

        assert_eq!(a.value(), 1);
        assert!(a < b && b < c);
        assert_eq!(ids(&table, EventTypeId::of::<UserCreated>()), vec![1, 3]);
        assert_eq!(ids(&table, EventTypeId::of::<UserRemoved>()), vec![2]);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn remove_preserves_order() {
        let table = SubscriptionTable::new();
        let event_type = EventTypeId::of::<UserCreated>();

        let _first = table.insert(noop::<UserCreated>());
        let second = table.insert(noop::<UserCreated>());
        let _third = table.insert(noop::<UserCreated>());
        let _fourth = table.insert(noop::<UserCreated>());

        assert!(table.remove(event_type, second));
        assert_eq!(ids(&table, event_type), vec![1, 3, 4]);
    }

    #[test]
    fn remove_missing_slot_is_noop() {
        let table = SubscriptionTable::new();
        let event_type = EventTypeId::of::<UserCreated>();
        let id = table.insert(noop::<UserCreated>());

        assert!(!table.remove(event_type, HandlerId::new(99)));
        assert!(!table.remove(EventTypeId::of::<UserRemoved>(), id));
        assert_eq!(ids(&table, event_type), vec![1]);
    }

    #[test]
    fn remove_twice_fails_second_time() {
        let table = SubscriptionTable::new();
        let event_type = EventTypeId::of::<UserCreated>();
        let id = table.insert(noop::<UserCreated>());

        assert!(table.remove(event_type, id));
        assert!(!table.remove(event_type, id));
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let table = SubscriptionTable::new();
        table.insert(noop::<UserCreated>());
        table.insert(noop::<UserCreated>());
        table.clear();

        assert_eq!(table.total(), 0);
        assert_eq!(table.insert(noop::<UserCreated>()).value(), 3);
    }

    #[test]
    fn for_each_visits_in_order() {
        let table = SubscriptionTable::new();
        table.insert(noop::<UserCreated>());
        table.insert(noop::<UserRemoved>());
        table.insert(noop::<UserCreated>());

        let mut visited = Vec::new();
        let count = table.for_each(EventTypeId::of::<UserCreated>(), |slot| {
            visited.push(slot.id().value());
        });

        assert_eq!(count, 2);
        assert_eq!(visited, vec![1, 3]);
    }

    #[test]
    fn for_each_tolerates_mutation_during_pass() {
        let table = SubscriptionTable::new();
        let event_type = EventTypeId::of::<UserCreated>();
        table.insert(noop::<UserCreated>());
        let second = table.insert(noop::<UserCreated>());

        let mut visited = Vec::new();
        table.for_each(event_type, |slot| {
            visited.push(slot.id().value());
            if slot.id().value() == 1 {
                // Mutating while the pass runs must not deadlock.
                assert!(table.remove(event_type, second));
                table.insert(noop::<UserCreated>());
            }
        });

        // The pass works from the snapshot taken when it started.
        assert_eq!(visited, vec![1, 2]);
        assert_eq!(ids(&table, event_type), vec![1, 3]);
    }

    #[test]
    fn slot_invoke_goes_through_adapter() {
        let table = SubscriptionTable::new();
        let hits = Arc::new(Mutex::new(0_u32));
        let hits_clone = hits.clone();
        table.insert(Arc::new(HandlerAdapter::new(move |_: &mut UserCreated| {
            *hits_clone.lock() += 1;
        })));

        let event_type = EventTypeId::of::<UserCreated>();
        table.for_each(event_type, |slot| {
            slot.invoke(event_type, &mut UserCreated).unwrap();
        });

        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn table_debug() {
        let table = SubscriptionTable::new();
        table.insert(noop::<UserCreated>());

        let debug = format!("{table:?}");
        assert!(debug.contains("SubscriptionTable"));
        assert!(debug.contains("last_id"));

        let slot_debug = format!("{:?}", table.snapshot(EventTypeId::of::<UserCreated>())[0]);
        assert!(slot_debug.contains("HandlerSlot"));
    }
}
