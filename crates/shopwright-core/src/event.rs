//! Typed session events with synchronous dispatch.
//!
//! The host delivers interactions one at a time, so events are dispatched
//! the moment they are raised: every subscriber for the kind runs before
//! `dispatch` returns, with mutable access to the world store. A
//! subscriber may return follow-up events; those are delivered after the
//! current event finishes, in the order produced.
//!
//! Subscriptions are explicit: `subscribe` returns a [`SubscriptionId`]
//! and `unsubscribe` removes it, so observers can be torn down without
//! leaking closures.

use crate::id::{ItemKindId, ObjectId, SubscriptionId};
use crate::populate::FillFailure;
use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// Event types
// ---------------------------------------------------------------------------

/// A session event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // -- Scene graph --
    ObjectSpawned {
        object: ObjectId,
    },
    ObjectDespawned {
        object: ObjectId,
    },

    // -- Access control --
    /// The physical switch changed state (user interaction).
    ToggleFlipped {
        switch: ObjectId,
        is_on: bool,
    },
    /// Some agent passed through a door, locked or not.
    DoorOpened {
        door: ObjectId,
    },
    /// The access controller finished propagating a lock transition.
    LockChanged {
        switch: ObjectId,
        locked: bool,
    },

    // -- Stocking --
    StockFilled {
        target: ObjectId,
        item: ItemKindId,
        quantity: u32,
    },
    FillRejected {
        target: ObjectId,
        failure: FillFailure,
    },
}

/// Discriminant tag for event types, used for subscription routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ObjectSpawned,
    ObjectDespawned,
    ToggleFlipped,
    DoorOpened,
    LockChanged,
    StockFilled,
    FillRejected,
}

/// Total number of event kinds.
const EVENT_KIND_COUNT: usize = 7;

impl Event {
    /// Get the discriminant kind for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ObjectSpawned { .. } => EventKind::ObjectSpawned,
            Event::ObjectDespawned { .. } => EventKind::ObjectDespawned,
            Event::ToggleFlipped { .. } => EventKind::ToggleFlipped,
            Event::DoorOpened { .. } => EventKind::DoorOpened,
            Event::LockChanged { .. } => EventKind::LockChanged,
            Event::StockFilled { .. } => EventKind::StockFilled,
            Event::FillRejected { .. } => EventKind::FillRejected,
        }
    }
}

impl EventKind {
    fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Subscribers
// ---------------------------------------------------------------------------

/// A subscriber runs synchronously inside `dispatch` with world access and
/// returns zero or more follow-up events to deliver next.
pub type Subscriber = Box<dyn FnMut(&Event, &mut crate::world::WorldStore) -> Vec<Event>>;

/// Optional predicate that filters events for a subscriber.
pub type EventFilter = Box<dyn Fn(&Event) -> bool>;

struct SubscriberEntry {
    id: SubscriptionId,
    filter: Option<EventFilter>,
    subscriber: Subscriber,
}

impl std::fmt::Debug for SubscriberEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberEntry")
            .field("id", &self.id)
            .field(
                "filter",
                &if self.filter.is_some() {
                    "Some(<fn>)"
                } else {
                    "None"
                },
            )
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// EventHub
// ---------------------------------------------------------------------------

/// The session's event hub: per-kind subscriber lists, immediate dispatch,
/// delivery counters.
#[derive(Debug, Default)]
pub struct EventHub {
    subscribers: [Vec<SubscriberEntry>; EVENT_KIND_COUNT],
    /// Events delivered per kind since session start.
    delivered: [u64; EVENT_KIND_COUNT],
    next_subscription: u64,
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for an event kind. Subscribers run in
    /// registration order.
    pub fn subscribe(&mut self, kind: EventKind, subscriber: Subscriber) -> SubscriptionId {
        self.subscribe_filtered(kind, None, subscriber)
    }

    /// Register a subscriber with an optional event filter.
    pub fn subscribe_filtered(
        &mut self,
        kind: EventKind,
        filter: Option<EventFilter>,
        subscriber: Subscriber,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers[kind.index()].push(SubscriberEntry {
            id,
            filter,
            subscriber,
        });
        id
    }

    /// Remove a subscription. Returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for list in &mut self.subscribers {
            let before = list.len();
            list.retain(|entry| entry.id != id);
            if list.len() != before {
                return true;
            }
        }
        false
    }

    /// Number of live subscriptions for a kind.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers[kind.index()].len()
    }

    /// Events delivered for a kind since session start.
    pub fn delivered_count(&self, kind: EventKind) -> u64 {
        self.delivered[kind.index()]
    }

    /// Deliver an event to its subscribers, then any follow-up events they
    /// produced, until the cascade settles. Subscribers cannot reach the
    /// hub itself, so dispatch never re-enters.
    pub fn dispatch(&mut self, event: Event, world: &mut crate::world::WorldStore) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let idx = event.kind().index();
            self.delivered[idx] += 1;
            for entry in &mut self.subscribers[idx] {
                if let Some(ref filter) = entry.filter
                    && !filter(&event)
                {
                    continue;
                }
                let follow_ups = (entry.subscriber)(&event, world);
                queue.extend(follow_ups);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
