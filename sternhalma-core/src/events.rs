//! Synchronous observer registry for game state changes

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::hex::Hex;
use crate::topology::TriangleIndex;

/// Change descriptor for a relocated piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceMoved {
    pub from: Hex,
    pub to: Hex,
    pub owner: TriangleIndex,
}

/// Event names subscribers register for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    PieceMoved,
    TurnChanged,
    StateReset,
}

/// Event payloads
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum GameEvent {
    PieceMoved(PieceMoved),
    TurnChanged {
        previous: TriangleIndex,
        current: TriangleIndex,
        turn_index: usize,
    },
    StateReset {
        player_count: usize,
        turn_order: Vec<TriangleIndex>,
    },
}

impl GameEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::PieceMoved(_) => EventKind::PieceMoved,
            GameEvent::TurnChanged { .. } => EventKind::TurnChanged,
            GameEvent::StateReset { .. } => EventKind::StateReset,
        }
    }
}

/// Handle returned by [`EventBus::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type Callback = Box<dyn FnMut(&GameEvent)>;

/// Callback registrations per event kind.
///
/// Delivery is synchronous and in-process. Subscribers to the same kind
/// get no ordering guarantee relative to each other.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: FxHashMap<EventKind, Vec<(SubscriptionId, Callback)>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: EventKind, callback: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers
            .entry(kind)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for callbacks in self.subscribers.values_mut() {
            if let Some(index) = callbacks.iter().position(|(sub, _)| *sub == id) {
                drop(callbacks.swap_remove(index));
                return true;
            }
        }
        false
    }

    pub fn emit(&mut self, event: &GameEvent) {
        if let Some(callbacks) = self.subscribers.get_mut(&event.kind()) {
            for (_, callback) in callbacks.iter_mut() {
                callback(event);
            }
        }
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.subscribers.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: FxHashMap<EventKind, usize> = self
            .subscribers
            .iter()
            .map(|(&kind, callbacks)| (kind, callbacks.len()))
            .collect();
        f.debug_struct("EventBus")
            .field("next_id", &self.next_id)
            .field("subscribers", &counts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn moved() -> GameEvent {
        GameEvent::PieceMoved(PieceMoved {
            from: Hex::new(0, 0),
            to: Hex::new(1, 0),
            owner: 3,
        })
    }

    #[test]
    fn test_emit_reaches_matching_subscribers() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&seen);
        bus.subscribe(EventKind::PieceMoved, move |event| sink.borrow_mut().push(event.clone()));
        let sink = Rc::clone(&seen);
        bus.subscribe(EventKind::StateReset, move |event| sink.borrow_mut().push(event.clone()));

        bus.emit(&moved());
        assert_eq!(seen.borrow().as_slice(), &[moved()]);

        bus.emit(&GameEvent::TurnChanged {
            previous: 3,
            current: 0,
            turn_index: 1,
        });
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));

        let counter = Rc::clone(&count);
        let id = bus.subscribe(EventKind::PieceMoved, move |_| *counter.borrow_mut() += 1);
        let counter = Rc::clone(&count);
        bus.subscribe(EventKind::PieceMoved, move |_| *counter.borrow_mut() += 10);
        assert_eq!(bus.subscriber_count(EventKind::PieceMoved), 2);

        bus.emit(&moved());
        assert_eq!(*count.borrow(), 11);

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.emit(&moved());
        assert_eq!(*count.borrow(), 21);
        assert_eq!(bus.subscriber_count(EventKind::PieceMoved), 1);
        assert_eq!(bus.subscriber_count(EventKind::TurnChanged), 0);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(moved()).unwrap();
        assert_eq!(json["event"], "pieceMoved");
        assert_eq!(json["from"], "0,0");
        assert_eq!(json["owner"], 3);
    }
}
