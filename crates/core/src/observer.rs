//! Synchronous push-style notification for map and agent events.
//! This module exists so loggers and recorders can watch a run without the core knowing them.
//! It does not own any formatting or persistence of events.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};
use slotmap::{SlotMap, new_key_type};

use crate::types::{CellEvent, MoveEvent};

new_key_type! {
    /// Handle returned on registration, used to unregister.
    pub struct ObserverId;
}

pub trait Observer<E> {
    fn notify(&mut self, event: &E);
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn notify(&mut self, event: &E) {
        self(event)
    }
}

/// Registered observers, notified in registration order.
pub struct ObserverSet<E> {
    slots: SlotMap<ObserverId, Box<dyn Observer<E>>>,
    order: Vec<ObserverId>,
}

impl<E> Default for ObserverSet<E> {
    fn default() -> Self {
        Self { slots: SlotMap::with_key(), order: Vec::new() }
    }
}

impl<E> ObserverSet<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, observer: impl Observer<E> + 'static) -> ObserverId {
        let id = self.slots.insert(Box::new(observer));
        self.order.push(id);
        id
    }

    pub fn remove(&mut self, id: ObserverId) -> bool {
        if self.slots.remove(id).is_none() {
            return false;
        }
        self.order.retain(|registered| *registered != id);
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn notify(&mut self, event: &E) {
        for id in &self.order {
            if let Some(observer) = self.slots.get_mut(*id) {
                observer.notify(event);
            }
        }
    }
}

/// Shared in-memory recorder. Clones share one buffer, so a test or driver keeps a handle
/// while a clone is registered on the map or agent.
#[derive(Debug)]
pub struct EventLog<E> {
    events: Rc<RefCell<Vec<E>>>,
}

impl<E> Clone for EventLog<E> {
    fn clone(&self) -> Self {
        Self { events: Rc::clone(&self.events) }
    }
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self { events: Rc::new(RefCell::new(Vec::new())) }
    }
}

impl<E: Clone> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<E> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl<E: Clone> Observer<E> for EventLog<E> {
    fn notify(&mut self, event: &E) {
        self.events.borrow_mut().push(event.clone());
    }
}

/// Forwards events to the `log` facade: agent moves under `coverage::path`,
/// cell updates under `coverage::map`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceObserver;

impl Observer<MoveEvent> for TraceObserver {
    fn notify(&mut self, event: &MoveEvent) {
        debug!(target: "coverage::path", "step {}: {} -> {}", event.step, event.from, event.to);
    }
}

impl Observer<CellEvent> for TraceObserver {
    fn notify(&mut self, event: &CellEvent) {
        trace!(
            target: "coverage::map",
            "cell {} visited {} -> {}",
            event.pos,
            event.was_visited,
            event.now_visited
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observers_are_notified_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut set = ObserverSet::<u32>::new();
        for label in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            set.add(move |event: &u32| calls.borrow_mut().push((label, *event)));
        }

        set.notify(&7);
        assert_eq!(*calls.borrow(), vec![("first", 7), ("second", 7), ("third", 7)]);
    }

    #[test]
    fn removed_observer_stops_receiving_and_order_is_kept() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut set = ObserverSet::<u32>::new();
        let mut ids = Vec::new();
        for label in ["a", "b", "c"] {
            let calls = Rc::clone(&calls);
            ids.push(set.add(move |_: &u32| calls.borrow_mut().push(label)));
        }

        assert!(set.remove(ids[1]));
        assert!(!set.remove(ids[1]), "second removal is a no-op");
        let late = Rc::clone(&calls);
        set.add(move |_: &u32| late.borrow_mut().push("d"));

        set.notify(&0);
        assert_eq!(*calls.borrow(), vec!["a", "c", "d"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn event_log_clones_share_one_buffer() {
        let log = EventLog::<u8>::new();
        let mut registered = log.clone();
        registered.notify(&1);
        registered.notify(&2);
        assert_eq!(log.events(), vec![1, 2]);

        log.clear();
        assert!(registered.is_empty());
    }
}
