//! Scene-wide "a furniture drag is in progress" signal.
//!
//! Per-object controllers raise drag-started / drag-ended; observers (the
//! camera controls) are notified synchronously on every change. The signal
//! tracks which objects are drag-active, so a stray drag-ended for an object
//! that never started is harmless.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

use shared::ObjectId;

/// Receiver of drag-active transitions
pub trait DragObserver {
    /// Called after every drag signal with the scene-wide drag-active state
    fn drag_state_changed(&mut self, any_active: bool);
}

/// Shared handle injected into controllers and observers
pub type SharedDragSignal = Rc<RefCell<DragSignal>>;

#[derive(Default)]
pub struct DragSignal {
    active: BTreeSet<ObjectId>,
    observers: Vec<Weak<RefCell<dyn DragObserver>>>,
}

impl DragSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedDragSignal {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Register an observer. It is told the current state right away.
    pub fn subscribe(&mut self, observer: &Rc<RefCell<dyn DragObserver>>) {
        observer.borrow_mut().drag_state_changed(self.any_active());
        self.observers.push(Rc::downgrade(observer));
    }

    pub fn any_active(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(id)
    }

    pub fn active_ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.active.iter()
    }

    pub fn drag_started(&mut self, id: &str) {
        self.active.insert(id.to_string());
        tracing::debug!("Drag started: {id}");
        self.notify();
    }

    pub fn drag_ended(&mut self, id: &str) {
        self.active.remove(id);
        tracing::debug!("Drag ended: {id}");
        self.notify();
    }

    /// Document-level pointer-up fallback: clears every drag-active mark.
    /// Returns the ids that were still marked.
    pub fn release_all(&mut self) -> Vec<ObjectId> {
        let stuck: Vec<ObjectId> = std::mem::take(&mut self.active).into_iter().collect();
        if !stuck.is_empty() {
            tracing::warn!("Recovered {} drag(s) without pointer-up: {:?}", stuck.len(), stuck);
        }
        self.notify();
        stuck
    }

    fn notify(&mut self) {
        let any_active = self.any_active();
        self.observers.retain(|weak| match weak.upgrade() {
            Some(observer) => {
                observer.borrow_mut().drag_state_changed(any_active);
                true
            }
            None => false,
        });
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<bool>,
    }

    impl DragObserver for Recorder {
        fn drag_state_changed(&mut self, any_active: bool) {
            self.seen.push(any_active);
        }
    }

    #[test]
    fn test_observer_sees_every_transition() {
        let rec = Rc::new(RefCell::new(Recorder::default()));
        let as_observer: Rc<RefCell<dyn DragObserver>> = rec.clone();
        let mut signal = DragSignal::new();
        signal.subscribe(&as_observer);

        signal.drag_started("a");
        signal.drag_started("b");
        signal.drag_ended("a");
        signal.drag_ended("b");

        assert_eq!(rec.borrow().seen, vec![false, true, true, true, false]);
    }

    #[test]
    fn test_release_all_recovers_missing_end() {
        let mut signal = DragSignal::new();
        signal.drag_started("a");
        assert!(signal.any_active());
        assert_eq!(signal.release_all(), vec!["a".to_string()]);
        assert!(!signal.any_active());
        assert!(signal.release_all().is_empty());
    }

    #[test]
    fn test_dropped_observers_are_pruned() {
        let mut signal = DragSignal::new();
        {
            let rec: Rc<RefCell<dyn DragObserver>> = Rc::new(RefCell::new(Recorder::default()));
            signal.subscribe(&rec);
        }
        signal.drag_started("a");
        assert_eq!(signal.observer_count(), 0);
    }

    #[test]
    fn test_unmatched_end_is_harmless() {
        let mut signal = DragSignal::new();
        signal.drag_ended("ghost");
        assert!(!signal.any_active());
        assert!(!signal.is_active("ghost"));
    }
}
