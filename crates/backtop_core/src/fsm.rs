//! Flat state machines for widget interaction states
//!
//! Widgets describe their interaction model as a table of
//! `(from, event, to)` transitions. Side effects are not attached to the
//! machine; a widget compares the state before and after [`StateMachine::send`]
//! and performs subscribe/unsubscribe work on the edges it cares about.

use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Most recent transitions kept per machine
pub const HISTORY_CAPACITY: usize = 16;

type History = SmallVec<[(StateId, EventId, StateId); HISTORY_CAPACITY]>;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    name: &'static str,
    initial_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachineBuilder {
    pub fn new(name: &'static str, initial_state: StateId) -> Self {
        Self {
            name,
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            name: self.name,
            current_state: self.initial_state,
            transitions: self.transitions,
            history: History::new(),
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    name: &'static str,
    current_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
    /// Last [`HISTORY_CAPACITY`] transitions, oldest first (for debugging)
    history: History,
}

impl StateMachine {
    pub fn builder(name: &'static str, initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(name, initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    pub fn history(&self) -> &[(StateId, EventId, StateId)] {
        &self.history
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.transitions
            .iter()
            .any(|t| t.from_state == self.current_state && t.event == event)
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: EventId) -> StateId {
        let current = self.current_state;
        let Some(transition) = self
            .transitions
            .iter()
            .find(|t| t.from_state == current && t.event == event)
        else {
            return current;
        };

        let to_state = transition.to_state;
        self.current_state = to_state;
        if self.history.len() == HISTORY_CAPACITY {
            self.history.remove(0);
        }
        self.history.push((current, event, to_state));
        tracing::trace!(fsm = self.name, from = current, event, to = to_state, "transition");

        to_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDLE: StateId = 0;
    const DRAGGING: StateId = 1;

    const DOWN: EventId = 1;
    const UP: EventId = 2;
    const MOVE: EventId = 3;

    fn drag_machine() -> StateMachine {
        StateMachine::builder("test", IDLE)
            .on(IDLE, DOWN, DRAGGING)
            .on(DRAGGING, UP, IDLE)
            .build()
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = drag_machine();
        assert_eq!(fsm.current_state(), IDLE);

        assert_eq!(fsm.send(DOWN), DRAGGING);
        assert!(fsm.is_in(DRAGGING));

        assert_eq!(fsm.send(UP), IDLE);
        assert!(fsm.is_in(IDLE));
    }

    #[test]
    fn test_unknown_event_keeps_state() {
        let mut fsm = drag_machine();
        fsm.send(UP);
        fsm.send(MOVE);
        assert_eq!(fsm.current_state(), IDLE);
        assert!(fsm.history().is_empty());
    }

    #[test]
    fn test_history() {
        let mut fsm = drag_machine();
        fsm.send(DOWN);
        fsm.send(MOVE);
        fsm.send(UP);

        assert_eq!(fsm.history(), &[(IDLE, DOWN, DRAGGING), (DRAGGING, UP, IDLE)]);
    }

    #[test]
    fn test_history_keeps_only_recent_transitions() {
        let mut fsm = drag_machine();
        for _ in 0..100 {
            fsm.send(DOWN);
            fsm.send(UP);
        }

        let history = fsm.history();
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert!(!fsm.history.spilled());
        assert_eq!(history.first(), Some(&(IDLE, DOWN, DRAGGING)));
        assert_eq!(history.last(), Some(&(DRAGGING, UP, IDLE)));
    }

    #[test]
    fn test_can_send() {
        let mut fsm = drag_machine();
        assert!(fsm.can_send(DOWN));
        assert!(!fsm.can_send(UP));
        fsm.send(DOWN);
        assert!(fsm.can_send(UP));
    }
}
