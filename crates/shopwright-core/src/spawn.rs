//! Spawn outcomes and one-shot completion tickets.
//!
//! Placing a sub-object through the structure builder either yields a
//! usable handle immediately or, for networked placements, a
//! [`SpawnTicket`] whose handle arrives later through the host-held
//! [`TicketResolver`]. The pair is a single-use continuation: the consumer
//! arms at most one closure, the host fires it at most once, and both
//! sides enforce that by value.

use crate::id::ObjectId;
use std::cell::RefCell;
use std::rc::Rc;

/// Result of requesting a sub-object from the structure builder.
pub enum SpawnOutcome {
    /// The object exists and is usable immediately.
    Ready(ObjectId),
    /// Creation is asynchronous; the handle arrives through the ticket.
    Deferred(SpawnTicket),
}

impl SpawnOutcome {
    /// Whether the outcome carries a usable handle right now.
    pub fn is_ready(&self) -> bool {
        matches!(self, SpawnOutcome::Ready(_))
    }
}

impl std::fmt::Debug for SpawnOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpawnOutcome::Ready(id) => f.debug_tuple("Ready").field(id).finish(),
            SpawnOutcome::Deferred(_) => write!(f, "Deferred(<ticket>)"),
        }
    }
}

enum TicketState {
    /// Neither side has acted.
    Waiting,
    /// Consumer armed a continuation; resolver has not fired.
    Armed(Box<dyn FnOnce(ObjectId)>),
    /// Resolver fired before a continuation was armed.
    Completed(ObjectId),
    /// The continuation has run (or can no longer run).
    Spent,
}

/// Consumer side of a deferred spawn. Arms a single continuation.
pub struct SpawnTicket {
    state: Rc<RefCell<TicketState>>,
}

/// Host side of a deferred spawn. Fires the continuation at most once;
/// dropping it without firing models a spawn that never completes.
pub struct TicketResolver {
    state: Rc<RefCell<TicketState>>,
}

impl SpawnTicket {
    /// Create a linked ticket/resolver pair.
    pub fn new() -> (SpawnTicket, TicketResolver) {
        let state = Rc::new(RefCell::new(TicketState::Waiting));
        (
            SpawnTicket {
                state: Rc::clone(&state),
            },
            TicketResolver { state },
        )
    }

    /// Arm the completion continuation. If the resolver already fired, the
    /// continuation runs immediately; otherwise it runs when (if ever) the
    /// resolver fires. Consuming `self` makes double-arming unrepresentable.
    pub fn on_complete(self, f: impl FnOnce(ObjectId) + 'static) {
        let previous = {
            let mut state = self.state.borrow_mut();
            std::mem::replace(&mut *state, TicketState::Spent)
        };
        match previous {
            TicketState::Waiting => {
                *self.state.borrow_mut() = TicketState::Armed(Box::new(f));
            }
            // Borrow released above: the continuation may re-enter shared
            // structures (e.g. the population queue).
            TicketState::Completed(id) => f(id),
            TicketState::Armed(_) | TicketState::Spent => {}
        }
    }
}

impl TicketResolver {
    /// Deliver the finished handle. Runs the armed continuation, if any.
    /// Consuming `self` makes a second completion unrepresentable.
    pub fn complete(self, id: ObjectId) {
        let previous = {
            let mut state = self.state.borrow_mut();
            std::mem::replace(&mut *state, TicketState::Spent)
        };
        match previous {
            TicketState::Waiting => {
                *self.state.borrow_mut() = TicketState::Completed(id);
            }
            TicketState::Armed(f) => f(id),
            TicketState::Completed(_) | TicketState::Spent => {}
        }
    }
}
