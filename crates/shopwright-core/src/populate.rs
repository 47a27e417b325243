//! Deferred stocking of display fixtures.
//!
//! Placements queue their targets here as they succeed -- immediately for
//! ready spawns, via a one-shot ticket continuation for networked ones --
//! and the whole queue is consumed in a single pass when the host raises
//! the world-readiness signal. Filling earlier is invalid: the item
//! registry service the fill depends on does not exist until that signal.
//!
//! The pending list is interior-shared so a ticket continuation can append
//! while the session is mid-placement. The drain is the sole consumer;
//! after the first drain the queue is sealed and anything arriving later
//! is dropped for good (counted, never retried).

use crate::id::{ItemKindId, ObjectId};
use crate::spawn::SpawnOutcome;
use crate::world::WorldStore;
use std::cell::RefCell;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Queue entries and report
// ---------------------------------------------------------------------------

/// One queued unit of stocking work. The target handle is non-owning; the
/// world store decides at drain time whether it still resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFill {
    pub target: ObjectId,
    pub item: ItemKindId,
    pub quantity: u32,
}

/// Why a queued fill produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillFailure {
    /// The target was despawned before the drain ran.
    StaleTarget,
    /// The target resolves but has no stock capability.
    NotStockable,
    /// The target's stock accepted zero units.
    Full,
}

impl std::fmt::Display for FillFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillFailure::StaleTarget => write!(f, "target no longer exists"),
            FillFailure::NotStockable => write!(f, "target cannot hold stock"),
            FillFailure::Full => write!(f, "target accepted zero units"),
        }
    }
}

/// Outcome of one drained entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRecord {
    pub target: ObjectId,
    pub item: ItemKindId,
    pub requested: u32,
    /// Units actually placed on success.
    pub outcome: Result<u32, FillFailure>,
}

/// Summary returned by the drain. One record per consumed entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulationReport {
    pub records: Vec<FillRecord>,
}

impl PopulationReport {
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_err()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total units placed across all successful records.
    pub fn units_placed(&self) -> u32 {
        self.records
            .iter()
            .filter_map(|r| r.outcome.as_ref().ok())
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Populator
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct QueueState {
    pending: Vec<PendingFill>,
    /// Set by the first drain; entries arriving afterwards are dropped.
    sealed: bool,
    /// Completions lost to the seal, for host observability.
    lost_after_drain: u64,
}

/// The deferred population pipeline for one session.
#[derive(Debug, Default)]
pub struct Populator {
    queue: Rc<RefCell<QueueState>>,
}

impl Populator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fill for a placement outcome.
    ///
    /// Ready outcomes append immediately. Deferred outcomes arm the ticket
    /// with a continuation that appends when the handle arrives; if it
    /// never arrives, nothing is ever queued.
    pub fn enqueue(&self, outcome: SpawnOutcome, item: ItemKindId, quantity: u32) {
        match outcome {
            SpawnOutcome::Ready(target) => Self::push(&self.queue, target, item, quantity),
            SpawnOutcome::Deferred(ticket) => {
                let queue = Rc::clone(&self.queue);
                ticket.on_complete(move |target| Self::push(&queue, target, item, quantity));
            }
        }
    }

    fn push(queue: &Rc<RefCell<QueueState>>, target: ObjectId, item: ItemKindId, quantity: u32) {
        let mut state = queue.borrow_mut();
        if state.sealed {
            state.lost_after_drain += 1;
            log::warn!(
                "stock fill for {target:?} arrived after the population drain; dropped \
                 ({} lost so far)",
                state.lost_after_drain
            );
            return;
        }
        if state.pending.iter().any(|p| p.target == target) {
            log::debug!("duplicate fill entry for {target:?} ignored");
            return;
        }
        state.pending.push(PendingFill {
            target,
            item,
            quantity,
        });
    }

    /// Entries currently waiting for the drain.
    pub fn pending_count(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Whether the first drain has already run.
    pub fn is_sealed(&self) -> bool {
        self.queue.borrow().sealed
    }

    /// Completions that arrived after the drain and were dropped.
    pub fn lost_after_drain(&self) -> u64 {
        self.queue.borrow().lost_after_drain
    }

    /// Consume the queue in one pass, filling each target that still
    /// resolves. Seals the queue: a second call is a no-op returning an
    /// empty report, and later completions are dropped.
    pub fn drain(&mut self, world: &mut WorldStore) -> PopulationReport {
        let entries = {
            let mut state = self.queue.borrow_mut();
            if state.sealed && state.pending.is_empty() {
                return PopulationReport::default();
            }
            state.sealed = true;
            std::mem::take(&mut state.pending)
        };

        let mut records = Vec::with_capacity(entries.len());
        for entry in entries {
            let outcome = match world.resolve_mut(entry.target) {
                None => Err(FillFailure::StaleTarget),
                Some(object) => match object.stock.as_mut() {
                    None => Err(FillFailure::NotStockable),
                    Some(stock) => {
                        let overflow = stock.add(entry.item, entry.quantity);
                        let added = entry.quantity - overflow;
                        if added > 0 {
                            Ok(added)
                        } else {
                            Err(FillFailure::Full)
                        }
                    }
                },
            };

            match &outcome {
                Ok(added) => log::debug!(
                    "filled {:?} with {added}/{} of {:?}",
                    entry.target,
                    entry.quantity,
                    entry.item
                ),
                Err(failure) => log::warn!("fill of {:?} failed: {failure}", entry.target),
            }

            records.push(FillRecord {
                target: entry.target,
                item: entry.item,
                requested: entry.quantity,
                outcome,
            });
        }

        let report = PopulationReport { records };
        log::info!(
            "population drain complete: {} filled, {} failed",
            report.success_count(),
            report.failure_count()
        );
        report
    }
}

// ===========================================================================
// Tests
// ===========================================================================
