//! Deferred removal of felled trees.
//!
//! Each removal is a one-shot task tagged with the epoch of the world that
//! scheduled it. The queue is owned by the host and can outlive the world;
//! when a task fires, the caller compares its epoch with the live world's
//! and drops stale tasks.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use timberfall_core::{EntityId, GameTime};

/// Identity of one world instance. A new epoch is issued per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WorldEpoch(pub u64);

impl WorldEpoch {
    /// Epoch following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A scheduled removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PendingRemoval {
    /// When the removal fires.
    pub due: GameTime,
    /// Order of scheduling, breaks ties between equal deadlines.
    seq: u64,
    /// Tree to remove.
    pub entity: EntityId,
    /// World that scheduled the removal.
    pub epoch: WorldEpoch,
}

/// Min-heap of pending removals ordered by deadline.
#[derive(Debug, Default)]
pub struct RemovalQueue {
    heap: BinaryHeap<Reverse<PendingRemoval>>,
    next_seq: u64,
}

impl RemovalQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `entity` for removal at `due`.
    pub fn schedule(&mut self, entity: EntityId, epoch: WorldEpoch, due: GameTime) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(PendingRemoval {
            due,
            seq,
            entity,
            epoch,
        }));
    }

    /// Pop every task whose deadline is at or before `now`, earliest first.
    pub fn pop_due(&mut self, now: GameTime) -> Vec<PendingRemoval> {
        let mut due = Vec::new();
        while let Some(Reverse(next)) = self.heap.peek() {
            if next.due > now {
                break;
            }
            if let Some(Reverse(task)) = self.heap.pop() {
                due.push(task);
            }
        }
        due
    }

    /// Deadline of the earliest pending task.
    pub fn next_due(&self) -> Option<GameTime> {
        self.heap.peek().map(|Reverse(task)| task.due)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
