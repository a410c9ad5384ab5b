//! Deferred world mutations keyed by simulation time.
//!
//! Wave spawns and bomb detonations are queued here instead of relying on
//! host timers. The queue only moves when the world ticks, so pausing freezes
//! every pending entry and a reset drops them all at once.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    time::Duration,
};

use garden_defense_core::{AttackerKind, CellCoord, DefenderId};

/// Handle that identifies a queued entry for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct EventHandle(u64);

/// Mutation applied when a queued entry comes due.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ScheduledAction {
    /// Brings a wave attacker onto the playfield.
    SpawnAttacker {
        /// Lane the attacker enters on.
        lane: u32,
        /// Type of the attacker.
        kind: AttackerKind,
        /// Spawn-time difficulty multiplier.
        boost: f32,
    },
    /// Detonates an armed bomb.
    Detonate {
        /// Bomb that armed.
        defender: DefenderId,
        /// Cell the bomb was planted in.
        cell: CellCoord,
    },
}

#[derive(Clone, Debug)]
struct Entry {
    due: Duration,
    sequence: u64,
    action: ScheduledAction,
}

impl Entry {
    fn key(&self) -> (Duration, u64) {
        (self.due, self.sequence)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Min-queue of deferred actions ordered by due time, then insertion order.
#[derive(Clone, Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_sequence: u64,
}

impl EventQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queues an action to fire once the clock reaches `due`.
    pub(crate) fn schedule(&mut self, due: Duration, action: ScheduledAction) -> EventHandle {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.wrapping_add(1);
        self.heap.push(Reverse(Entry {
            due,
            sequence,
            action,
        }));
        EventHandle(sequence)
    }

    /// Drops the entry behind the handle if it has not fired yet.
    pub(crate) fn cancel(&mut self, handle: EventHandle) {
        self.heap.retain(|Reverse(entry)| entry.sequence != handle.0);
    }

    /// Pops the earliest entry whose due time is at or before `now`.
    pub(crate) fn pop_due(&mut self, now: Duration) -> Option<ScheduledAction> {
        let due = self.heap.peek().map(|Reverse(entry)| entry.due)?;
        if due > now {
            return None;
        }
        self.heap.pop().map(|Reverse(entry)| entry.action)
    }

    /// Cancels every pending entry.
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
