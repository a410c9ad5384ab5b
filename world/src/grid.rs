//! Authoritative defender grid and identifier allocation.

use std::time::Duration;

use garden_defense_core::{CellCoord, DefenderId, DefenderKind, DefenderSnapshot};

use crate::schedule::EventHandle;

/// Mutable state of a planted defender.
#[derive(Clone, Debug)]
pub(crate) struct DefenderState {
    /// Identifier allocated by the world for the defender.
    pub(crate) id: DefenderId,
    /// Type of the defender.
    pub(crate) kind: DefenderKind,
    /// Remaining health.
    pub(crate) health: f32,
    /// Time accumulated toward the next volley.
    pub(crate) fire_cooldown: Duration,
    /// Time accumulated toward the next resource payout.
    pub(crate) payout_cooldown: Duration,
    /// Pending detonation for bomb-class defenders.
    pub(crate) arm_event: Option<EventHandle>,
}

/// Dense rows × columns matrix holding at most one defender per cell.
#[derive(Clone, Debug)]
pub(crate) struct DefenderGrid {
    columns: u32,
    rows: u32,
    cells: Vec<Option<DefenderState>>,
    next_defender_id: DefenderId,
}

impl DefenderGrid {
    /// Creates an empty grid with a reset identifier counter.
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![None; capacity],
            next_defender_id: DefenderId::new(0),
        }
    }

    pub(crate) fn contains(&self, cell: CellCoord) -> bool {
        self.index(cell).is_some()
    }

    pub(crate) fn is_empty_at(&self, cell: CellCoord) -> bool {
        self.get(cell).is_none()
    }

    pub(crate) fn get(&self, cell: CellCoord) -> Option<&DefenderState> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    pub(crate) fn get_mut(&mut self, cell: CellCoord) -> Option<&mut DefenderState> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::as_mut)
    }

    /// Plants a fresh defender with zeroed accumulators.
    ///
    /// Callers must check bounds and occupancy first; an occupied or
    /// out-of-bounds cell yields `None` and leaves the grid untouched.
    pub(crate) fn insert(&mut self, kind: DefenderKind, cell: CellCoord) -> Option<DefenderId> {
        let index = self.index(cell)?;
        let slot = self.cells.get_mut(index)?;
        if slot.is_some() {
            return None;
        }

        let id = self.next_defender_id;
        self.next_defender_id = DefenderId::new(id.get().wrapping_add(1));
        *slot = Some(DefenderState {
            id,
            kind,
            health: kind.stats().max_health,
            fire_cooldown: Duration::ZERO,
            payout_cooldown: Duration::ZERO,
            arm_event: None,
        });
        Some(id)
    }

    /// Clears the cell, returning its previous occupant.
    pub(crate) fn take(&mut self, cell: CellCoord) -> Option<DefenderState> {
        let index = self.index(cell)?;
        self.cells.get_mut(index).and_then(Option::take)
    }

    /// Iterates occupied cells in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellCoord, &DefenderState)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, slot)| {
                slot.as_ref().map(|defender| (cell_at(index, columns), defender))
            })
    }

    /// Iterates occupied cells in row-major order with mutable access.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (CellCoord, &mut DefenderState)> + '_ {
        let columns = self.columns;
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(move |(index, slot)| {
                slot.as_mut().map(|defender| (cell_at(index, columns), defender))
            })
    }

    pub(crate) fn snapshots(&self) -> Vec<DefenderSnapshot> {
        self.iter()
            .map(|(cell, defender)| DefenderSnapshot {
                id: defender.id,
                kind: defender.kind,
                cell,
                health: defender.health,
            })
            .collect()
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

fn cell_at(index: usize, columns: u32) -> CellCoord {
    let width = columns.max(1) as usize;
    CellCoord::new((index % width) as u32, (index / width) as u32)
}
