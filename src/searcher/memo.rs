//! Memo of position values shared across one game session.

use rustc_hash::FxHashMap;

use crate::board::PositionKey;
use crate::evaluate::{Score, COMPUTER_WINS, HUMAN_WINS};

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MemoEntry {
    pub value: Score,
    pub bound_type: BoundType,
}

/// How a stored value relates to the true value of its position. A search
/// cut short by the alpha-beta window only proves a bound.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BoundType {
    Exact,
    Lower,
    Upper,
}

impl BoundType {
    /// Classifies a value returned by a search run with window
    /// (`alpha`, `beta`). Bounds at the edge of the value range are exact.
    pub fn classify(value: Score, alpha: Score, beta: Score) -> Self {
        if value <= alpha && value > HUMAN_WINS {
            BoundType::Upper
        } else if value >= beta && value < COMPUTER_WINS {
            BoundType::Lower
        } else {
            BoundType::Exact
        }
    }
}

/// Values proven by search, keyed by cell contents and the side that moved
/// last. Heuristic estimates never belong here.
#[derive(Default)]
pub struct MemoTable {
    table: FxHashMap<PositionKey, MemoEntry>,
    hits: usize,
    bound_rejected: usize,
    overwrites: usize,
}

impl MemoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value. An exact entry is final: later stores for the same key
    /// are ignored and `false` is returned.
    pub fn store(&mut self, key: PositionKey, value: Score, bound_type: BoundType) -> bool {
        let entry = MemoEntry { value, bound_type };
        match self.table.get_mut(&key) {
            Some(existing) if existing.bound_type == BoundType::Exact => false,
            Some(existing) => {
                *existing = entry;
                self.overwrites += 1;
                true
            }
            None => {
                self.table.insert(key, entry);
                true
            }
        }
    }

    /// Returns a stored value that settles the position for a search with
    /// window (`alpha`, `beta`): any exact value, a lower bound already at or
    /// above `beta`, or an upper bound already at or below `alpha`.
    pub fn probe(&mut self, key: &PositionKey, alpha: Score, beta: Score) -> Option<Score> {
        let entry = self.table.get(key)?;
        match entry.bound_type {
            BoundType::Exact => {}
            BoundType::Lower if entry.value >= beta => {}
            BoundType::Upper if entry.value <= alpha => {}
            _ => {
                self.bound_rejected += 1;
                return None;
            }
        }
        self.hits += 1;
        Some(entry.value)
    }

    pub fn get(&self, key: &PositionKey) -> Option<&MemoEntry> {
        self.table.get(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.bound_rejected = 0;
        self.overwrites = 0;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn bound_rejected(&self) -> usize {
        self.bound_rejected
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }
}
