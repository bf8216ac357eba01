use std::fmt;

use super::cell::Cell;
use super::error::BoardError;
use super::side::Side;
use crate::evaluate::GameEnding;
use crate::rules::GameRules;

/// Largest board that still packs into a `PositionKey` (two bits per cell).
pub const MAX_CELLS: usize = 64;

/// Canonical memo key: the packed cell contents plus the side that made the
/// last move. Transpositions reached through different move orders share a key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PositionKey {
    packed: u128,
    mover: Side,
}

impl PositionKey {
    pub fn new(cells: &[Cell], mover: Side) -> Self {
        debug_assert!(cells.len() <= MAX_CELLS, "board too large for a packed key");
        let packed = cells
            .iter()
            .enumerate()
            .fold(0u128, |acc, (index, cell)| acc | (cell.code() << (2 * index)));
        Self { packed, mover }
    }

    pub fn mover(&self) -> Side {
        self.mover
    }
}

/// A single board configuration, reached by `mover` playing `last_move`.
///
/// The win/tie state is computed once at construction from the cells and the
/// move that produced them. A root position (no last move) is never terminal.
#[derive(Clone, PartialEq, Debug)]
pub struct Position {
    mover: Side,
    cells: Vec<Cell>,
    last_move: Option<usize>,
    ending: Option<GameEnding>,
}

impl Position {
    /// Starting point for a search: `mover` is the side that moved last, so
    /// `mover.opposite()` is the side to play.
    pub fn root(mover: Side, cells: Vec<Cell>) -> Self {
        Self {
            mover,
            cells,
            last_move: None,
            ending: None,
        }
    }

    /// Builds the position reached when `mover` plays `index` on `parent`.
    pub fn new<R: GameRules + ?Sized>(
        mover: Side,
        parent: &[Cell],
        index: usize,
        rules: &R,
    ) -> Result<Self, BoardError> {
        let capacity = rules.capacity();
        if parent.len() != capacity {
            return Err(BoardError::CellCountError {
                expected: capacity,
                found: parent.len(),
            });
        }
        if index >= capacity {
            return Err(BoardError::IndexOutOfRangeError { index, capacity });
        }
        if !parent[index].is_empty() {
            return Err(BoardError::CellOccupiedError { index });
        }

        let mut cells = parent.to_vec();
        cells[index] = Cell::from(mover);
        let ending = rules.detect_ending(&cells, index, mover);

        Ok(Self {
            mover,
            cells,
            last_move: Some(index),
            ending,
        })
    }

    /// Plays `index` for the side whose turn it is.
    pub fn play<R: GameRules + ?Sized>(&self, index: usize, rules: &R) -> Result<Self, BoardError> {
        Self::new(self.next_to_move(), &self.cells, index, rules)
    }

    /// Parses a board written as one character per cell (`.`, `X`, `O`),
    /// ignoring whitespace. The result is a root position.
    pub fn parse<R: GameRules + ?Sized>(
        mover: Side,
        board: &str,
        rules: &R,
    ) -> Result<Self, BoardError> {
        let cells = board
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Cell::from_char(c).ok_or(BoardError::InvalidCellCharError(c)))
            .collect::<Result<Vec<_>, _>>()?;

        if cells.len() != rules.capacity() {
            return Err(BoardError::CellCountError {
                expected: rules.capacity(),
                found: cells.len(),
            });
        }

        Ok(Self::root(mover, cells))
    }

    pub fn mover(&self) -> Side {
        self.mover
    }

    pub fn next_to_move(&self) -> Side {
        self.mover.opposite()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn ending(&self) -> Option<GameEnding> {
        self.ending
    }

    pub fn is_win(&self) -> bool {
        self.ending == Some(GameEnding::Win)
    }

    pub fn is_tie(&self) -> bool {
        self.ending == Some(GameEnding::Tie)
    }

    pub fn is_terminal(&self) -> bool {
        self.ending.is_some()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn key(&self) -> PositionKey {
        PositionKey::new(&self.cells, self.mover)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board: String = self.cells.iter().map(Cell::to_char).collect();
        match self.last_move {
            Some(index) => write!(f, "{} ({} played {})", board, self.mover, index),
            None => write!(f, "{} ({} to move)", board, self.next_to_move()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{GravityRules, GridRules};

    fn tic_tac_toe() -> GridRules {
        GridRules::new(3).unwrap()
    }

    #[test]
    fn test_new_sets_cell_and_mover() {
        let rules = tic_tac_toe();
        let root = Position::root(Side::Computer, rules.empty_board());
        let position = root.play(4, &rules).unwrap();

        assert_eq!(position.mover(), Side::Human);
        assert_eq!(position.last_move(), Some(4));
        assert_eq!(position.cells()[4], Cell::Human);
        assert_eq!(position.occupied_count(), root.occupied_count() + 1);
        assert!(!position.is_terminal());
    }

    #[test]
    fn test_root_is_never_terminal() {
        let rules = tic_tac_toe();
        let position = Position::parse(Side::Human, "XXX OO. ...", &rules).unwrap();
        assert!(!position.is_terminal());
        assert_eq!(position.last_move(), None);
    }

    #[test]
    fn test_rejects_occupied_cell() {
        let rules = tic_tac_toe();
        let position = Position::parse(Side::Human, "X.. ... ...", &rules).unwrap();
        assert_eq!(
            position.play(0, &rules),
            Err(BoardError::CellOccupiedError { index: 0 })
        );
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let rules = tic_tac_toe();
        let position = Position::root(Side::Human, rules.empty_board());
        assert_eq!(
            position.play(9, &rules),
            Err(BoardError::IndexOutOfRangeError {
                index: 9,
                capacity: 9
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        let rules = tic_tac_toe();
        assert_eq!(
            Position::parse(Side::Human, "X..", &rules),
            Err(BoardError::CellCountError {
                expected: 9,
                found: 3
            })
        );
        assert_eq!(
            Position::parse(Side::Human, "X.. .?. ...", &rules),
            Err(BoardError::InvalidCellCharError('?'))
        );
    }

    #[test]
    fn test_terminal_flags_are_consistent() {
        let rules = tic_tac_toe();
        let position = Position::parse(Side::Computer, "XX. OO. ...", &rules).unwrap();
        let won = position.play(2, &rules).unwrap();

        assert!(won.is_win());
        assert!(!won.is_tie());
        assert!(won.is_terminal());
        assert_eq!(won.ending(), Some(GameEnding::Win));
    }

    #[test]
    fn test_transpositions_share_a_key() {
        let rules = tic_tac_toe();
        let root = Position::root(Side::Computer, rules.empty_board());

        let a = root
            .play(0, &rules)
            .and_then(|p| p.play(4, &rules))
            .and_then(|p| p.play(8, &rules))
            .unwrap();
        let b = root
            .play(8, &rules)
            .and_then(|p| p.play(4, &rules))
            .and_then(|p| p.play(0, &rules))
            .unwrap();

        assert_ne!(a.last_move(), b.last_move());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_key_distinguishes_mover() {
        let rules = tic_tac_toe();
        let cells = Position::parse(Side::Human, "X.. .O. ...", &rules)
            .unwrap()
            .into_cells();
        assert_ne!(
            PositionKey::new(&cells, Side::Human),
            PositionKey::new(&cells, Side::Computer)
        );
    }

    #[test]
    fn test_gravity_board_fits_key() {
        let rules = GravityRules;
        let mut cells = rules.empty_board();
        cells[41] = Cell::Computer;
        let full = PositionKey::new(&cells, Side::Computer);
        cells[41] = Cell::Human;
        assert_ne!(full, PositionKey::new(&cells, Side::Computer));
    }
}
