//! Game rules per board topology.
//!
//! The searcher only needs three things from a game: which cells may be
//! played next, whether a move ended the game, and (for depth-limited search)
//! an estimate of a position it will not expand. `GameRules` captures exactly
//! those, and `Topology` picks one implementation at session start.

mod gravity;
mod grid;

pub use gravity::{GravityRules, COLUMNS as GRAVITY_COLUMNS};
pub use grid::GridRules;

use smallvec::SmallVec;

use crate::board::{Cell, Side};
use crate::evaluate::{GameEnding, Score};
use crate::game::config::{ConfigError, GameConfig};
use crate::searcher::MoveOrder;

pub type MoveList = SmallVec<[usize; 16]>;

pub trait GameRules {
    /// Number of cells on the board.
    fn capacity(&self) -> usize;

    /// Decides whether `mover` playing `index` (already placed in `cells`)
    /// won the game or filled the board.
    fn detect_ending(&self, cells: &[Cell], index: usize, mover: Side) -> Option<GameEnding>;

    /// Cells that may be played next, arranged by `order`.
    fn legal_moves(&self, cells: &[Cell], order: &mut MoveOrder) -> MoveList;

    /// Estimated value of a non-terminal position from `perspective`'s side.
    /// Games small enough to search exhaustively return `None`.
    fn heuristic(&self, _cells: &[Cell], _perspective: Side) -> Option<Score> {
        None
    }

    /// Maps the number a human typed to a playable cell.
    fn index_for_choice(&self, cells: &[Cell], choice: usize) -> Option<usize>;

    fn empty_board(&self) -> Vec<Cell> {
        vec![Cell::Empty; self.capacity()]
    }

    /// The side holding a completed line anywhere on `cells`, if any.
    fn winner(&self, cells: &[Cell]) -> Option<Side> {
        cells.iter().enumerate().find_map(|(index, cell)| {
            let side = cell.side()?;
            match self.detect_ending(cells, index, side) {
                Some(GameEnding::Win) => Some(side),
                _ => None,
            }
        })
    }
}

#[derive(Clone, Debug)]
pub enum Topology {
    Grid(GridRules),
    Gravity(GravityRules),
}

impl Topology {
    pub fn from_config(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        match *config {
            GameConfig::TicTacToe { board_size } => Ok(Topology::Grid(GridRules::new(board_size)?)),
            GameConfig::ConnectFour { .. } => Ok(Topology::Gravity(GravityRules)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Topology::Grid(_) => "tic-tac-toe",
            Topology::Gravity(_) => "connect four",
        }
    }
}

impl GameRules for Topology {
    fn capacity(&self) -> usize {
        match self {
            Topology::Grid(rules) => rules.capacity(),
            Topology::Gravity(rules) => rules.capacity(),
        }
    }

    fn detect_ending(&self, cells: &[Cell], index: usize, mover: Side) -> Option<GameEnding> {
        match self {
            Topology::Grid(rules) => rules.detect_ending(cells, index, mover),
            Topology::Gravity(rules) => rules.detect_ending(cells, index, mover),
        }
    }

    fn legal_moves(&self, cells: &[Cell], order: &mut MoveOrder) -> MoveList {
        match self {
            Topology::Grid(rules) => rules.legal_moves(cells, order),
            Topology::Gravity(rules) => rules.legal_moves(cells, order),
        }
    }

    fn heuristic(&self, cells: &[Cell], perspective: Side) -> Option<Score> {
        match self {
            Topology::Grid(rules) => rules.heuristic(cells, perspective),
            Topology::Gravity(rules) => rules.heuristic(cells, perspective),
        }
    }

    fn index_for_choice(&self, cells: &[Cell], choice: usize) -> Option<usize> {
        match self {
            Topology::Grid(rules) => rules.index_for_choice(cells, choice),
            Topology::Gravity(rules) => rules.index_for_choice(cells, choice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config() {
        let grid = Topology::from_config(&GameConfig::TicTacToe { board_size: 4 }).unwrap();
        assert_eq!(grid.capacity(), 16);
        assert_eq!(grid.name(), "tic-tac-toe");

        let gravity = Topology::from_config(&GameConfig::ConnectFour { max_depth: 3 }).unwrap();
        assert_eq!(gravity.capacity(), 42);
        assert_eq!(gravity.name(), "connect four");
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        assert!(Topology::from_config(&GameConfig::TicTacToe { board_size: 0 }).is_err());
        assert!(Topology::from_config(&GameConfig::ConnectFour { max_depth: 0 }).is_err());
    }

    #[test]
    fn test_winner_scans_whole_board() {
        let rules = Topology::Grid(GridRules::new(3).unwrap());
        let mut cells = rules.empty_board();
        assert_eq!(rules.winner(&cells), None);

        for &index in &[2, 4, 6] {
            cells[index] = Cell::Computer;
        }
        assert_eq!(rules.winner(&cells), Some(Side::Computer));
    }
}
