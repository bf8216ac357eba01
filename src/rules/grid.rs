use crate::board::{Cell, Side, MAX_CELLS};
use crate::evaluate::GameEnding;
use crate::game::config::ConfigError;
use crate::searcher::MoveOrder;

use super::{GameRules, MoveList};

/// N×N tic-tac-toe: a full row, column or main diagonal of N wins, and any
/// empty cell may be played.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GridRules {
    size: usize,
}

impl GridRules {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        if size == 0 || size * size > MAX_CELLS {
            return Err(ConfigError::BoardSizeError { size });
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn line_is_complete<I>(cells: &[Cell], mut line: I, mover: Side) -> bool
    where
        I: Iterator<Item = usize>,
    {
        line.all(|index| cells[index].is_side(mover))
    }
}

impl GameRules for GridRules {
    fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// Only the lines through `index` can have been completed by this move.
    fn detect_ending(&self, cells: &[Cell], index: usize, mover: Side) -> Option<GameEnding> {
        let size = self.size;
        let (row, column) = (index / size, index % size);

        let won = Self::line_is_complete(cells, (0..size).map(|c| row * size + c), mover)
            || Self::line_is_complete(cells, (0..size).map(|r| r * size + column), mover)
            || (row == column
                && Self::line_is_complete(cells, (0..size).map(|i| i * size + i), mover))
            || (row + column == size - 1
                && Self::line_is_complete(
                    cells,
                    (0..size).map(|i| i * size + (size - 1 - i)),
                    mover,
                ));

        if won {
            Some(GameEnding::Win)
        } else if cells.iter().all(|cell| !cell.is_empty()) {
            Some(GameEnding::Tie)
        } else {
            None
        }
    }

    fn legal_moves(&self, cells: &[Cell], order: &mut MoveOrder) -> MoveList {
        let mut moves: MoveList = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
            .collect();
        order.arrange(&mut moves);
        moves
    }

    fn index_for_choice(&self, cells: &[Cell], choice: usize) -> Option<usize> {
        match cells.get(choice) {
            Some(cell) if cell.is_empty() => Some(choice),
            _ => None,
        }
    }
}
