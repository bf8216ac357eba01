use crate::board::{Cell, Side};
use crate::evaluate::{self, GameEnding, Lines, Score};
use crate::searcher::MoveOrder;

use super::{GameRules, MoveList};

pub const ROWS: usize = 6;
pub const COLUMNS: usize = 7;
pub const CONNECT: usize = 4;

const LINES: Lines = Lines {
    rows: ROWS,
    columns: COLUMNS,
    connect: CONNECT,
};

/// Axes scanned from the played cell; each is walked in both directions.
const AXES: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Connect four on a 6×7 board. Pieces drop to the lowest open cell of a
/// column; row 0 is the top of the board.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct GravityRules;

impl GravityRules {
    /// Lowest empty cell in `column`, or `None` when the column is full.
    pub fn drop_index(cells: &[Cell], column: usize) -> Option<usize> {
        if column >= COLUMNS || !cells[column].is_empty() {
            return None;
        }
        let mut index = column;
        while index + COLUMNS < cells.len() && cells[index + COLUMNS].is_empty() {
            index += COLUMNS;
        }
        Some(index)
    }

    /// Length of the run of `mover` pieces starting next to (`row`, `column`)
    /// and heading along (`row_step`, `column_step`). Leaving the board ends
    /// the run; so does wrapping into a neighbouring row.
    fn run_length(
        cells: &[Cell],
        row: isize,
        column: isize,
        row_step: isize,
        column_step: isize,
        mover: Side,
    ) -> usize {
        let mut length = 0;
        let (mut r, mut c) = (row + row_step, column + column_step);
        while r >= 0
            && r < ROWS as isize
            && c >= 0
            && c < COLUMNS as isize
            && cells[r as usize * COLUMNS + c as usize].is_side(mover)
        {
            length += 1;
            r += row_step;
            c += column_step;
        }
        length
    }
}

impl GameRules for GravityRules {
    fn capacity(&self) -> usize {
        ROWS * COLUMNS
    }

    fn detect_ending(&self, cells: &[Cell], index: usize, mover: Side) -> Option<GameEnding> {
        let (row, column) = ((index / COLUMNS) as isize, (index % COLUMNS) as isize);

        let won = AXES.iter().any(|&(row_step, column_step)| {
            1 + Self::run_length(cells, row, column, row_step, column_step, mover)
                + Self::run_length(cells, row, column, -row_step, -column_step, mover)
                >= CONNECT
        });

        if won {
            Some(GameEnding::Win)
        } else if cells[..COLUMNS].iter().all(|cell| !cell.is_empty()) {
            // Pieces stack from the bottom, so a full top row is a full board.
            Some(GameEnding::Tie)
        } else {
            None
        }
    }

    fn legal_moves(&self, cells: &[Cell], order: &mut MoveOrder) -> MoveList {
        let mut columns: MoveList = (0..COLUMNS).collect();
        order.arrange(&mut columns);
        columns
            .into_iter()
            .filter_map(|column| Self::drop_index(cells, column))
            .collect()
    }

    fn heuristic(&self, cells: &[Cell], perspective: Side) -> Option<Score> {
        Some(evaluate::threat_score(cells, LINES, perspective))
    }

    /// Humans pick columns numbered from 1.
    fn index_for_choice(&self, cells: &[Cell], choice: usize) -> Option<usize> {
        choice
            .checked_sub(1)
            .and_then(|column| Self::drop_index(cells, column))
    }
}
