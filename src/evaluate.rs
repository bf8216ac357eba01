use crate::board::{Cell, Side};

/// Search values are fractions of a win, always from the computer's point
/// of view: proven wins are `COMPUTER_WINS`, proven losses `HUMAN_WINS`.
pub type Score = f64;

pub const COMPUTER_WINS: Score = 1.0;
pub const HUMAN_WINS: Score = -1.0;
pub const TIE: Score = 0.0;

/// Divisor for the threat heuristic. There are fewer open-three cells on a
/// board than this, so heuristic values stay strictly inside (-1, 1).
pub const HEURISTIC_SCALE: Score = 50.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEnding {
    Win,
    Tie,
}

/// Fixed value of a finished game, where `mover` made the final move.
pub fn terminal_value(mover: Side, ending: GameEnding) -> Score {
    match (ending, mover) {
        (GameEnding::Tie, _) => TIE,
        (GameEnding::Win, Side::Computer) => COMPUTER_WINS,
        (GameEnding::Win, Side::Human) => HUMAN_WINS,
    }
}

/// Dimensions of a rectangular board scanned for threats.
#[derive(Clone, Copy, Debug)]
pub struct Lines {
    pub rows: usize,
    pub columns: usize,
    pub connect: usize,
}

const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ThreatCount {
    pub own: usize,
    pub other: usize,
}

impl ThreatCount {
    pub fn difference(&self) -> isize {
        self.own as isize - self.other as isize
    }
}

/// Counts the empty cells that would complete a line for `side` (`own`) and
/// for its opponent (`other`). Every window of `connect` cells along a row,
/// column or diagonal is checked; a window holding `connect - 1` pieces of one
/// side and a single empty cell marks that cell. Each cell counts at most once
/// per side, no matter how many windows it completes.
pub fn count_open_threes(cells: &[Cell], lines: Lines, side: Side) -> ThreatCount {
    debug_assert_eq!(cells.len(), lines.rows * lines.columns);

    let mut own_cells = 0u64;
    let mut other_cells = 0u64;

    for row in 0..lines.rows as isize {
        for column in 0..lines.columns as isize {
            for &(row_step, column_step) in DIRECTIONS.iter() {
                let last_row = row + row_step * (lines.connect as isize - 1);
                let last_column = column + column_step * (lines.connect as isize - 1);
                if last_row < 0
                    || last_row >= lines.rows as isize
                    || last_column < 0
                    || last_column >= lines.columns as isize
                {
                    continue;
                }

                let mut own = 0;
                let mut other = 0;
                let mut empty = None;
                for step in 0..lines.connect as isize {
                    let index = ((row + row_step * step) as usize) * lines.columns
                        + (column + column_step * step) as usize;
                    match cells[index].side() {
                        Some(occupant) if occupant == side => own += 1,
                        Some(_) => other += 1,
                        None => empty = Some(index),
                    }
                }

                if let Some(index) = empty {
                    if own == lines.connect - 1 {
                        own_cells |= 1u64 << index;
                    } else if other == lines.connect - 1 {
                        other_cells |= 1u64 << index;
                    }
                }
            }
        }
    }

    ThreatCount {
        own: own_cells.count_ones() as usize,
        other: other_cells.count_ones() as usize,
    }
}

/// Approximate value of a non-terminal position, from `perspective`'s side.
pub fn threat_score(cells: &[Cell], lines: Lines, perspective: Side) -> Score {
    count_open_threes(cells, lines, perspective).difference() as Score / HEURISTIC_SCALE
}
