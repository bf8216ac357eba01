use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("Cannot play cell {index}, it is already occupied")]
    CellOccupiedError { index: usize },
    #[error("Cannot play cell {index}, the board only has {capacity} cells")]
    IndexOutOfRangeError { index: usize, capacity: usize },
    #[error("Expected a board of {expected} cells, found {found}")]
    CellCountError { expected: usize, found: usize },
    #[error("Invalid cell character {0:?}; use '.', 'X' (human) or 'O' (computer)")]
    InvalidCellCharError(char),
}
