//! Board representation shared by every topology: cell contents, the two
//! sides, and the immutable `Position` the searcher walks over.

pub mod cell;
pub mod error;
pub mod position;
pub mod side;

pub use cell::Cell;
pub use error::BoardError;
pub use position::{Position, PositionKey, MAX_CELLS};
pub use side::Side;
