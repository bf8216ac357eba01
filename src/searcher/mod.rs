//! Game-tree search shared by every topology.

pub mod memo;
mod move_order;
mod search;


pub use memo::{BoundType, MemoEntry, MemoTable};
pub use move_order::MoveOrder;
pub use search::{
    best_move, evaluate_position, minimax_value, SearchContext, SearchError, SearchOutcome,
};
