//! Common types re-exported for convenience.

pub use crate::board::{Cell, Position, Side};
pub use crate::evaluate::{GameEnding, Score};
pub use crate::game::{GameConfig, Session, TurnOutcome};
pub use crate::rules::{GameRules, GravityRules, GridRules, Topology};
pub use crate::searcher::{MoveOrder, SearchContext};
