//! Alpha-beta minimax over game positions.
//!
//! # Core Algorithm
//!
//! Values are always from the computer's point of view: the computer's
//! levels maximize and the human's levels minimize. The window
//! [alpha, beta] holds the range of values that can still change the
//! decision higher up; once it closes, remaining siblings are skipped.
//!
//! # Memo
//!
//! Each child is looked up in the context's `MemoTable` before it is
//! searched, so transpositions are evaluated once per session. Values proven
//! under a narrowed window are stored as bounds; see `BoundType`.
//!
//! # Depth limit
//!
//! With a maximum depth configured, positions at that depth are scored by the
//! game's heuristic instead of being expanded. Such values are marked
//! approximated. An approximated value is never stored, and marks every
//! ancestor that adopted it as its best value, so those stay out of the memo
//! as well.

use std::time::{Duration, Instant};

use log::{debug, trace};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use super::memo::{BoundType, MemoTable};
use super::move_order::MoveOrder;
use crate::board::{Position, Side};
use crate::evaluate::{self, Score, COMPUTER_WINS, HUMAN_WINS};
use crate::rules::GameRules;

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("the game is already over at {position}")]
    GameOverError { position: String },
}

/// Result of searching one position.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SearchOutcome {
    /// Best move for the side to play; for terminal and cutoff positions,
    /// the move that produced the position.
    pub best_move: Option<usize>,
    pub value: Score,
    pub approximated: bool,
}

/// Statistics collected during search.
#[derive(Default)]
struct SearchStats {
    position_count: usize,
    memo_hits: usize,
    memo_stores: usize,
    cutoffs: usize,
    last_value: Option<Score>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_result(&mut self, value: Score, duration: Duration) {
        self.last_value = Some(value);
        self.last_duration = Some(duration);
    }
}

/// Everything a search carries between calls: the depth limit, the move
/// ordering, and the memo, which lives as long as the context does.
pub struct SearchContext {
    max_depth: Option<u8>,
    move_order: MoveOrder,
    memo: MemoTable,
    stats: SearchStats,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(None, MoveOrder::Natural)
    }
}

impl SearchContext {
    pub fn new(max_depth: Option<u8>, move_order: MoveOrder) -> Self {
        Self {
            max_depth,
            move_order,
            memo: MemoTable::new(),
            stats: SearchStats::default(),
        }
    }

    /// Unlimited depth, natural move order.
    pub fn exhaustive() -> Self {
        Self::default()
    }

    pub fn max_depth(&self) -> Option<u8> {
        self.max_depth
    }

    pub fn memo(&self) -> &MemoTable {
        &self.memo
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn memo_hits(&self) -> usize {
        self.stats.memo_hits
    }

    pub fn memo_stores(&self) -> usize {
        self.stats.memo_stores
    }

    pub fn cutoff_count(&self) -> usize {
        self.stats.cutoffs
    }

    pub fn last_value(&self) -> Option<Score> {
        self.stats.last_value
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }
}

/// Searches `position` and returns the best move for the side to play.
#[must_use = "search returns the best move found"]
pub fn best_move<R: GameRules + ?Sized>(
    context: &mut SearchContext,
    position: &Position,
    rules: &R,
) -> Result<usize, SearchError> {
    let outcome = evaluate_position(context, position, rules)?;
    Ok(outcome
        .best_move
        .expect("search of a non-terminal position yields a move"))
}

/// Searches `position` with the full window and returns its best move and
/// value.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn evaluate_position<R: GameRules + ?Sized>(
    context: &mut SearchContext,
    position: &Position,
    rules: &R,
) -> Result<SearchOutcome, SearchError> {
    if position.is_terminal() {
        return Err(SearchError::GameOverError {
            position: position.to_string(),
        });
    }

    context.reset_stats();
    let start = Instant::now();

    let outcome = alpha_beta(context, position, rules, HUMAN_WINS, COMPUTER_WINS, 0);

    context.stats.record_result(outcome.value, start.elapsed());
    debug!(
        "searched {} positions (max depth {:?}): move {:?}, value {}{}, {} memo hits, {} memo stores, {} cutoffs, {} memo entries",
        context.stats.position_count,
        context.max_depth,
        outcome.best_move,
        outcome.value,
        if outcome.approximated { " (approximated)" } else { "" },
        context.stats.memo_hits,
        context.stats.memo_stores,
        context.stats.cutoffs,
        context.memo.len(),
    );

    Ok(outcome)
}

/// Updates best value and move if `value` is strictly better for the side
/// choosing. Returns true if the best was replaced.
fn update_best(
    value: Score,
    index: usize,
    maximizing_player: bool,
    best_value: &mut Score,
    best_move: &mut Option<usize>,
) -> bool {
    let is_better = if maximizing_player {
        value > *best_value
    } else {
        value < *best_value
    };

    if is_better {
        *best_value = value;
        *best_move = Some(index);
    }
    is_better
}

pub(crate) fn alpha_beta<R: GameRules + ?Sized>(
    context: &mut SearchContext,
    position: &Position,
    rules: &R,
    mut alpha: Score,
    mut beta: Score,
    depth: u8,
) -> SearchOutcome {
    context.stats.position_count += 1;

    if let Some(ending) = position.ending() {
        return SearchOutcome {
            best_move: position.last_move(),
            value: evaluate::terminal_value(position.mover(), ending),
            approximated: false,
        };
    }

    if context.max_depth.map_or(false, |max_depth| depth >= max_depth) {
        if let Some(value) = rules.heuristic(position.cells(), Side::Computer) {
            return SearchOutcome {
                best_move: position.last_move(),
                value,
                approximated: true,
            };
        }
    }

    let maximizing_player = position.next_to_move().maximize_score();
    let mut best_value = if maximizing_player {
        Score::NEG_INFINITY
    } else {
        Score::INFINITY
    };
    let mut best_move = None;
    let mut best_approximated = false;

    let candidates = rules.legal_moves(position.cells(), &mut context.move_order);

    for index in candidates {
        let child = position
            .play(index, rules)
            .expect("move generator should only offer open cells");
        let key = child.key();

        let (value, approximated) = match context.memo.probe(&key, alpha, beta) {
            Some(value) => {
                context.stats.memo_hits += 1;
                (value, false)
            }
            None => {
                let outcome = alpha_beta(context, &child, rules, alpha, beta, depth + 1);
                if !outcome.approximated {
                    let bound_type = BoundType::classify(outcome.value, alpha, beta);
                    if context.memo.store(key, outcome.value, bound_type) {
                        context.stats.memo_stores += 1;
                        trace!("memo {} = {} ({:?})", child, outcome.value, bound_type);
                    }
                }
                (outcome.value, outcome.approximated)
            }
        };

        if update_best(
            value,
            index,
            maximizing_player,
            &mut best_value,
            &mut best_move,
        ) {
            best_approximated = approximated;
        }

        if maximizing_player {
            alpha = alpha.max(best_value);
        } else {
            beta = beta.min(best_value);
        }

        if alpha >= beta {
            context.stats.cutoffs += 1;
            break;
        }
    }

    if best_move.is_none() {
        panic!("non-terminal position has no legal moves: {}", position);
    }

    SearchOutcome {
        best_move,
        value: best_value,
        approximated: best_approximated,
    }
}

/// Plain minimax without pruning, memo or depth limit. Exponential; meant for
/// checking the alpha-beta search on small boards.
pub fn minimax_value<R: GameRules + ?Sized>(position: &Position, rules: &R) -> Score {
    if let Some(ending) = position.ending() {
        return evaluate::terminal_value(position.mover(), ending);
    }

    let maximizing_player = position.next_to_move().maximize_score();
    let values = rules
        .legal_moves(position.cells(), &mut MoveOrder::Natural)
        .into_iter()
        .map(|index| {
            let child = position
                .play(index, rules)
                .expect("move generator should only offer open cells");
            minimax_value(&child, rules)
        });

    let best = if maximizing_player {
        values.fold(Score::NEG_INFINITY, Score::max)
    } else {
        values.fold(Score::INFINITY, Score::min)
    };
    assert!(
        best.is_finite(),
        "non-terminal position has no legal moves: {}",
        position
    );
    best
}
