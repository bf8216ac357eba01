use std::collections::BTreeSet;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::{BoardError, Cell, Position, Side};
use crate::evaluate::{GameEnding, Score};
use crate::game::config::{ConfigError, GameConfig, COMFORTABLE_BOARD_SIZE};
use crate::rules::{GameRules, Topology};
use crate::searcher::{self, MoveOrder, SearchContext, SearchError};

#[derive(Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("The game is already over")]
    GameOverError,
    #[error("Cell {index} cannot be played")]
    IllegalMoveError { index: usize },
    #[error("Config error: {error}")]
    ConfigError { error: ConfigError },
    #[error("Board error: {error}")]
    BoardError { error: BoardError },
    #[error("Search error: {error}")]
    SearchError { error: SearchError },
}

impl From<ConfigError> for SessionError {
    fn from(error: ConfigError) -> Self {
        SessionError::ConfigError { error }
    }
}

impl From<BoardError> for SessionError {
    fn from(error: BoardError) -> Self {
        SessionError::BoardError { error }
    }
}

impl From<SearchError> for SessionError {
    fn from(error: SearchError) -> Self {
        SessionError::SearchError { error }
    }
}

/// State of the game after a turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnOutcome {
    Continue,
    HumanWins,
    ComputerWins,
    Tie,
}

impl TurnOutcome {
    fn after(mover: Side, ending: Option<GameEnding>) -> Self {
        match (ending, mover) {
            (None, _) => TurnOutcome::Continue,
            (Some(GameEnding::Tie), _) => TurnOutcome::Tie,
            (Some(GameEnding::Win), Side::Human) => TurnOutcome::HumanWins,
            (Some(GameEnding::Win), Side::Computer) => TurnOutcome::ComputerWins,
        }
    }

    pub fn is_over(&self) -> bool {
        *self != TurnOutcome::Continue
    }

    /// Result line shown to the human once the game has ended.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            TurnOutcome::Continue => None,
            TurnOutcome::HumanWins => Some("You win!"),
            TurnOutcome::ComputerWins => Some("You lose"),
            TurnOutcome::Tie => Some("Tie game"),
        }
    }
}

/// Display symbols: whoever moves first plays `X`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Markers {
    pub human: char,
    pub computer: char,
}

impl Markers {
    pub const FIRST: char = 'X';
    pub const SECOND: char = 'O';

    pub fn new(human_moves_first: bool) -> Self {
        if human_moves_first {
            Self {
                human: Self::FIRST,
                computer: Self::SECOND,
            }
        } else {
            Self {
                human: Self::SECOND,
                computer: Self::FIRST,
            }
        }
    }

    pub fn symbol(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => ' ',
            Cell::Human => self.human,
            Cell::Computer => self.computer,
        }
    }
}

pub struct SearchStats {
    pub positions_searched: usize,
    pub memo_hits: usize,
    pub cutoffs: usize,
    pub memo_size: usize,
    pub max_depth: Option<u8>,
    pub last_value: Option<Score>,
    pub last_search_duration: Option<Duration>,
}

/// A human-versus-computer game. Owns the live board and the search memo;
/// every human move is answered by a computer move before returning.
pub struct Session {
    rules: Topology,
    cells: Vec<Cell>,
    search_context: SearchContext,
    markers: Markers,
    outcome: TurnOutcome,
    last_computer_move: Option<usize>,
}

/// Starts a game with shuffled move ordering.
pub fn new_session(human_moves_first: bool, config: &GameConfig) -> Result<Session, SessionError> {
    Session::new(human_moves_first, config)
}

impl Session {
    pub fn new(human_moves_first: bool, config: &GameConfig) -> Result<Self, SessionError> {
        Self::with_move_order(human_moves_first, config, MoveOrder::shuffled())
    }

    /// Starts a game; when the computer moves first its move is made here.
    pub fn with_move_order(
        human_moves_first: bool,
        config: &GameConfig,
        move_order: MoveOrder,
    ) -> Result<Self, SessionError> {
        let rules = Topology::from_config(config)?;
        if let GameConfig::TicTacToe { board_size } = *config {
            if board_size > COMFORTABLE_BOARD_SIZE {
                warn!(
                    "searching a {}x{} board to the end may take a very long time",
                    board_size, board_size
                );
            }
        }

        let mut session = Self {
            cells: rules.empty_board(),
            search_context: SearchContext::new(config.max_depth(), move_order),
            markers: Markers::new(human_moves_first),
            outcome: TurnOutcome::Continue,
            last_computer_move: None,
            rules,
        };

        info!(
            "new {} game, {} moves first",
            session.rules.name(),
            if human_moves_first { Side::Human } else { Side::Computer }
        );

        if !human_moves_first {
            session.computer_turn()?;
        }
        Ok(session)
    }

    /// Plays the human's move and, unless that ended the game, the
    /// computer's reply.
    pub fn apply_human_move(&mut self, index: usize) -> Result<TurnOutcome, SessionError> {
        if self.outcome.is_over() {
            return Err(SessionError::GameOverError);
        }
        if !self.legal_move_indices().contains(&index) {
            return Err(SessionError::IllegalMoveError { index });
        }

        if self.take_turn(index, Side::Human)?.is_over() {
            return Ok(self.outcome);
        }
        self.computer_turn()
    }

    /// Whether the human playing `index` would finish the game, leaving the
    /// computer no reply.
    pub fn ends_game(&self, index: usize) -> Result<bool, SessionError> {
        if self.outcome.is_over() {
            return Err(SessionError::GameOverError);
        }
        let position = Position::new(Side::Human, &self.cells, index, &self.rules)?;
        Ok(position.is_terminal())
    }

    pub fn board_snapshot(&self) -> &[Cell] {
        &self.cells
    }

    /// Cells the human may play right now.
    pub fn legal_move_indices(&self) -> BTreeSet<usize> {
        if self.outcome.is_over() {
            return BTreeSet::new();
        }
        self.rules
            .legal_moves(&self.cells, &mut MoveOrder::Natural)
            .into_iter()
            .collect()
    }

    /// Converts the number a human typed (cell or column) to a cell index.
    pub fn index_for_choice(&self, choice: usize) -> Option<usize> {
        self.rules.index_for_choice(&self.cells, choice)
    }

    pub fn rules(&self) -> &Topology {
        &self.rules
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }

    pub fn outcome(&self) -> TurnOutcome {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn result(&self) -> Option<&'static str> {
        self.outcome.message()
    }

    pub fn last_computer_move(&self) -> Option<usize> {
        self.last_computer_move
    }

    pub fn search_stats(&self) -> SearchStats {
        SearchStats {
            positions_searched: self.search_context.searched_position_count(),
            memo_hits: self.search_context.memo_hits(),
            cutoffs: self.search_context.cutoff_count(),
            memo_size: self.search_context.memo().len(),
            max_depth: self.search_context.max_depth(),
            last_value: self.search_context.last_value(),
            last_search_duration: self.search_context.last_search_duration(),
        }
    }

    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    fn computer_turn(&mut self) -> Result<TurnOutcome, SessionError> {
        let position = Position::root(Side::Human, self.cells.clone());
        let index = searcher::best_move(&mut self.search_context, &position, &self.rules)?;
        debug!("computer plays {}", index);

        self.last_computer_move = Some(index);
        self.take_turn(index, Side::Computer)
    }

    fn take_turn(&mut self, index: usize, mover: Side) -> Result<TurnOutcome, SessionError> {
        let position = Position::new(mover, &self.cells, index, &self.rules)?;
        self.outcome = TurnOutcome::after(mover, position.ending());
        self.cells = position.into_cells();

        if let Some(message) = self.outcome.message() {
            info!("game over after {} played {}: {}", mover, index, message);
        }
        Ok(self.outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tic_tac_toe(human_moves_first: bool, seed: u64) -> Session {
        Session::with_move_order(
            human_moves_first,
            &GameConfig::tic_tac_toe(),
            MoveOrder::seeded(seed),
        )
        .unwrap()
    }

    fn count(session: &Session, cell: Cell) -> usize {
        session
            .board_snapshot()
            .iter()
            .filter(|&&c| c == cell)
            .count()
    }

    #[test]
    fn test_human_first_starts_empty() {
        let session = tic_tac_toe(true, 0);
        assert!(session.board_snapshot().iter().all(|cell| cell.is_empty()));
        assert_eq!(session.legal_move_indices(), (0..9).collect());
        assert_eq!(session.markers().human, 'X');
        assert_eq!(session.last_computer_move(), None);
    }

    #[test]
    fn test_computer_first_moves_immediately() {
        let session = tic_tac_toe(false, 0);
        assert_eq!(count(&session, Cell::Computer), 1);
        assert_eq!(session.legal_move_indices().len(), 8);
        assert_eq!(session.markers().computer, 'X');
        assert!(session.last_computer_move().is_some());
    }

    #[test]
    fn test_human_move_is_answered() {
        let mut session = tic_tac_toe(true, 3);
        let outcome = session.apply_human_move(4).unwrap();

        assert_eq!(outcome, TurnOutcome::Continue);
        assert_eq!(session.board_snapshot()[4], Cell::Human);
        assert_eq!(count(&session, Cell::Computer), 1);
        assert!([0, 2, 6, 8].contains(&session.last_computer_move().unwrap()));
        assert!(session.search_stats().positions_searched > 0);
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let mut session = tic_tac_toe(true, 0);
        session.apply_human_move(0).unwrap();
        let taken = session.last_computer_move().unwrap();

        assert_eq!(
            session.apply_human_move(0),
            Err(SessionError::IllegalMoveError { index: 0 })
        );
        assert_eq!(
            session.apply_human_move(taken),
            Err(SessionError::IllegalMoveError { index: taken })
        );
        assert_eq!(
            session.apply_human_move(9),
            Err(SessionError::IllegalMoveError { index: 9 })
        );
    }

    #[test]
    fn test_computer_never_loses_and_game_ends() {
        for seed in 0..4 {
            let mut session = tic_tac_toe(true, seed);
            while !session.is_ended() {
                let index = *session.legal_move_indices().iter().next().unwrap();
                session.apply_human_move(index).unwrap();
            }
            assert_ne!(session.outcome(), TurnOutcome::HumanWins);
            assert!(session.result().is_some());
            assert!(session.legal_move_indices().is_empty());
            assert_eq!(
                session.apply_human_move(0),
                Err(SessionError::GameOverError)
            );
        }
    }

    #[test]
    fn test_connect_four_moves_drop() {
        let mut session = Session::with_move_order(
            true,
            &GameConfig::ConnectFour { max_depth: 2 },
            MoveOrder::seeded(1),
        )
        .unwrap();
        assert_eq!(session.legal_move_indices(), (35..42).collect());
        assert_eq!(session.index_for_choice(4), Some(38));

        session.apply_human_move(38).unwrap();
        assert_eq!(session.board_snapshot()[38], Cell::Human);
        assert_eq!(count(&session, Cell::Computer), 1);
        assert_eq!(session.search_stats().max_depth, Some(2));
        assert_eq!(
            session.apply_human_move(3),
            Err(SessionError::IllegalMoveError { index: 3 })
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let result = new_session(true, &GameConfig::TicTacToe { board_size: 0 });
        assert!(matches!(
            result,
            Err(SessionError::ConfigError {
                error: ConfigError::BoardSizeError { size: 0 }
            })
        ));
    }

    #[test]
    fn test_ends_game() {
        let mut session = tic_tac_toe(true, 0);
        assert_eq!(session.ends_game(4), Ok(false));

        session.apply_human_move(4).unwrap();
        let taken = session.last_computer_move().unwrap();
        assert_eq!(
            session.ends_game(taken),
            Err(SessionError::BoardError {
                error: BoardError::CellOccupiedError { index: taken }
            })
        );
        assert!(session.search_stats().cutoffs > 0);
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(TurnOutcome::Continue.message(), None);
        assert_eq!(TurnOutcome::HumanWins.message(), Some("You win!"));
        assert_eq!(TurnOutcome::ComputerWins.message(), Some("You lose"));
        assert_eq!(TurnOutcome::Tie.message(), Some("Tie game"));
    }
}
