use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::board::MAX_CELLS;

pub const DEFAULT_BOARD_SIZE: usize = 3;
pub const DEFAULT_MAX_DEPTH: u8 = 5;

/// Boards larger than this are searched exhaustively but very slowly.
pub const COMFORTABLE_BOARD_SIZE: usize = 4;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Board size must be between 1 and 8, got {size}")]
    BoardSizeError { size: usize },
    #[error("Search depth must be at least 1")]
    DepthTooLowError,
}

/// Which game to play and how hard the computer searches.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GameConfig {
    /// N×N tic-tac-toe, searched to the end of the game.
    TicTacToe { board_size: usize },
    /// 6×7 connect four, searched `max_depth` moves ahead.
    ConnectFour { max_depth: u8 },
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::tic_tac_toe()
    }
}

impl GameConfig {
    pub fn tic_tac_toe() -> Self {
        GameConfig::TicTacToe {
            board_size: DEFAULT_BOARD_SIZE,
        }
    }

    pub fn connect_four() -> Self {
        GameConfig::ConnectFour {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            GameConfig::TicTacToe { board_size }
                if board_size == 0 || board_size * board_size > MAX_CELLS =>
            {
                Err(ConfigError::BoardSizeError { size: board_size })
            }
            GameConfig::ConnectFour { max_depth: 0 } => Err(ConfigError::DepthTooLowError),
            _ => Ok(()),
        }
    }

    /// Depth limit for the searcher; `None` means search to the end.
    pub fn max_depth(&self) -> Option<u8> {
        match *self {
            GameConfig::TicTacToe { .. } => None,
            GameConfig::ConnectFour { max_depth } => Some(max_depth),
        }
    }
}

/// Game selector used on the command line.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GameKind {
    TicTacToe,
    ConnectFour,
}

impl GameKind {
    pub fn config(&self, board_size: usize, max_depth: u8) -> GameConfig {
        match self {
            GameKind::TicTacToe => GameConfig::TicTacToe { board_size },
            GameKind::ConnectFour => GameConfig::ConnectFour { max_depth },
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameKind::TicTacToe => write!(f, "tic-tac-toe"),
            GameKind::ConnectFour => write!(f, "connect-four"),
        }
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for GameKind {
    type Err = ParseError;
    fn from_str(game: &str) -> Result<Self, Self::Err> {
        match game {
            "ttt" | "tic-tac-toe" => Ok(GameKind::TicTacToe),
            "c4" | "connect-four" => Ok(GameKind::ConnectFour),
            _ => Err("invalid game; options are: tic-tac-toe (ttt), connect-four (c4)"),
        }
    }
}
