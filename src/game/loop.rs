use std::io::{BufRead, Write};

use log::debug;
use thiserror::Error;

use crate::game::display::GameDisplay;
use crate::game::session::{Session, SessionError, TurnOutcome};
use crate::input_handler::{self, InputError, MoveInput};
use crate::rules::Topology;

const RESULT_RULE: &str = "--------------------------";
const INVALID_INDEX: &str = "Invalid index.";
const OCCUPIED: &str = "You cannot choose a non-empty space.";

#[derive(Error, Debug)]
pub enum GameLoopError {
    #[error("{error}")]
    InputError { error: InputError },
    #[error("{error}")]
    SessionError { error: SessionError },
}

impl From<InputError> for GameLoopError {
    fn from(error: InputError) -> Self {
        GameLoopError::InputError { error }
    }
}

impl From<SessionError> for GameLoopError {
    fn from(error: SessionError) -> Self {
        GameLoopError::SessionError { error }
    }
}

impl From<std::io::Error> for GameLoopError {
    fn from(error: std::io::Error) -> Self {
        GameLoopError::InputError {
            error: InputError::IOError {
                error: error.to_string(),
            },
        }
    }
}

impl GameLoopError {
    pub fn is_user_exit(&self) -> bool {
        matches!(
            self,
            GameLoopError::InputError {
                error: InputError::UserExit
            }
        )
    }
}

/// Drives a `Session` from lines of human input until the game ends or the
/// human quits.
pub struct GameLoop<B: BufRead, W: Write> {
    session: Session,
    display: GameDisplay,
    input: B,
    output: W,
}

impl<B: BufRead, W: Write> GameLoop<B, W> {
    pub fn new(session: Session, display: GameDisplay, input: B, output: W) -> Self {
        Self {
            session,
            display,
            input,
            output,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self) -> Result<TurnOutcome, GameLoopError> {
        let mut notice = None;
        while !self.session.is_ended() {
            self.render(true, notice.take())?;
            write!(self.output, "Your turn! Play a space: ")?;
            self.output.flush()?;

            let choice = match input_handler::parse_move_input(&mut self.input) {
                Ok(MoveInput::Choice(choice)) => choice,
                Ok(MoveInput::Quit) => return Err(InputError::UserExit.into()),
                Err(InputError::InvalidInput { input }) => {
                    debug!("unparseable move {:?}", input);
                    notice = Some(INVALID_INDEX);
                    continue;
                }
                Err(error) => return Err(error.into()),
            };

            let index = match self.session.index_for_choice(choice) {
                Some(index) => index,
                None => {
                    notice = Some(self.rejection(choice));
                    continue;
                }
            };

            if !self.session.ends_game(index)? {
                writeln!(self.output, "My turn! Thinking...")?;
                self.output.flush()?;
            }
            match self.session.apply_human_move(index) {
                Ok(_) => {}
                Err(SessionError::IllegalMoveError { .. }) => notice = Some(OCCUPIED),
                Err(error) => return Err(error.into()),
            }
        }

        let outcome = self.session.outcome();
        self.display.clear();
        self.display.push_line("");
        self.display.push_line(RESULT_RULE);
        self.display.push_line("");
        if let Some(message) = outcome.message() {
            self.display.push_line(message);
        }
        let frame = self.display.render_board(
            self.session.rules(),
            self.session.board_snapshot(),
            self.session.markers(),
            false,
        );
        self.output.write_all(frame.as_bytes())?;
        self.output.flush()?;
        Ok(outcome)
    }

    fn rejection(&self, choice: usize) -> &'static str {
        match (self.session.rules(), self.session.board_snapshot().get(choice)) {
            (Topology::Grid(_), Some(cell)) if !cell.is_empty() => OCCUPIED,
            _ => INVALID_INDEX,
        }
    }

    /// Clears the screen and draws the board, followed by the result of the
    /// computer's last search and any message about the previous input.
    fn render(&mut self, show_guide: bool, notice: Option<&str>) -> Result<(), GameLoopError> {
        self.display.clear();
        self.display.render_board(
            self.session.rules(),
            self.session.board_snapshot(),
            self.session.markers(),
            show_guide,
        );

        if let Some(index) = self.session.last_computer_move() {
            let stats = self.session.search_stats();
            self.display.push_line(&format!(
                "I played {}. Searched {} positions ({} memo hits, {} cutoffs, {} remembered).",
                index, stats.positions_searched, stats.memo_hits, stats.cutoffs, stats.memo_size
            ));
        }
        if let Some(notice) = notice {
            self.display.push_line(notice);
        }

        self.output.write_all(self.display.buffer().as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}
