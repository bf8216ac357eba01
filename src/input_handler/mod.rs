//! Parsing of raw human text typed during a game.

use std::io::BufRead;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static CHOICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3})$").expect("CHOICE_RE regex should be valid"));
static QUIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?i)q(uit)?$").expect("QUIT_RE regex should be valid"));
static COIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)(?:(h)(?:eads?)?|(t)(?:ails?)?)$").expect("COIN_RE regex should be valid")
});

#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {error:?}")]
    IOError { error: String },
    #[error("invalid input: {input:?}")]
    InvalidInput { input: String },
    #[error("user exited")]
    UserExit,
}

/// A cell number (tic-tac-toe) or column number (connect four), or a
/// request to leave the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveInput {
    Choice(usize),
    Quit,
}

impl FromStr for MoveInput {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();

        if QUIT_RE.is_match(trimmed) {
            return Ok(MoveInput::Quit);
        }

        if let Some(caps) = CHOICE_RE.captures(trimmed) {
            if let Ok(choice) = caps[1].parse() {
                return Ok(MoveInput::Choice(choice));
            }
        }

        Err(InputError::InvalidInput {
            input: input.to_string(),
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CoinGuess {
    Heads,
    Tails,
}

impl FromStr for CoinGuess {
    type Err = InputError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match COIN_RE.captures(input.trim()) {
            Some(caps) if caps.get(1).is_some() => Ok(CoinGuess::Heads),
            Some(_) => Ok(CoinGuess::Tails),
            None => Err(InputError::InvalidInput {
                input: input.to_string(),
            }),
        }
    }
}

/// Reads one line, without its line ending. End of input counts as the user
/// leaving.
pub fn read_line<B: BufRead>(input: &mut B) -> Result<String, InputError> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Err(InputError::UserExit),
        Ok(_) => Ok(line.trim_end().to_string()),
        Err(error) => Err(InputError::IOError {
            error: error.to_string(),
        }),
    }
}

/// Reads and parses the next move; unparseable text is `InvalidInput`.
pub fn parse_move_input<B: BufRead>(input: &mut B) -> Result<MoveInput, InputError> {
    read_line(input)?.parse()
}

pub fn parse_coin_guess<B: BufRead>(input: &mut B) -> Result<CoinGuess, InputError> {
    read_line(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_choice() {
        assert_eq!(MoveInput::from_str("4").unwrap(), MoveInput::Choice(4));
        assert_eq!(MoveInput::from_str(" 12 ").unwrap(), MoveInput::Choice(12));
        assert_eq!(MoveInput::from_str("0").unwrap(), MoveInput::Choice(0));
    }

    #[test]
    fn test_parse_quit() {
        for input in &["q", "Q", "quit", "QUIT"] {
            assert_eq!(MoveInput::from_str(input).unwrap(), MoveInput::Quit);
        }
    }

    #[test]
    fn test_parse_invalid_move() {
        for input in &["", "-1", "a4", "4 5", "1234", "quite"] {
            assert!(
                matches!(
                    MoveInput::from_str(input),
                    Err(InputError::InvalidInput { .. })
                ),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_coin_guess() {
        for input in &["h", "H", "head", "heads"] {
            assert_eq!(CoinGuess::from_str(input).unwrap(), CoinGuess::Heads);
        }
        for input in &["t", "tail", "Tails"] {
            assert_eq!(CoinGuess::from_str(input).unwrap(), CoinGuess::Tails);
        }
        assert!(CoinGuess::from_str("edge").is_err());
    }

    #[test]
    fn test_read_line_until_eof() {
        let mut input = Cursor::new("3\r\nq\n");
        assert_eq!(
            parse_move_input(&mut input).unwrap(),
            MoveInput::Choice(3)
        );
        assert_eq!(parse_move_input(&mut input).unwrap(), MoveInput::Quit);
        assert!(matches!(
            parse_move_input(&mut input),
            Err(InputError::UserExit)
        ));
    }
}
