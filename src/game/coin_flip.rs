use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use log::debug;

use crate::input_handler::{self, CoinGuess, InputError};

const FRAMES: [&str; 8] = [
    "_", "  \\", "    |", "     /", "      _", "      \\", "      |", "      /",
];
const FRAME_DELAY: Duration = Duration::from_millis(150);
const RESULT_DELAY: Duration = Duration::from_millis(500);

fn io_error(error: std::io::Error) -> InputError {
    InputError::IOError {
        error: error.to_string(),
    }
}

/// Decides who moves first: the human guesses heads or tails and moves
/// first when the guess is right. Re-prompts until the guess parses.
pub fn coin_flip<B: BufRead, W: Write>(
    input: &mut B,
    output: &mut W,
    rng: &fastrand::Rng,
    animate: bool,
) -> Result<bool, InputError> {
    writeln!(output, "Who goes first?").map_err(io_error)?;

    let guess = loop {
        write!(output, "Heads (H) or Tails (T): ").map_err(io_error)?;
        output.flush().map_err(io_error)?;
        match input_handler::parse_coin_guess(input) {
            Ok(guess) => break guess,
            Err(InputError::InvalidInput { .. }) => {
                writeln!(output, "Invalid input.").map_err(io_error)?;
            }
            Err(error) => return Err(error),
        }
    };

    let flip = if rng.bool() {
        CoinGuess::Heads
    } else {
        CoinGuess::Tails
    };

    writeln!(output, "Flipping...").map_err(io_error)?;
    for frame in FRAMES.iter() {
        if animate {
            thread::sleep(FRAME_DELAY);
        }
        writeln!(output, "\t    {}", frame).map_err(io_error)?;
        output.flush().map_err(io_error)?;
    }
    let face = match flip {
        CoinGuess::Heads => "Heads!",
        CoinGuess::Tails => "Tails!",
    };
    writeln!(output, "\t      {}", face).map_err(io_error)?;
    if animate {
        thread::sleep(RESULT_DELAY);
    }
    writeln!(output).map_err(io_error)?;

    debug!("guessed {:?}, flipped {:?}", guess, flip);
    Ok(guess == flip)
}
