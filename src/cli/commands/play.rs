//! Play command - play a game against the computer.

use std::io::{self, Write};
use std::str::FromStr;

use grid_games::game::coin_flip::coin_flip;
use grid_games::game::display::GameDisplay;
use grid_games::game::r#loop::GameLoop;
use grid_games::game::{GameKind, Markers, Session};
use grid_games::input_handler::InputError;
use grid_games::searcher::MoveOrder;
use structopt::StructOpt;

use super::Command;

/// Who makes the first move.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum FirstMover {
    Human,
    Computer,
    Coin,
}

type ParseError = &'static str;
impl FromStr for FirstMover {
    type Err = ParseError;
    fn from_str(first: &str) -> Result<Self, Self::Err> {
        match first {
            "human" => Ok(FirstMover::Human),
            "computer" => Ok(FirstMover::Computer),
            "coin" => Ok(FirstMover::Coin),
            _ => Err("invalid first mover; options are: human, computer, coin"),
        }
    }
}

#[derive(StructOpt)]
pub struct PlayArgs {
    pub game: GameKind,
    #[structopt(short, long, default_value = "3")]
    pub size: usize,
    #[structopt(short, long, default_value = "5")]
    pub depth: u8,
    #[structopt(short, long, default_value = "coin")]
    pub first: FirstMover,
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl Command for PlayArgs {
    fn execute(self) {
        let config = self.game.config(self.size, self.depth);
        if let Err(error) = config.validate() {
            eprintln!("{}", error);
            return;
        }

        let stdin = io::stdin();
        let mut input = stdin.lock();
        let mut output = io::stdout();
        let rng = match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };

        let human_moves_first = match self.first {
            FirstMover::Human => true,
            FirstMover::Computer => false,
            FirstMover::Coin => match coin_flip(&mut input, &mut output, &rng, true) {
                Ok(human_moves_first) => human_moves_first,
                Err(InputError::UserExit) => return,
                Err(error) => {
                    eprintln!("error: {}", error);
                    return;
                }
            },
        };

        let markers = Markers::new(human_moves_first);
        println!("You are {}", markers.human);
        if !human_moves_first {
            println!("My turn! Thinking...");
        }
        if let Err(error) = output.flush() {
            eprintln!("error: {}", error);
            return;
        }

        let session =
            match Session::with_move_order(human_moves_first, &config, MoveOrder::from_seed(self.seed)) {
                Ok(session) => session,
                Err(error) => {
                    eprintln!("error: {}", error);
                    return;
                }
            };

        let mut game = GameLoop::new(session, GameDisplay::new(), input, output);
        match game.run() {
            Ok(_) => {}
            Err(error) if error.is_user_exit() => println!(),
            Err(error) => eprintln!("error: {}", error),
        }
    }
}
