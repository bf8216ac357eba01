//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{best_move::BestMoveArgs, play::PlayArgs};

#[derive(StructOpt)]
#[structopt(
    name = "grid-games",
    about = "Tic-tac-toe and connect four against an alpha-beta minimax opponent"
)]
pub enum GridGames {
    #[structopt(
        name = "play",
        about = "Play `tic-tac-toe` (N×N, `--size`, default: 3) or `connect-four` (`--depth`, default: 5) against the computer. Who moves first is decided by a coin flip unless you specify it with `--first human|computer`. Enter a cell number (tic-tac-toe) or a column number (connect four) to move, or `q` to quit."
    )]
    Play(PlayArgs),
    #[structopt(
        name = "best-move",
        about = "Print the computer's best move and its value for a board given with `--board` as one character per cell: `.` empty, `X` human, `O` computer. Connect four moves are printed as 1-based column numbers."
    )]
    BestMove(BestMoveArgs),
}

impl crate::cli::commands::Command for GridGames {
    fn execute(self) {
        match self {
            Self::Play(cmd) => cmd.execute(),
            Self::BestMove(cmd) => cmd.execute(),
        }
    }
}
