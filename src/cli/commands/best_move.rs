//! Best move command - analyse a single position.

use grid_games::board::{Position, Side};
use grid_games::game::GameKind;
use grid_games::rules::{GameRules, Topology, GRAVITY_COLUMNS};
use grid_games::searcher::{evaluate_position, MoveOrder, SearchContext};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    pub game: GameKind,
    #[structopt(short, long)]
    pub board: String,
    #[structopt(short, long, default_value = "3")]
    pub size: usize,
    #[structopt(short, long, default_value = "5")]
    pub depth: u8,
    #[structopt(long = "to-move", default_value = "computer")]
    pub to_move: Side,
    #[structopt(long)]
    pub seed: Option<u64>,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let config = self.game.config(self.size, self.depth);
        let rules = match Topology::from_config(&config) {
            Ok(rules) => rules,
            Err(error) => {
                eprintln!("{}", error);
                return;
            }
        };

        let position = match Position::parse(self.to_move.opposite(), &self.board, &rules) {
            Ok(position) => position,
            Err(error) => {
                eprintln!("Failed to read board: {}", error);
                return;
            }
        };

        if let Some(winner) = rules.winner(position.cells()) {
            eprintln!("The game is already over: {} has won.", winner);
            return;
        }
        if rules
            .legal_moves(position.cells(), &mut MoveOrder::Natural)
            .is_empty()
        {
            eprintln!("There are no valid moves in the given position.");
            return;
        }

        let mut context = SearchContext::new(config.max_depth(), MoveOrder::from_seed(self.seed));
        match evaluate_position(&mut context, &position, &rules) {
            Ok(outcome) => {
                let best_move = outcome
                    .best_move
                    .expect("search of a non-terminal position yields a move");
                let shown = match rules {
                    Topology::Grid(_) => best_move,
                    Topology::Gravity(_) => best_move % GRAVITY_COLUMNS + 1,
                };
                println!(
                    "{} (value {:+.3}{})",
                    shown,
                    outcome.value,
                    if outcome.approximated { ", estimated" } else { "" }
                );
            }
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
