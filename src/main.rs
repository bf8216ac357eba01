mod cli;

use cli::commands::Command;
use cli::GridGames;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    grid_games::instrumentation::init_tracing();

    GridGames::from_args().execute();

    #[cfg(feature = "instrumentation")]
    grid_games::instrumentation::print_timing_statistics();
}
