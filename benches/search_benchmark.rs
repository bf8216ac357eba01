use grid_games::board::{Position, Side};
use grid_games::rules::{GameRules, GravityRules, GridRules};
use grid_games::searcher::{self, MoveOrder, SearchContext};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("tic-tac-toe full search from empty board", |b| {
        b.iter(tic_tac_toe_from_empty)
    });
    c.bench_function("tic-tac-toe self play", |b| b.iter(tic_tac_toe_self_play));
    c.bench_function("connect four depth 5 opening move", |b| {
        b.iter(connect_four_opening)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn tic_tac_toe_from_empty() {
    let rules = GridRules::new(3).unwrap();
    let mut context = SearchContext::exhaustive();
    let position = Position::root(Side::Human, rules.empty_board());
    searcher::evaluate_position(&mut context, &position, &rules).unwrap();
}

fn tic_tac_toe_self_play() {
    let rules = GridRules::new(3).unwrap();
    let mut context = SearchContext::new(None, MoveOrder::seeded(0));
    let mut position = Position::root(Side::Computer, rules.empty_board());
    while !position.is_terminal() {
        let index = searcher::best_move(&mut context, &position, &rules).unwrap();
        position = position.play(index, &rules).unwrap();
    }
}

fn connect_four_opening() {
    let rules = GravityRules;
    let mut context = SearchContext::new(Some(5), MoveOrder::Natural);
    let position = Position::root(Side::Human, rules.empty_board());
    searcher::evaluate_position(&mut context, &position, &rules).unwrap();
}
