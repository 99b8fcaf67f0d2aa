use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use coup_round::{Config, Game, GameStatus, RandomDecider};

fn complete_game(num_players: usize, seed: u64) {
    let names = (0..num_players).map(|idx| format!("p{idx}")).collect();
    let mut game = black_box(Game::new(Config::default(), names, seed).unwrap());
    let mut decider = RandomDecider::new(Pcg64Mcg::seed_from_u64(seed));

    for _ in 0..1000 {
        if let GameStatus::Winner(_) = game.play_turn(&mut decider).unwrap() {
            break;
        }
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_game");
    for num_players in 2..=6usize {
        group.bench_with_input(BenchmarkId::from_parameter(num_players), &num_players, |b, &num_players| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                complete_game(num_players, seed)
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
