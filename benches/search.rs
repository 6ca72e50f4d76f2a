//! Look-ahead search benchmarks on a starter encounter.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use card_battler::bots::{BacktrackBot, SearchConfig};
use card_battler::core::{BattleConfig, GameRng};
use card_battler::games::starter;
use card_battler::BattleState;

fn jaw_worm_battle() -> BattleState {
    let mut state = starter::encounter(BattleConfig::default().with_seed(7), |asc, rng| {
        vec![starter::jaw_worm(asc, rng)]
    });
    state.start();
    state
}

fn bench_snapshots(c: &mut Criterion) {
    let state = jaw_worm_battle();
    let mut rng = GameRng::new(1);

    c.bench_function("clone_undeterministic", |b| {
        b.iter(|| black_box(state.clone_undeterministic(&mut rng)))
    });
    c.bench_function("content_hash", |b| b.iter(|| black_box(state.content_hash())));
}

fn bench_search(c: &mut Criterion) {
    let state = jaw_worm_battle();
    let mut group = c.benchmark_group("backtrack");
    group.sample_size(20);

    for depth in [1u32, 2, 3] {
        for memoize in [false, true] {
            let label = if memoize { "memo" } else { "plain" };
            group.bench_with_input(BenchmarkId::new(label, depth), &depth, |b, &depth| {
                b.iter(|| {
                    let config = SearchConfig::default().with_depth(depth).with_memoize(memoize);
                    let mut bot = BacktrackBot::new(config);
                    black_box(bot.search(&state))
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_snapshots, bench_search);
criterion_main!(benches);
