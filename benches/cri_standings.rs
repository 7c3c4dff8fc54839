use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Rand, StdRand};

use standings::domain::{MatchResult, Team};
use standings::standings::{compute_standings, Standings};

fn league(num_teams: usize, rounds: usize) -> (Vec<Team>, Vec<MatchResult>) {
    let mut rand = StdRand::default();
    let teams: Vec<_> = (0..num_teams)
        .map(|index| Team::new(format!("t{index}"), format!("Team {index}")))
        .collect();
    let mut matches = vec![];
    for _ in 0..rounds {
        for home in 0..num_teams {
            for away in 0..num_teams {
                if home != away {
                    matches.push(MatchResult::new(
                        format!("m{}", matches.len()),
                        teams[home].id.clone(),
                        teams[away].id.clone(),
                        (rand.next_u64() % 5) as u16,
                        (rand.next_u64() % 5) as u16,
                    ));
                }
            }
        }
    }
    (teams, matches)
}

fn criterion_benchmark(c: &mut Criterion) {
    {
        let (teams, matches) = league(8, 1);
        c.bench_function("cri_standings_8x56", |b| {
            b.iter(|| compute_standings(&teams, &matches));
        });
    }
    {
        let (teams, matches) = league(20, 1);
        c.bench_function("cri_standings_20x380", |b| {
            b.iter(|| compute_standings(&teams, &matches));
        });
        c.bench_function("cri_standings_diagnostics_20x380", |b| {
            b.iter(|| Standings::compute(&teams, &matches));
        });
    }
    {
        let (teams, matches) = league(20, 10);
        c.bench_function("cri_standings_20x3800", |b| {
            b.iter(|| compute_standings(&teams, &matches));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
