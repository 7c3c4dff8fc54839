use criterion::{criterion_group, criterion_main, Criterion};

use standings::domain::{MatchResult, Team};
use standings::season::scope;
use standings::standings::compute_standings;

const SEASONS: usize = 4;

fn league(teams_per_season: usize) -> (Vec<Team>, Vec<MatchResult>) {
    let mut teams = vec![];
    let mut matches = vec![];
    for season in 0..SEASONS {
        let season_id = format!("s{season}");
        for index in 0..teams_per_season {
            teams.push(Team::new(format!("{season_id}t{index}"), format!("Team {index}")).with_season(&season_id));
        }
        for home in 0..teams_per_season {
            for away in 0..teams_per_season {
                if home != away {
                    let score = ((home * 7 + away * 3) % 4) as u16;
                    matches.push(
                        MatchResult::new(
                            format!("m{}", matches.len()),
                            format!("{season_id}t{home}"),
                            format!("{season_id}t{away}"),
                            score,
                            3 - score.min(3),
                        )
                        .with_season(&season_id),
                    );
                }
            }
        }
    }
    (teams, matches)
}

fn criterion_benchmark(c: &mut Criterion) {
    let (teams, matches) = league(16);
    c.bench_function("cri_scope_4x16", |b| {
        b.iter(|| scope(&teams, &matches, Some("s2")));
    });
    c.bench_function("cri_scope_standings_4x16", |b| {
        b.iter(|| {
            let (teams, matches) = scope(&teams, &matches, Some("s2"));
            compute_standings(&teams, &matches)
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
