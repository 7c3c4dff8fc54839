//! Testing helpers.

use tinyrand::{Rand, StdRand};

use crate::domain::{MatchResult, Team};
use crate::standings::TeamStanding;

pub fn teams(specs: &[(&str, &str)]) -> Vec<Team> {
    specs.iter().map(|&(id, name)| Team::new(id, name)).collect()
}

/// Builds match results with sequential ids `m1`, `m2`, ... from `(home, away, home_score, away_score)`.
pub fn results(specs: &[(&str, &str, u16, u16)]) -> Vec<MatchResult> {
    specs
        .iter()
        .enumerate()
        .map(|(index, &(home, away, home_score, away_score))| {
            MatchResult::new(format!("m{}", index + 1), home, away, home_score, away_score)
        })
        .collect()
}

/// A league of `num_teams` teams with `num_matches` random results between distinct known teams.
pub fn random_league(num_teams: usize, num_matches: usize) -> (Vec<Team>, Vec<MatchResult>) {
    assert!(num_teams >= 2, "at least two teams are needed for a match");
    let mut rand = StdRand::default();
    let teams: Vec<_> = (0..num_teams)
        .map(|index| Team::new(format!("t{index}"), format!("Team {index}")))
        .collect();
    let matches = (0..num_matches)
        .map(|index| {
            let home = (rand.next_u64() % num_teams as u64) as usize;
            let offset = 1 + (rand.next_u64() % (num_teams as u64 - 1)) as usize;
            let away = (home + offset) % num_teams;
            MatchResult::new(
                format!("m{index}"),
                teams[home].id.clone(),
                teams[away].id.clone(),
                (rand.next_u64() % 5) as u16,
                (rand.next_u64() % 5) as u16,
            )
        })
        .collect();
    (teams, matches)
}

pub fn assert_row_laws(table: &[TeamStanding]) {
    for standing in table {
        assert_eq!(3 * standing.won + standing.drawn, standing.points, "point law broken for {standing:?}");
        assert_eq!(
            standing.goals_for as i64 - standing.goals_against as i64,
            standing.goal_difference,
            "goal difference law broken for {standing:?}"
        );
        assert_eq!(
            standing.won + standing.drawn + standing.lost,
            standing.played,
            "results do not add up for {standing:?}"
        );
    }
}
