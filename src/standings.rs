//! The league table. Derives each team's record from a flat list of match results and ranks
//! the teams by points, then goal difference, then goals scored.
//!
//! The computation is a single fold over the matches followed by a stable sort. Nothing is
//! shared between calls: the per-team accumulators are allocated for the call and handed back
//! as the ranked table.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::display::DisplaySlice;
use crate::domain::{MatchResult, Side, Team, TeamId};

pub const POINTS_PER_WIN: u32 = 3;
pub const POINTS_PER_DRAW: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStanding {
    pub id: TeamId,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i64,
    pub points: u32,
}
impl TeamStanding {
    fn zeroed(team: &Team) -> Self {
        Self {
            id: team.id.clone(),
            name: team.name.clone(),
            ..Self::default()
        }
    }

    /// Applies one side of a match to this accumulator. Counters saturate at `u32::MAX`.
    fn record(&mut self, result: &MatchResult, side: &Side) {
        let (scored, conceded) = result.goals(side);
        self.played = self.played.saturating_add(1);
        self.goals_for = self.goals_for.saturating_add(u32::from(scored));
        self.goals_against = self.goals_against.saturating_add(u32::from(conceded));
        match scored.cmp(&conceded) {
            Ordering::Greater => {
                self.won = self.won.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_PER_WIN);
            }
            Ordering::Equal => {
                self.drawn = self.drawn.saturating_add(1);
                self.points = self.points.saturating_add(POINTS_PER_DRAW);
            }
            Ordering::Less => {
                self.lost = self.lost.saturating_add(1);
            }
        }
    }

    fn settle(&mut self) {
        self.goal_difference = i64::from(self.goals_for) - i64::from(self.goals_against);
    }
}

/// Ranking comparator: points, then goal difference, then goals for, all descending.
/// Returns [`Ordering::Equal`] for teams level on all three, so a stable sort keeps their
/// existing order.
pub fn rank_order(a: &TeamStanding, b: &TeamStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// Computes the ranked table for `teams` from `matches`.
///
/// Every team in `teams` appears exactly once in the output, whether or not it played. A match
/// side that names a team absent from `teams` is skipped without error; the other side is still
/// counted if known. A match whose home and away teams are the same is applied twice to that
/// team, home side first.
pub fn compute_standings(teams: &[Team], matches: &[MatchResult]) -> Vec<TeamStanding> {
    tally(teams, matches, |_, _, _| {})
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostics {
    /// Matches with at least one side naming an unknown team, once per match in input order.
    pub orphaned: Vec<String>,

    /// Matches with the same team on both sides.
    pub self_referencing: Vec<String>,
}
impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.orphaned.is_empty() && self.self_referencing.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub table: Vec<TeamStanding>,
    pub diagnostics: Diagnostics,
}
impl Standings {
    /// As [`compute_standings`], additionally reporting the matches that were partially or
    /// wholly skipped, and those that referenced the same team twice.
    pub fn compute(teams: &[Team], matches: &[MatchResult]) -> Self {
        let mut diagnostics = Diagnostics::default();
        let mut last_orphaned = None;
        let table = tally(teams, matches, |index, result, side| {
            debug!(
                "skipping {side:?} side of match {}: unknown team {}",
                result.id,
                result.team(&side)
            );
            if last_orphaned != Some(index) {
                last_orphaned = Some(index);
                diagnostics.orphaned.push(result.id.clone());
            }
        });
        diagnostics.self_referencing = matches
            .iter()
            .filter(|result| result.is_self_referencing())
            .map(|result| result.id.clone())
            .collect();
        if !diagnostics.self_referencing.is_empty() {
            debug!(
                "self-referencing matches counted twice: {}",
                DisplaySlice::from(&*diagnostics.self_referencing)
            );
        }
        Self { table, diagnostics }
    }

    /// The 1-based table position of the given team.
    pub fn position(&self, id: &TeamId) -> Option<usize> {
        self.table
            .iter()
            .position(|standing| &standing.id == id)
            .map(|index| index + 1)
    }

    pub fn leader(&self) -> Option<&TeamStanding> {
        self.table.first()
    }

    pub fn get(&self, id: &TeamId) -> Option<&TeamStanding> {
        self.table.iter().find(|standing| &standing.id == id)
    }
}

fn tally(
    teams: &[Team],
    matches: &[MatchResult],
    mut on_skip: impl FnMut(usize, &MatchResult, Side),
) -> Vec<TeamStanding> {
    let mut rows: Vec<_> = teams.iter().map(TeamStanding::zeroed).collect();

    // a repeated id resolves to its first occurrence; later duplicates stay as zero rows
    let mut index = FxHashMap::with_capacity_and_hasher(teams.len(), Default::default());
    for (row, team) in teams.iter().enumerate() {
        index.entry(team.id.as_str()).or_insert(row);
    }

    for (position, result) in matches.iter().enumerate() {
        for side in [Side::Home, Side::Away] {
            match index.get(result.team(&side).as_str()) {
                Some(&row) => rows[row].record(result, &side),
                None => on_skip(position, result, side),
            }
        }
    }

    for row in &mut rows {
        row.settle();
    }
    rows.sort_by(rank_order);
    rows
}
