//! Loading league data from local files: a JSON league document and, optionally, match results
//! kept as CSV.

use std::io;
use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use ordinalizer::Ordinal;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};
use thiserror::Error;
use tracing::debug;

use crate::csv::CsvReader;
use crate::domain::{MatchResult, Team};
use crate::file::read_json;
use crate::season::{Registration, Season};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueFile {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub matches: Vec<MatchResult>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("expected header '{expected}', got '{actual}'")]
    UnexpectedHeader { expected: String, actual: String },
}

/// Columns of a match results CSV, in file order. The season column is optional.
#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum MatchField {
    Id,
    Home,
    Away,
    HomeScore,
    AwayScore,
    SeasonId,
}

impl From<MatchField> for usize {
    fn from(field: MatchField) -> Self {
        field.ordinal()
    }
}

const REQUIRED_FIELDS: usize = MatchField::COUNT - 1;

pub fn read_league(path: impl AsRef<Path>) -> Result<LeagueFile, DataError> {
    let league: LeagueFile = read_json(path)?;
    debug!(
        "read {} teams, {} matches, {} seasons, {} registrations",
        league.teams.len(),
        league.matches.len(),
        league.seasons.len(),
        league.registrations.len()
    );
    Ok(league)
}

pub fn read_matches_csv(path: impl AsRef<Path>) -> Result<Vec<MatchResult>, DataError> {
    parse_matches(CsvReader::open(path)?)
}

/// Parses match rows from `reader`. The first non-blank line must be the header
/// `id,home,away,home_score,away_score`, optionally followed by `,season_id`.
pub fn parse_matches<R: BufRead>(mut reader: CsvReader<R>) -> Result<Vec<MatchResult>, DataError> {
    let with_season = match reader.next().transpose()? {
        None => return Ok(vec![]),
        Some((_, header)) => check_header(&header)?,
    };
    let width = if with_season { MatchField::COUNT } else { REQUIRED_FIELDS };

    let mut matches = vec![];
    for row in reader {
        let (line, fields) = row?;
        if fields.len() != width {
            return Err(DataError::MalformedRow {
                line,
                reason: format!("expected {width} fields, got {}", fields.len()),
            });
        }
        let field = |field: MatchField| fields[usize::from(field)].as_str();
        let mut result = MatchResult::new(
            non_blank(field(MatchField::Id), MatchField::Id, line)?,
            non_blank(field(MatchField::Home), MatchField::Home, line)?,
            non_blank(field(MatchField::Away), MatchField::Away, line)?,
            parse_score(field(MatchField::HomeScore), MatchField::HomeScore, line)?,
            parse_score(field(MatchField::AwayScore), MatchField::AwayScore, line)?,
        );
        if with_season && !field(MatchField::SeasonId).is_empty() {
            result = result.with_season(field(MatchField::SeasonId));
        }
        matches.push(result);
    }
    debug!("parsed {} match results", matches.len());
    Ok(matches)
}

fn check_header(header: &[String]) -> Result<bool, DataError> {
    let expected: Vec<_> = MatchField::iter().map(|field| field.to_string()).collect();
    let matches_prefix = |len: usize| header.len() == len && header == &expected[..len];
    if matches_prefix(MatchField::COUNT) {
        Ok(true)
    } else if matches_prefix(REQUIRED_FIELDS) {
        Ok(false)
    } else {
        Err(DataError::UnexpectedHeader {
            expected: expected[..REQUIRED_FIELDS].join(","),
            actual: header.join(","),
        })
    }
}

fn non_blank(value: &str, field: MatchField, line: usize) -> Result<&str, DataError> {
    if value.is_empty() {
        Err(DataError::MalformedRow {
            line,
            reason: format!("{field} must not be blank"),
        })
    } else {
        Ok(value)
    }
}

fn parse_score(value: &str, field: MatchField, line: usize) -> Result<u16, DataError> {
    u16::from_str(value).map_err(|err| DataError::MalformedRow {
        line,
        reason: format!("{field} '{value}' is not a non-negative score: {err}"),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn parse(text: &str) -> Result<Vec<MatchResult>, DataError> {
        parse_matches(CsvReader::wrap(Cursor::new(text.to_string())))
    }

    #[test]
    fn parse_without_season() {
        let matches = parse("id,home,away,home_score,away_score\nm1,A,B,2,1\n\nm2, B , C,0,0\n").unwrap();
        assert_eq!(
            vec![MatchResult::new("m1", "A", "B", 2, 1), MatchResult::new("m2", "B", "C", 0, 0)],
            matches
        );
    }

    #[test]
    fn parse_with_season() {
        let matches = parse("id,home,away,home_score,away_score,season_id\nm1,A,B,2,1,s1\nm2,A,C,1,1,\n").unwrap();
        assert_eq!(Some("s1"), matches[0].season_id.as_deref());
        assert_eq!(None, matches[1].season_id);
    }

    #[test]
    fn parse_empty() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn bad_header() {
        let err = parse("id,team1,team2,score1,score2\n").unwrap_err();
        assert_eq!(
            "expected header 'id,home,away,home_score,away_score', got 'id,team1,team2,score1,score2'",
            err.to_string()
        );
    }

    #[test]
    fn negative_score() {
        let err = parse("id,home,away,home_score,away_score\nm1,A,B,-1,0\n").unwrap_err();
        assert!(
            err.to_string().starts_with("line 2: home_score '-1' is not a non-negative score"),
            "{err}"
        );
    }

    #[test]
    fn wrong_width() {
        let err = parse("id,home,away,home_score,away_score\nm1,A,B,1\n").unwrap_err();
        assert_eq!("line 2: expected 5 fields, got 4", err.to_string());
    }

    #[test]
    fn quoted_team_ids() {
        let matches = parse("id,home,away,home_score,away_score\nm1,\"Smith, J\",B,1,0\n").unwrap();
        assert_eq!(vec![MatchResult::new("m1", "Smith, J", "B", 1, 0)], matches);

        let err = parse("id,home,away,home_score,away_score\nm1,Smith, J,B,1,0\n").unwrap_err();
        assert_eq!("line 2: expected 5 fields, got 6", err.to_string());
    }

    #[test]
    fn blank_team() {
        let err = parse("id,home,away,home_score,away_score\nm1,,B,1,0\n").unwrap_err();
        assert_eq!("line 2: home must not be blank", err.to_string());
    }

    #[test]
    fn sample_files() {
        let league = read_league("data/league.json").unwrap();
        assert_eq!(5, league.teams.len());
        assert_eq!(2, league.seasons.len());
        assert_eq!(2, league.registrations.len());

        let matches = read_matches_csv("data/matches.csv").unwrap();
        assert_eq!(league.matches[..], matches[..4]);
        assert_eq!(Some("s2"), matches[4].season_id.as_deref());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(read_league("data/missing.json"), Err(DataError::Io(_))));
    }

    #[test]
    fn league_file_defaults() {
        let league: LeagueFile = serde_json::from_str(r#"{"teams":[{"id":"A","name":"Alpha"}]}"#).unwrap();
        assert_eq!(vec![Team::new("A", "Alpha")], league.teams);
        assert!(league.matches.is_empty());
        assert!(league.seasons.is_empty());
        assert!(league.registrations.is_empty());
    }
}
