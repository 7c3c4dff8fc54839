use std::borrow::Borrow;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(String);
impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self(id.into())
    }
}

impl From<String> for TeamId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for TeamId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for TeamId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<String>,
}
impl Team {
    pub fn new(id: impl Into<TeamId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            season_id: None,
        }
    }

    pub fn with_season(mut self, season_id: impl Into<String>) -> Self {
        self.season_id = Some(season_id.into());
        self
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    Home,
    Away,
}
impl Side {
    pub fn flip(&self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Win(Side),
    Draw,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub id: String,
    pub home: TeamId,
    pub away: TeamId,
    pub home_score: u16,
    pub away_score: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_id: Option<String>,
}
impl MatchResult {
    pub fn new(
        id: impl Into<String>,
        home: impl Into<TeamId>,
        away: impl Into<TeamId>,
        home_score: u16,
        away_score: u16,
    ) -> Self {
        Self {
            id: id.into(),
            home: home.into(),
            away: away.into(),
            home_score,
            away_score,
            season_id: None,
        }
    }

    pub fn with_season(mut self, season_id: impl Into<String>) -> Self {
        self.season_id = Some(season_id.into());
        self
    }

    pub fn outcome(&self) -> Outcome {
        if self.home_score > self.away_score {
            Outcome::Win(Side::Home)
        } else if self.home_score < self.away_score {
            Outcome::Win(Side::Away)
        } else {
            Outcome::Draw
        }
    }

    pub fn team(&self, side: &Side) -> &TeamId {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Goals scored and conceded from the perspective of the given `side`.
    pub fn goals(&self, side: &Side) -> (u16, u16) {
        match side {
            Side::Home => (self.home_score, self.away_score),
            Side::Away => (self.away_score, self.home_score),
        }
    }

    pub fn is_self_referencing(&self) -> bool {
        self.home == self.away
    }

    /// Checks a result before it is recorded. The standings engine itself does not require this.
    pub fn validate(&self) -> Result<(), InvalidMatch> {
        if self.is_self_referencing() {
            return Err(InvalidMatch::SameTeam {
                match_id: self.id.clone(),
                team: self.home.clone(),
            });
        }
        Ok(())
    }

    /// Replaces the recorded score. A result that fails [`MatchResult::validate`] is left unchanged.
    pub fn set_score(&mut self, home_score: u16, away_score: u16) -> Result<(), InvalidMatch> {
        self.validate()?;
        self.home_score = home_score;
        self.away_score = away_score;
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidMatch {
    #[error("match {match_id} pits {team} against itself")]
    SameTeam { match_id: String, team: TeamId },
}
