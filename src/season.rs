//! Seasons and season registrations.
//!
//! A season moves `registration_open → active → ended → archived`. Each step is a status write
//! plus the timestamp it stamps; there is no rollback.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use thiserror::Error;
use tracing::info;

use crate::domain::{MatchResult, Team};

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SeasonStatus {
    RegistrationOpen,
    Active,
    Ended,
    Archived,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RegistrationStatus {
    Registered,
    Approved,
    Rejected,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeasonError {
    #[error("registration window ends ({end}) before it starts ({start})")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("cannot move season from {from} to {to}")]
    InvalidTransition { from: SeasonStatus, to: SeasonStatus },

    #[error("registration for season {0} is closed")]
    RegistrationClosed(String),

    #[error("cannot move registration from {from} to {to}")]
    InvalidRegistrationTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: SeasonStatus,
    pub registration_start: DateTime<Utc>,
    pub registration_end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_end: Option<DateTime<Utc>>,
}
impl Season {
    /// Creates a season accepting registrations between `registration_start` and
    /// `registration_end`. The season is provisionally due to start when registration closes.
    pub fn open(
        id: impl Into<String>,
        name: impl Into<String>,
        registration_start: DateTime<Utc>,
        registration_end: DateTime<Utc>,
    ) -> Result<Self, SeasonError> {
        if registration_end < registration_start {
            return Err(SeasonError::InvalidWindow {
                start: registration_start,
                end: registration_end,
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: SeasonStatus::RegistrationOpen,
            registration_start,
            registration_end,
            season_start: Some(registration_end),
            season_end: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), SeasonError> {
        self.transition(SeasonStatus::RegistrationOpen, SeasonStatus::Active)?;
        self.season_start = Some(now);
        Ok(())
    }

    pub fn end(&mut self, now: DateTime<Utc>) -> Result<(), SeasonError> {
        self.transition(SeasonStatus::Active, SeasonStatus::Ended)?;
        self.season_end = Some(now);
        Ok(())
    }

    pub fn archive(&mut self) -> Result<(), SeasonError> {
        self.transition(SeasonStatus::Ended, SeasonStatus::Archived)
    }

    fn transition(&mut self, from: SeasonStatus, to: SeasonStatus) -> Result<(), SeasonError> {
        if self.status != from {
            return Err(SeasonError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        info!("season {} ({}): {from} -> {to}", self.id, self.name);
        self.status = to;
        Ok(())
    }

    pub fn is_registration_open(&self, now: DateTime<Utc>) -> bool {
        self.status == SeasonStatus::RegistrationOpen
            && self.registration_start <= now
            && now <= self.registration_end
    }

    /// Elapsed share of the registration window, as a percentage in `0..=100`.
    pub fn registration_progress(&self, now: DateTime<Utc>) -> f64 {
        let total = (self.registration_end - self.registration_start).num_milliseconds();
        if total <= 0 {
            return if now >= self.registration_end { 100.0 } else { 0.0 };
        }
        let elapsed = (now - self.registration_start).num_milliseconds();
        (elapsed as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Time left before registration closes; `None` once the window has elapsed.
    pub fn registration_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        let remaining = self.registration_end - now;
        if remaining > Duration::zero() {
            Some(remaining)
        } else {
            None
        }
    }

    pub fn register(
        &self,
        id: impl Into<String>,
        player_name: impl Into<String>,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Registration, SeasonError> {
        if !self.is_registration_open(now) {
            return Err(SeasonError::RegistrationClosed(self.id.clone()));
        }
        Ok(Registration {
            id: id.into(),
            season_id: self.id.clone(),
            player_name: player_name.into(),
            email: email.into(),
            status: RegistrationStatus::Registered,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: String,
    pub season_id: String,
    pub player_name: String,
    pub email: String,
    pub status: RegistrationStatus,
}
impl Registration {
    pub fn approve(&mut self) -> Result<(), SeasonError> {
        self.decide(RegistrationStatus::Approved)
    }

    pub fn reject(&mut self) -> Result<(), SeasonError> {
        self.decide(RegistrationStatus::Rejected)
    }

    fn decide(&mut self, to: RegistrationStatus) -> Result<(), SeasonError> {
        if self.status != RegistrationStatus::Registered {
            return Err(SeasonError::InvalidRegistrationTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

pub fn by_id<'a>(seasons: &'a [Season], id: &str) -> Option<&'a Season> {
    seasons.iter().find(|season| season.id == id)
}

/// The first season in play.
pub fn current_season(seasons: &[Season]) -> Option<&Season> {
    seasons.iter().find(|season| season.status == SeasonStatus::Active)
}

pub fn season_open_for_registration(seasons: &[Season]) -> Option<&Season> {
    seasons
        .iter()
        .find(|season| season.status == SeasonStatus::RegistrationOpen)
}

pub fn registrations_for<'a>(
    registrations: &'a [Registration],
    season_id: &'a str,
) -> impl Iterator<Item = &'a Registration> + 'a {
    registrations
        .iter()
        .filter(move |registration| registration.season_id == season_id)
}

/// Removes the season with the given `id` together with its registrations, returning the removed
/// season. Nothing is touched when no such season exists.
pub fn remove(
    seasons: &mut Vec<Season>,
    registrations: &mut Vec<Registration>,
    id: &str,
) -> Option<Season> {
    let index = seasons.iter().position(|season| season.id == id)?;
    let season = seasons.remove(index);
    let before = registrations.len();
    registrations.retain(|registration| registration.season_id != id);
    info!(
        "removed season {} and {} registration(s)",
        season.id,
        before - registrations.len()
    );
    Some(season)
}

/// Narrows teams and matches to a single season. With no season given, everything is kept.
pub fn scope(
    teams: &[Team],
    matches: &[MatchResult],
    season_id: Option<&str>,
) -> (Vec<Team>, Vec<MatchResult>) {
    match season_id {
        None => (teams.to_vec(), matches.to_vec()),
        Some(season_id) => (
            teams
                .iter()
                .filter(|team| team.season_id.as_deref() == Some(season_id))
                .cloned()
                .collect(),
            matches
                .iter()
                .filter(|result| result.season_id.as_deref() == Some(season_id))
                .cloned()
                .collect(),
        ),
    }
}
