//! The set of teams entered in a league, guarding against duplicate ids and names.

use thiserror::Error;
use tracing::debug;

use crate::domain::{Team, TeamId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("team name must not be blank")]
    BlankName,

    #[error("team id {0} is already registered")]
    DuplicateId(TeamId),

    #[error("a team named '{0}' already exists")]
    DuplicateName(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    teams: Vec<Team>,
}
impl Roster {
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn get(&self, id: &TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| &team.id == id)
    }

    /// Adds a team. Names are trimmed and compared case-insensitively against existing entries.
    pub fn register(&mut self, id: impl Into<TeamId>, name: &str) -> Result<&Team, RosterError> {
        let id = id.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::BlankName);
        }
        if self.get(&id).is_some() {
            return Err(RosterError::DuplicateId(id));
        }
        let lowercase = name.to_lowercase();
        if self.teams.iter().any(|team| team.name.to_lowercase() == lowercase) {
            return Err(RosterError::DuplicateName(name.into()));
        }

        debug!("registered team {id} as '{name}'");
        self.teams.push(Team::new(id, name));
        Ok(&self.teams[self.teams.len() - 1])
    }

    pub fn remove(&mut self, id: &TeamId) -> Option<Team> {
        let index = self.teams.iter().position(|team| &team.id == id)?;
        Some(self.teams.remove(index))
    }
}

impl TryFrom<Vec<Team>> for Roster {
    type Error = RosterError;

    fn try_from(teams: Vec<Team>) -> Result<Self, Self::Error> {
        let mut roster = Roster::default();
        for team in teams {
            let season_id = team.season_id;
            roster.register(team.id, &team.name)?;
            if let Some(last) = roster.teams.last_mut() {
                last.season_id = season_id;
            }
        }
        Ok(roster)
    }
}
