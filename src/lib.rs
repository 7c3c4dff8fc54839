//! A deterministic league table engine for small football leagues.
//! Ranks teams by points, goal difference and goals scored from a flat list of match results,
//! and keeps the season, roster and registration bookkeeping around it.

pub mod csv;
pub mod data;
pub mod display;
pub mod domain;
pub mod file;
pub mod print;
pub mod roster;
pub mod season;
pub mod standings;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
