use std::env;
use std::error::Error;
use std::path::PathBuf;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use standings::data;
use standings::print::{tabulate_registrations, tabulate_seasons};
use standings::season;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON league file to source the seasons from
    league: Option<PathBuf>,

    /// list the registrations for this season
    #[clap(short = 'r', long)]
    registrations: Option<String>,

    /// evaluate registration windows at this RFC 3339 instant instead of now
    #[clap(long, value_parser = parse_instant)]
    at: Option<DateTime<Utc>>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.league
            .as_ref()
            .ok_or(anyhow!("league file must be specified"))?;
        Ok(())
    }
}

fn parse_instant(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let instant = DateTime::parse_from_rfc3339(s).map_err(|err| anyhow!("invalid instant {s}: {err}"))?;
    Ok(instant.with_timezone(&Utc))
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let league = data::read_league(args.league.unwrap())?;
    let now = args.at.unwrap_or_else(Utc::now);

    println!("{}", Console::default().render(&tabulate_seasons(&league.seasons, now)));
    match season::current_season(&league.seasons) {
        None => info!("no season is currently active"),
        Some(current) => info!("current season: {} ({})", current.id, current.name),
    }
    match season::season_open_for_registration(&league.seasons) {
        None => info!("no season is open for registration"),
        Some(open) => match open.registration_remaining(now) {
            Some(remaining) if open.is_registration_open(now) => info!(
                "registration for {} closes in {}d {}h {}m",
                open.name,
                remaining.num_days(),
                remaining.num_hours() % 24,
                remaining.num_minutes() % 60
            ),
            _ => info!("{} is outside its registration window", open.name),
        },
    }

    if let Some(season_id) = args.registrations {
        let selected = season::by_id(&league.seasons, &season_id)
            .ok_or(anyhow!("no season with id {season_id}"))?;
        let registrations = season::registrations_for(&league.registrations, &selected.id);
        println!(
            "Registrations for {}:\n{}",
            selected.name,
            Console::default().render(&tabulate_registrations(registrations))
        );
    }
    Ok(())
}
