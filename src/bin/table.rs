use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use standings::csv::CsvWriter;
use standings::data;
use standings::display::DisplaySlice;
use standings::file::write_json;
use standings::print::{header_record, standing_record, tabulate};
use standings::season;
use standings::standings::Standings;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON league file to source the teams (and optionally matches and seasons) from
    league: Option<PathBuf>,

    /// CSV file of match results, used instead of any matches in the league file
    #[clap(short = 'm', long)]
    matches: Option<PathBuf>,

    /// only count teams and matches belonging to this season
    #[clap(short = 's', long)]
    season: Option<String>,

    /// only count teams and matches belonging to the active season
    #[clap(short = 'c', long)]
    current: bool,

    /// where to write the table as CSV
    #[clap(long)]
    csv: Option<PathBuf>,

    /// where to write the table and its diagnostics as JSON
    #[clap(long)]
    json: Option<PathBuf>,

    /// fail if any match was skipped or pitted a team against itself
    #[clap(long)]
    strict: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.league
            .as_ref()
            .ok_or(anyhow!("league file must be specified"))?;
        if self.season.is_some() && self.current {
            bail!("--season and --current are mutually exclusive");
        }
        Ok(())
    }
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

    let start_time = Instant::now();
    let mut league = data::read_league(args.league.unwrap())?;
    if let Some(path) = args.matches {
        league.matches = data::read_matches_csv(path)?;
    }

    let season_id = if args.current {
        let current = season::current_season(&league.seasons)
            .ok_or(anyhow!("no season is currently active"))?;
        info!("tabulating current season {} ({})", current.id, current.name);
        Some(current.id.clone())
    } else {
        args.season
    };
    if let Some(season_id) = &season_id {
        if season::by_id(&league.seasons, season_id).is_none() {
            warn!("season {season_id} is not listed in the league file");
        }
    }

    let (teams, matches) = season::scope(&league.teams, &league.matches, season_id.as_deref());
    let standings = Standings::compute(&teams, &matches);
    let diagnostics = &standings.diagnostics;
    if !diagnostics.orphaned.is_empty() {
        warn!(
            "matches referencing unknown teams: {}",
            DisplaySlice::from(&*diagnostics.orphaned)
        );
    }
    if !diagnostics.self_referencing.is_empty() {
        warn!(
            "matches pitting a team against itself: {}",
            DisplaySlice::from(&*diagnostics.self_referencing)
        );
    }
    if args.strict && !diagnostics.is_clean() {
        return Err(anyhow!("league data failed strict checks").into());
    }

    println!("{}", Console::default().render(&tabulate(&standings.table)));

    if let Some(path) = args.csv {
        let mut csv = CsvWriter::create(&path)?;
        csv.append(header_record())?;
        for (index, standing) in standings.table.iter().enumerate() {
            csv.append(standing_record(index + 1, standing))?;
        }
        csv.flush()?;
        info!("wrote table to {}", path.display());
    }
    if let Some(path) = args.json {
        write_json(&path, &standings)?;
        info!("wrote table to {}", path.display());
    }

    let elapsed_time = start_time.elapsed();
    info!(
        "tabulated {} teams from {} matches in {}s",
        standings.table.len(),
        matches.len(),
        elapsed_time.as_millis() as f64 / 1_000.
    );
    Ok(())
}
