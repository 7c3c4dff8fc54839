use chrono::{DateTime, Utc};
use ordinalizer::Ordinal;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumCount, EnumIter};

use crate::csv::Record;
use crate::display::DisplayWindow;
use crate::season::{Registration, Season};
use crate::standings::TeamStanding;

/// Columns of the league table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Ordinal, EnumCount, EnumIter, Display)]
pub enum Column {
    #[strum(to_string = "Pos")]
    Position,
    Team,
    #[strum(to_string = "Pts")]
    Points,
    #[strum(to_string = "GD")]
    GoalDifference,
    #[strum(to_string = "GF")]
    GoalsFor,
    #[strum(to_string = "GA")]
    GoalsAgainst,
    #[strum(to_string = "PL")]
    Played,
    Won,
    Drawn,
    Lost,
}

impl From<Column> for usize {
    fn from(column: Column) -> Self {
        column.ordinal()
    }
}

/// A single table row, keyed by [`Column`]. `position` is 1-based.
pub fn standing_record(position: usize, standing: &TeamStanding) -> Record {
    let mut record = Record::with_capacity(Column::COUNT);
    record.set(Column::Position, position);
    record.set(Column::Team, &standing.name);
    record.set(Column::Points, standing.points);
    record.set(Column::GoalDifference, standing.goal_difference);
    record.set(Column::GoalsFor, standing.goals_for);
    record.set(Column::GoalsAgainst, standing.goals_against);
    record.set(Column::Played, standing.played);
    record.set(Column::Won, standing.won);
    record.set(Column::Drawn, standing.drawn);
    record.set(Column::Lost, standing.lost);
    record
}

pub fn header_record() -> Record {
    Record::with_values(Column::iter())
}

pub fn tabulate(table: &[TeamStanding]) -> Table {
    let mut out = Table::default()
        .with_cols(
            Column::iter()
                .map(|column| match column {
                    Column::Team => Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
                    Column::Position => Col::new(
                        Styles::default()
                            .with(Separator(true))
                            .with(MinWidth(5))
                            .with(HAlign::Centred),
                    ),
                    _ => Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
                })
                .collect(),
        )
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            Column::iter().map(|column| column.to_string().into()).collect(),
        ));

    for (index, standing) in table.iter().enumerate() {
        let cells = standing_record(index + 1, standing)
            .into_iter()
            .map(|cell| cell.into_owned().into())
            .collect();
        out.push_row(Row::new(Styles::default(), cells));
    }
    out
}

pub fn tabulate_seasons(seasons: &[Season], now: DateTime<Utc>) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(18)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(22)).with(HAlign::Centred)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec![
                "Id".into(),
                "Season".into(),
                "Status".into(),
                "Registration".into(),
                "Open".into(),
            ],
        ));

    for season in seasons {
        let open = if season.is_registration_open(now) {
            format!("{:.0}%", season.registration_progress(now))
        } else {
            "closed".to_string()
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                season.id.clone().into(),
                season.name.clone().into(),
                season.status.to_string().into(),
                DisplayWindow::new(&season.registration_start, &season.registration_end)
                    .to_string()
                    .into(),
                open.into(),
            ],
        ));
    }
    table
}

pub fn tabulate_registrations<'a>(registrations: impl IntoIterator<Item = &'a Registration>) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(24)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Centred)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Id".into(), "Player".into(), "Email".into(), "Status".into()],
        ));
    for registration in registrations {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                registration.id.clone().into(),
                registration.player_name.clone().into(),
                registration.email.clone().into(),
                registration.status.to_string().into(),
            ],
        ));
    }
    table
}
