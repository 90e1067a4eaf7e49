//! Data module - CSV loading and cleaning

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ImputedMeans};
pub use table::CanonicalTable;

/// Column names as they appear in the source file header.
pub mod columns {
    pub const ID: &str = "ID";
    pub const NAME: &str = "Name";
    pub const SEX: &str = "Sex";
    pub const AGE: &str = "Age";
    pub const HEIGHT: &str = "Height";
    pub const WEIGHT: &str = "Weight";
    pub const TEAM: &str = "Team";
    pub const NOC: &str = "NOC";
    pub const GAMES: &str = "Games";
    pub const YEAR: &str = "Year";
    pub const SEASON: &str = "Season";
    pub const CITY: &str = "City";
    pub const SPORT: &str = "Sport";
    pub const EVENT: &str = "Event";
    pub const MEDAL: &str = "Medal";

    /// Columns mean-imputed during cleaning.
    pub const MEASUREMENTS: [&str; 3] = [AGE, HEIGHT, WEIGHT];

    /// Columns kept as text in the canonical table.
    pub const TEXT: [&str; 10] = [NAME, SEX, TEAM, GAMES, SEASON, CITY, SPORT, EVENT, MEDAL, NOC];

    /// Every column the source must provide. `NOC` is optional.
    pub const REQUIRED: [&str; 14] = [
        ID, NAME, SEX, AGE, HEIGHT, WEIGHT, TEAM, GAMES, YEAR, SEASON, CITY, SPORT, EVENT, MEDAL,
    ];
}

/// Sentinel stored in `Medal` for entries that won nothing.
pub const NO_MEDAL: &str = "No medal";

#[cfg(test)]
pub(crate) mod fixtures {
    //! Raw frames for tests, shaped like rows of `athlete_events.csv`.

    use super::columns::*;
    use polars::prelude::*;

    #[derive(Clone)]
    pub struct RawRow {
        pub id: i64,
        pub sex: &'static str,
        pub age: Option<f64>,
        pub height: Option<f64>,
        pub weight: Option<f64>,
        pub team: &'static str,
        pub year: i64,
        pub sport: &'static str,
        pub medal: Option<&'static str>,
    }

    impl RawRow {
        pub fn new(id: i64, year: i64, sport: &'static str, medal: Option<&'static str>) -> Self {
            Self {
                id,
                sex: "M",
                age: Some(24.0),
                height: Some(180.0),
                weight: Some(75.0),
                team: "Norway",
                year,
                sport,
                medal,
            }
        }

        pub fn sex(mut self, sex: &'static str) -> Self {
            self.sex = sex;
            self
        }

        pub fn age(mut self, age: Option<f64>) -> Self {
            self.age = age;
            self
        }

        pub fn team(mut self, team: &'static str) -> Self {
            self.team = team;
            self
        }

        pub fn body(mut self, height: Option<f64>, weight: Option<f64>) -> Self {
            self.height = height;
            self.weight = weight;
            self
        }
    }

    fn text(rows: &[RawRow], f: impl Fn(&RawRow) -> String) -> Vec<String> {
        rows.iter().map(f).collect()
    }

    /// Build a raw frame (including `NOC`) from rows.
    pub fn raw_frame(rows: &[RawRow]) -> DataFrame {
        DataFrame::new(vec![
            Column::new(ID.into(), rows.iter().map(|r| r.id).collect::<Vec<_>>()),
            Column::new(NAME.into(), text(rows, |r| format!("Athlete {}", r.id))),
            Column::new(SEX.into(), text(rows, |r| r.sex.to_string())),
            Column::new(AGE.into(), rows.iter().map(|r| r.age).collect::<Vec<_>>()),
            Column::new(HEIGHT.into(), rows.iter().map(|r| r.height).collect::<Vec<_>>()),
            Column::new(WEIGHT.into(), rows.iter().map(|r| r.weight).collect::<Vec<_>>()),
            Column::new(TEAM.into(), text(rows, |r| r.team.to_string())),
            Column::new(NOC.into(), text(rows, |r| r.team[..3].to_uppercase())),
            Column::new(GAMES.into(), text(rows, |r| format!("{} Summer", r.year))),
            Column::new(YEAR.into(), rows.iter().map(|r| r.year).collect::<Vec<_>>()),
            Column::new(SEASON.into(), text(rows, |_| "Summer".to_string())),
            Column::new(CITY.into(), text(rows, |_| "Sydney".to_string())),
            Column::new(SPORT.into(), text(rows, |r| r.sport.to_string())),
            Column::new(EVENT.into(), text(rows, |r| format!("{} Men's Open", r.sport))),
            Column::new(
                MEDAL.into(),
                rows.iter().map(|r| r.medal).collect::<Vec<Option<&str>>>(),
            ),
        ])
        .expect("fixture columns have equal length")
    }
}
