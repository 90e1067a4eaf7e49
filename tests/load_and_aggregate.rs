//! Integration tests for the load -> clean -> aggregate workflow.
//!
//! Each test writes a small `athlete_events.csv` into a temp directory and
//! drives the public API the way the dashboard does.

use olympics_dashboard::data::columns::{AGE, HEIGHT, MEDAL, NOC, WEIGHT};
use olympics_dashboard::data::NO_MEDAL;
use olympics_dashboard::query::{AggregationEngine, QueryError, QueryFilter, YearCount};
use olympics_dashboard::{DataLoader, LoaderError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str =
    r#""ID","Name","Sex","Age","Height","Weight","Team","NOC","Games","Year","Season","City","Sport","Event","Medal""#;

/// Temp directory holding one dataset file.
struct Dataset {
    _dir: TempDir,
    path: PathBuf,
}

impl Dataset {
    fn new(header: &str, rows: &[&str]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("athlete_events.csv");
        let mut content = String::from(header);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        content.push('\n');
        fs::write(&path, content).expect("Failed to write dataset");
        Self { _dir: dir, path }
    }

    fn athletes(rows: &[&str]) -> Self {
        Self::new(HEADER, rows)
    }
}

const SAMPLE: [&str; 6] = [
    r#"1,"A Dijiang","M",24,180,80,"China","CHN","1992 Summer",1992,"Summer","Barcelona","Basketball","Basketball Men's Basketball",NA"#,
    r#"2,"A Lamusi","M",23,170,60,"China","CHN","2012 Summer",2012,"Summer","London","Judo","Judo Men's Extra-Lightweight",NA"#,
    r#"3,"Gunnar Nielsen Aaby","M",24,NA,NA,"Denmark","DEN","1920 Summer",1920,"Summer","Antwerpen","Football","Football Men's Football",NA"#,
    r#"4,"Edgar Lindenau Aabye","M",34,NA,NA,"Denmark/Sweden","DEN","1900 Summer",1900,"Summer","Paris","Tug-Of-War","Tug-Of-War Men's Tug-Of-War","Gold""#,
    r#"5,"Christine Jacoba Aaftink","F",21,185,82,"Netherlands","NED","1988 Winter",1988,"Winter","Calgary","Speed Skating","Speed Skating Women's 500 metres",NA"#,
    r#"5,"Christine Jacoba Aaftink","F",21,185,82,"Netherlands","NED","1988 Winter",1988,"Winter","Calgary","Speed Skating","Speed Skating Women's 500 metres",NA"#,
];

#[test]
fn loads_and_cleans_sample() {
    let dataset = Dataset::athletes(&SAMPLE);
    let table = DataLoader::default().load_and_clean(&dataset.path).unwrap();

    // one exact duplicate removed
    assert_eq!(table.height(), 5);
    assert!(!table.column_names().iter().any(|c| c == NOC));

    let df = table.dataframe();
    for name in [AGE, HEIGHT, WEIGHT, MEDAL] {
        assert_eq!(df.column(name).unwrap().null_count(), 0, "{name}");
    }

    // mean over the deduplicated heights 180, 170, 185
    let means = table.imputed_means();
    assert_eq!(means.height, 178.3);
    assert_eq!(means.weight, 74.0);
    let heights: Vec<f64> = df.column(HEIGHT).unwrap().f64().unwrap().into_no_null_iter().collect();
    assert_eq!(heights, vec![180.0, 170.0, 178.3, 178.3, 185.0]);

    let medals: Vec<&str> = df.column(MEDAL).unwrap().str().unwrap().into_no_null_iter().collect();
    assert_eq!(medals, vec![NO_MEDAL, NO_MEDAL, NO_MEDAL, "Gold", NO_MEDAL]);
}

#[test]
fn loading_twice_is_identical() {
    let dataset = Dataset::athletes(&SAMPLE);
    let loader = DataLoader::default();
    let first = loader.load_and_clean(&dataset.path).unwrap();
    let second = loader.load_and_clean(&dataset.path).unwrap();

    assert!(first.dataframe().equals_missing(second.dataframe()));
    assert_eq!(first.years(), second.years());
    assert_eq!(first.sports(), second.sports());
}

#[test]
fn missing_age_imputed_from_observed_mean() {
    let dataset = Dataset::athletes(&[
        r#"1,"Ann","F",20,160,55,"Chile","CHI","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Lightweight",NA"#,
        r#"2,"Bea","F",NA,165,58,"Chile","CHI","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Middleweight",NA"#,
        r#"3,"Cat","F",24,170,61,"Chile","CHI","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Heavyweight",NA"#,
    ]);
    let table = DataLoader::default().load_and_clean(&dataset.path).unwrap();

    let ages: Vec<f64> = table
        .dataframe()
        .column(AGE)
        .unwrap()
        .f64()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(ages, vec![20.0, 22.0, 24.0]);
}

#[test]
fn missing_file_is_data_load_error() {
    let dir = TempDir::new().unwrap();
    let err = DataLoader::default()
        .load_and_clean(&dir.path().join("nope.csv"))
        .unwrap_err();
    assert!(matches!(err, LoaderError::DataLoad { .. }));
}

#[test]
fn missing_required_column_is_reported() {
    let header = r#""ID","Name","Sex","Age","Height","Weight","Team","NOC","Games","Year","Season","City","Event","Medal""#;
    let dataset = Dataset::new(
        header,
        &[r#"1,"Ann","F",20,160,55,"Chile","CHI","2000 Summer",2000,"Summer","Sydney","Judo Women's Lightweight",NA"#],
    );
    let err = DataLoader::default().load_and_clean(&dataset.path).unwrap_err();
    assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Sport"));
}

#[test]
fn non_numeric_age_is_schema_error() {
    let dataset = Dataset::athletes(&[
        r#"1,"Ann","F",20,160,55,"Chile","CHI","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Lightweight",NA"#,
        r#"2,"Bea","F",twenty,165,58,"Chile","CHI","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Middleweight",NA"#,
    ]);
    let err = DataLoader::default().load_and_clean(&dataset.path).unwrap_err();
    assert!(err.is_schema_error());
    assert!(matches!(err, LoaderError::Schema { ref column, .. } if column == AGE));
}

#[test]
fn source_without_noc_is_accepted() {
    let header = r#""ID","Name","Sex","Age","Height","Weight","Team","Games","Year","Season","City","Sport","Event","Medal""#;
    let dataset = Dataset::new(
        header,
        &[r#"1,"Ann","F",20,160,55,"Chile","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Lightweight","Bronze""#],
    );
    let table = DataLoader::default().load_and_clean(&dataset.path).unwrap();
    assert_eq!(table.height(), 1);
    assert!(!table.column_names().iter().any(|c| c == NOC));
}

#[test]
fn dashboard_queries_against_loaded_table() {
    let dataset = Dataset::athletes(&[
        r#"1,"Ann","F",20,160,55,"Japan","JPN","2000 Summer",2000,"Summer","Sydney","Judo","Judo Women's Lightweight","Gold""#,
        r#"2,"Bob","M",25,180,81,"France","FRA","2000 Summer",2000,"Summer","Sydney","Judo","Judo Men's Middleweight",NA"#,
        r#"3,"Cy","M",30,175,70,"Korea","KOR","2004 Summer",2004,"Summer","Athina","Archery","Archery Men's Individual","Silver""#,
    ]);
    let table = DataLoader::default().load_and_clean(&dataset.path).unwrap();

    let result = AggregationEngine::aggregate(&table, &QueryFilter::all().with_year(2000)).unwrap();
    assert_eq!(result.total_athletes, 2);
    assert_eq!(result.total_medals, 1);
    assert_eq!(result.total_sports, 1);
    assert_eq!(result.countries_participated, 2);
    assert_eq!(
        result.sports_per_year,
        vec![YearCount { year: 2000, count: 1 }, YearCount { year: 2004, count: 1 }]
    );
    assert_eq!(result.top_teams_by_medals.len(), 1);
    assert_eq!(result.top_teams_by_medals[0].label, "Japan");

    let err = AggregationEngine::aggregate(&table, &QueryFilter::all().with_year(1900)).unwrap_err();
    assert!(matches!(err, QueryError::InvalidFilter { .. }));

    // the bundle serializes for the JSON export
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["total_athletes"], 2);
    assert_eq!(json["age_distribution"].as_array().unwrap().len(), 30);
}
