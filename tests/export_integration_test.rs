//! Integration tests for multi-sink export

use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use ticker_export::adapters::sink::SinkKind;
use ticker_export::config::{secret_string, ExportConfig, FileSinkConfig, PostgresSinkConfig};
use ticker_export::core::export::ExportDispatcher;
use ticker_export::domain::{Dataset, Record};

fn dataset() -> Dataset {
    Dataset::from_records(vec![
        Record::try_from(json!({
            "ticker": "A",
            "name": "Agilent Technologies Inc.",
            "active": true,
            "last_updated_utc": "2025-09-18 06:05:34.656751435"
        }))
        .unwrap(),
        Record::try_from(json!({
            "ticker": "AA",
            "name": "Alcoa Corporation",
            "active": true,
            "cik": "0001675149",
            "last_updated_utc": "2025-09-18 06:05:34.656751435"
        }))
        .unwrap(),
        Record::try_from(json!({
            "ticker": "AAA",
            "name": "Alternative Access First Priority CLO Bond ETF",
            "active": true
        }))
        .unwrap(),
    ])
}

fn enabled(dir: &Path) -> FileSinkConfig {
    FileSinkConfig {
        enabled: true,
        ..FileSinkConfig::new(dir)
    }
}

fn unreachable_postgres() -> PostgresSinkConfig {
    PostgresSinkConfig {
        enabled: true,
        user: Some("etl".to_string()),
        password: Some(secret_string("secret".to_string())),
        host: Some("127.0.0.1".to_string()),
        port: Some("1".to_string()),
        database: Some("markets".to_string()),
        connect_timeout_seconds: 2,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_csv_name_skips_existing_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("ticker_list.csv"), "old").unwrap();
    fs::write(temp.path().join("ticker_list1.csv"), "older").unwrap();

    let config = ExportConfig {
        csv: enabled(temp.path()),
        ..Default::default()
    };
    let summary = ExportDispatcher::from_config(&config).export(&dataset()).await;

    assert!(summary.is_successful());
    let expected = temp.path().join("ticker_list2.csv");
    assert_eq!(summary.outcomes[0].target, expected.display().to_string());
    assert!(expected.exists());
    assert_eq!(fs::read_to_string(temp.path().join("ticker_list.csv")).unwrap(), "old");
    assert_eq!(fs::read_to_string(temp.path().join("ticker_list1.csv")).unwrap(), "older");
}

#[tokio::test]
async fn test_csv_in_empty_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports").join("csv");

    let config = ExportConfig {
        csv: enabled(&dir),
        ..Default::default()
    };
    let summary = ExportDispatcher::from_config(&config).export(&dataset()).await;

    assert!(summary.is_successful());
    let path = dir.join("ticker_list.csv");
    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "ticker,name,active,last_updated_utc,cik");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "AAA,Alternative Access First Priority CLO Bond ETF,true,,");
}

#[tokio::test]
async fn test_csv_written_when_postgres_unreachable() {
    let temp = TempDir::new().unwrap();

    let config = ExportConfig {
        csv: enabled(temp.path()),
        postgres: unreachable_postgres(),
        ..Default::default()
    };
    let summary = ExportDispatcher::from_config(&config).export(&dataset()).await;

    assert_eq!(summary.outcomes.len(), 2);
    assert!(!summary.is_successful());

    let csv = &summary.outcomes[0];
    assert_eq!(csv.kind, SinkKind::Csv);
    assert!(csv.is_success());
    assert_eq!(csv.rows, 3);
    let contents = fs::read_to_string(temp.path().join("ticker_list.csv")).unwrap();
    assert_eq!(contents.lines().count(), 4);

    let pg = &summary.outcomes[1];
    assert_eq!(pg.kind, SinkKind::Postgres);
    assert!(!pg.is_success());
    assert!(!pg.error.as_deref().unwrap().contains("secret"));
}

#[tokio::test]
async fn test_incomplete_postgres_does_not_block_files() {
    let temp = TempDir::new().unwrap();

    let config = ExportConfig {
        json: enabled(temp.path()),
        postgres: PostgresSinkConfig {
            enabled: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let summary = ExportDispatcher::from_config(&config).export(&dataset()).await;

    assert!(summary.outcomes[0].is_success());
    let pg_error = summary.outcomes[1].error.as_deref().unwrap();
    assert!(pg_error.contains("POSTGRES_USER"));
    assert!(temp.path().join("ticker_list.json").exists());
}

#[tokio::test]
async fn test_all_file_sinks() {
    let temp = TempDir::new().unwrap();
    let config = ExportConfig {
        csv: enabled(&temp.path().join("csv")),
        json: enabled(&temp.path().join("json")),
        excel: enabled(&temp.path().join("excel")),
        ..Default::default()
    };

    let summary = ExportDispatcher::from_config(&config).export(&dataset()).await;

    assert!(summary.is_successful());
    let kinds: Vec<SinkKind> = summary.outcomes.iter().map(|o| o.kind).collect();
    assert_eq!(kinds, vec![SinkKind::Csv, SinkKind::Json, SinkKind::Excel]);

    let json: Value =
        serde_json::from_str(&fs::read_to_string(temp.path().join("json/ticker_list.json")).unwrap())
            .unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["ticker"], "A");
    assert_eq!(rows[0]["cik"], Value::Null);
    assert_eq!(rows[1]["cik"], "0001675149");

    let xlsx = fs::read(temp.path().join("excel/ticker_list.xlsx")).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}

#[tokio::test]
async fn test_repeated_runs_never_overwrite() {
    let temp = TempDir::new().unwrap();
    let config = ExportConfig {
        csv: enabled(temp.path()),
        json: enabled(temp.path()),
        ..Default::default()
    };
    let dispatcher = ExportDispatcher::from_config(&config);

    dispatcher.export(&dataset()).await;
    let second = dispatcher.export(&dataset()).await;

    assert!(second.is_successful());
    for name in ["ticker_list.csv", "ticker_list1.csv", "ticker_list.json", "ticker_list1.json"] {
        assert!(temp.path().join(name).exists(), "{name} missing");
    }
}

#[tokio::test]
async fn test_custom_base_name() {
    let temp = TempDir::new().unwrap();
    let config = ExportConfig {
        csv: FileSinkConfig {
            enabled: true,
            name: "nasdaq".to_string(),
            dir: Some(temp.path().to_path_buf()),
        },
        ..Default::default()
    };

    ExportDispatcher::from_config(&config).export(&dataset()).await;

    assert!(temp.path().join("nasdaq.csv").exists());
}
