//! Unit tests for the CSV sink.

use matchseed::{Counts, CsvSink, CsvValue, Generator, TableData};
use tempfile::TempDir;

#[test]
fn writes_one_file_per_table_with_headers() {
    let temp_dir = TempDir::new().unwrap();
    let counts = Counts {
        users: 10,
        places: 3,
        events: 4,
        notifications: 5,
        traces: 10,
        likes: 20,
        participations: 10,
    };
    let data = Generator::new(42, counts).generate().unwrap();

    let sink = CsvSink::new(temp_dir.path());
    sink.write_all(&data).unwrap();

    for table in &data.tables {
        let path = temp_dir.path().join(format!("{}.csv", table.name));
        let content = std::fs::read_to_string(&path).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, table.columns.join(","), "header of {}", table.name);
        assert_eq!(content.lines().count(), table.rows.len() + 1);
    }
}

#[test]
fn null_round_trips_as_empty_field() {
    let temp_dir = TempDir::new().unwrap();
    let table = TableData {
        name: "subscription",
        columns: &["user_id", "start_date", "end_date"],
        rows: vec![
            vec![
                CsvValue::Int(7),
                CsvValue::Str("2023-01-01".into()),
                CsvValue::Null,
            ],
            vec![
                CsvValue::Int(8),
                CsvValue::Str("2023-01-01".into()),
                CsvValue::Str("2023-06-01".into()),
            ],
        ],
    };

    let sink = CsvSink::new(temp_dir.path());
    let path = sink.write_table(&table).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][2], "");
    assert_eq!(&records[1][2], "2023-06-01");
}

#[test]
fn fields_with_delimiters_are_quoted() {
    let temp_dir = TempDir::new().unwrap();
    let table = TableData {
        name: "notification",
        columns: &["user_id", "message", "sent_at"],
        rows: vec![vec![
            CsvValue::Int(1),
            CsvValue::Str("Reminder: Event #3, doors open at \"19:00\"".into()),
            CsvValue::Str("2025-03-01 18:00:00".into()),
        ]],
    };

    let sink = CsvSink::new(temp_dir.path());
    let path = sink.write_table(&table).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(&path)
        .unwrap();
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[1], "Reminder: Event #3, doors open at \"19:00\"");
}

#[test]
fn write_all_creates_nested_output_dir() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("out").join("csv");
    let counts = Counts {
        users: 2,
        places: 1,
        events: 1,
        notifications: 1,
        traces: 1,
        likes: 1,
        participations: 1,
    };
    let data = Generator::new(42, counts).generate().unwrap();

    let sink = CsvSink::new(&nested);
    sink.write_all(&data).unwrap();
    assert!(nested.join("user.csv").exists());
    assert!(nested.join("likes.csv").exists());
}
