use std::fs;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveDateTime};

use mockdata_generate::errors::GenerationError;
use mockdata_generate::{Config, GenerationEngine};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn dummy_config(lines: u64, header: bool, out: &PathBuf) -> Config {
    let content = format!(
        r#"
[MAIN]
sep = "|"
lines = {lines}
header = {header}
switch_locale = false
days_back = 30
locales = "en_US"
custom_datatypes = "amount, ts, gps_loc, text"
dataset = "dummy"
output = "{}"

[dummy]
a = 5
b = 3
"#,
        out.display()
    );
    Config::from_toml_str(&content).expect("parse dummy config")
}

fn transactions_config(lines: u64, extra_main: &str, extra_columns: &str) -> Config {
    let content = format!(
        r#"
[MAIN]
sep = ","
lines = {lines}
header = true
switch_locale = true
days_back = 10
locales = "en_US, fr_FR, pt_BR"
custom_datatypes = "amount, ts, gps_loc, text"
dataset = "transactions"
{extra_main}

[transactions]
customer = "name"
address = "address"
amount = "amount"
created_at = "ts"
location = "gps_loc"
note = "text"
mystery = "not_a_provider"
{extra_columns}
"#
    );
    Config::from_toml_str(&content).expect("parse transactions config")
}

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .and_then(|date| date.and_hms_opt(10, 30, 0))
        .expect("valid timestamp")
}

fn read_records(text: &str, delimiter: u8) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());
    let header = reader
        .headers()
        .expect("header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (header, rows)
}

#[test]
fn dummy_dataset_matches_configured_lengths() {
    let out = temp_out_dir("dummy").join("data.csv");
    let config = dummy_config(3, true, &out);

    let engine = GenerationEngine::default();
    let result = engine.run(&config).expect("run generation");
    assert_eq!(result.output, out);

    let content = fs::read_to_string(&out).expect("read data.csv");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "a|b");

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split('|').collect();
        assert_eq!(fields.len(), 2, "line {line}");
        assert_eq!(fields[0].len(), 5);
        assert_eq!(fields[1].len(), 3);
        assert!(
            fields
                .iter()
                .all(|field| field.chars().all(|c| c.is_ascii_alphabetic()))
        );
    }
    assert!(!content.ends_with('\n'));
}

#[test]
fn row_counts_hold_with_and_without_header() {
    let engine = GenerationEngine::default();
    for (lines, header) in [(0, true), (0, false), (1, false), (57, true)] {
        let out = temp_out_dir("rows").join("data.csv");
        let config = dummy_config(lines, header, &out);
        let result = engine.run(&config).expect("run generation");
        assert_eq!(result.report.rows_generated, lines);

        let content = fs::read_to_string(&out).expect("read data.csv");
        let expected = lines as usize + usize::from(header);
        assert_eq!(content.lines().count(), expected, "lines={lines} header={header}");
    }
}

#[test]
fn seeded_dummy_runs_are_identical() {
    let engine = GenerationEngine::default();
    let out_a = temp_out_dir("seed_a").join("data.csv");
    let out_b = temp_out_dir("seed_b").join("data.csv");

    let mut config_a = dummy_config(40, true, &out_a);
    config_a.seed = Some(42);
    let mut config_b = dummy_config(40, true, &out_b);
    config_b.seed = Some(42);

    engine.run(&config_a).expect("run A");
    engine.run(&config_b).expect("run B");

    let a = fs::read_to_string(&out_a).expect("read A");
    let b = fs::read_to_string(&out_b).expect("read B");
    assert_eq!(a, b, "seeded dummy output should be deterministic");
}

#[test]
fn fake_rows_have_one_field_per_column() {
    let config = transactions_config(250, "seed = 5", "");
    let engine = GenerationEngine::default();
    let generated = engine
        .generate_at(&config, fixed_now())
        .expect("generate dataset");

    let (header, rows) = read_records(&generated.dataset.to_text(), b',');
    assert_eq!(
        header,
        vec![
            "customer",
            "address",
            "amount",
            "created_at",
            "location",
            "note",
            "mystery"
        ]
    );
    assert_eq!(rows.len(), 250);
    for row in &rows {
        assert_eq!(row.len(), 7);
        assert!(row.iter().all(|field| !field.contains('\n')));
        assert!(!row[0].is_empty());
    }
}

#[test]
fn amounts_stay_within_bounds() {
    let config = transactions_config(300, "", "");
    let engine = GenerationEngine::default();
    let generated = engine
        .generate_at(&config, fixed_now())
        .expect("generate dataset");

    let (_, rows) = read_records(&generated.dataset.to_text(), b',');
    for row in rows {
        let amount: f64 = row[2].parse().expect("amount is a decimal");
        assert!((0.0..=3000.0).contains(&amount), "amount {amount}");
    }
}

#[test]
fn timestamps_fall_inside_the_days_back_window() {
    let now = fixed_now();
    let config = transactions_config(300, "", "");
    let engine = GenerationEngine::default();
    let generated = engine
        .generate_at(&config, now)
        .expect("generate dataset");

    let earliest = now - Duration::days(10);
    let (_, rows) = read_records(&generated.dataset.to_text(), b',');
    for row in rows {
        let ts = NaiveDateTime::parse_from_str(&row[3], TS_FORMAT).expect("timestamp");
        assert!(ts >= earliest && ts <= now, "timestamp {ts}");
    }
}

#[test]
fn unexpected_custom_type_aborts_without_output() {
    let out = temp_out_dir("abort").join("data.csv");
    let mut config = transactions_config(5, "", "price = \"price\"");
    config.custom_datatypes.insert("price".to_string());
    config.output = out.clone();

    let engine = GenerationEngine::default();
    let result = engine.run(&config);

    match result {
        Err(GenerationError::UnexpectedColumnType(name)) => assert_eq!(name, "price"),
        other => panic!("expected unexpected column type, got {other:?}"),
    }
    assert!(!out.exists(), "no output file should be written");
}

#[test]
fn report_counts_fallbacks_and_usage() {
    let config = transactions_config(120, "seed = 3", "");
    let engine = GenerationEngine::default();
    let generated = engine
        .generate_at(&config, fixed_now())
        .expect("generate dataset");

    let report = generated.report;
    assert_eq!(report.dataset, "transactions");
    assert_eq!(report.rows_requested, 120);
    assert_eq!(report.rows_generated, 120);
    assert_eq!(report.fallback_count, 1);
    assert_eq!(report.generator_usage.get("amount"), Some(&120));
    assert_eq!(report.generator_usage.get("fallback"), Some(&120));
    assert_eq!(report.generator_usage.get("name"), Some(&120));
    assert_eq!(report.locale_usage.values().sum::<u64>(), 120);
}

#[test]
fn rotation_switches_locale_every_hundred_rows() {
    let config = transactions_config(300, "seed = 8", "");
    let engine = GenerationEngine::default();
    let generated = engine
        .generate_at(&config, fixed_now())
        .expect("generate dataset");

    assert_eq!(generated.report.locale_switches, 3);
    assert!(generated.report.locale_usage.len() >= 2);
}

#[test]
fn fixed_locale_never_switches() {
    let mut config = transactions_config(300, "seed = 8", "");
    config.switch_locale = false;
    let engine = GenerationEngine::default();
    let generated = engine
        .generate_at(&config, fixed_now())
        .expect("generate dataset");

    assert_eq!(generated.report.locale_switches, 0);
    assert_eq!(generated.report.locale_usage.len(), 1);
}

#[test]
fn missing_dataset_section_uses_dummy() {
    let content = r#"
[MAIN]
sep = ";"
lines = 2
header = true
switch_locale = false
days_back = 1
locales = "en_US"
dataset = "orders"

[dummy]
code = 4
"#;
    let config = Config::from_toml_str(content).expect("parse config");
    assert!(config.dataset.is_dummy());

    let engine = GenerationEngine::default();
    let generated = engine.generate(&config).expect("generate dataset");
    let lines = generated.dataset.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "code");
    assert!(lines[1..].iter().all(|line| line.len() == 4));
}

#[test]
fn fallback_columns_use_short_text_when_text_is_custom() {
    let config = transactions_config(120, "seed = 8", "");
    let generated = GenerationEngine::default()
        .generate_at(&config, fixed_now())
        .expect("generate dataset");

    let (_, rows) = read_records(&generated.dataset.to_text(), b',');
    for row in rows {
        assert!(!row[6].is_empty());
        assert!(row[6].chars().count() <= 30, "mystery {}", row[6]);
    }
    assert_eq!(generated.report.generator_usage.get("fallback"), Some(&120));
}

#[test]
fn widest_days_back_window_generates_timestamps() {
    let mut config = transactions_config(150, "seed = 13", "");
    config.days_back = 365_000;
    let now = fixed_now();
    let generated = GenerationEngine::default()
        .generate_at(&config, now)
        .expect("generate dataset");

    let earliest = now - Duration::days(365_000);
    let (_, rows) = read_records(&generated.dataset.to_text(), b',');
    for row in rows {
        let ts = NaiveDateTime::parse_from_str(&row[3], TS_FORMAT).expect("timestamp format");
        assert!(ts >= earliest && ts <= now, "ts {ts}");
    }
}

fn temp_out_dir(label: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "mockdata_generate_{label}_{}",
        uuid::Uuid::new_v4()
    ));
    fs::create_dir_all(&dir).expect("create temp out dir");
    dir
}
