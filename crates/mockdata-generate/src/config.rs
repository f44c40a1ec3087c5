//! Configuration file model.
//!
//! The file has a `[MAIN]` section with the run settings and one section per
//! dataset schema, whose keys are column names in declaration order:
//!
//! ```toml
//! [MAIN]
//! sep = "|"
//! lines = 1000
//! header = true
//! switch_locale = true
//! days_back = 30
//! locales = "en_US, fr_FR, pt_BR"
//! custom_datatypes = "amount, ts, gps_loc, text"
//! dataset = "transactions"
//!
//! [transactions]
//! customer = "name"
//! amount = "amount"
//! created_at = "ts"
//!
//! [dummy]
//! code = 8
//! label = 20
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::errors::ConfigError;
use crate::locale::Locale;

pub const MAIN_SECTION: &str = "MAIN";
pub const DUMMY_DATASET: &str = "dummy";
pub const DEFAULT_OUTPUT: &str = "data.csv";
/// Roughly a thousand years; keeps `now - days_back` inside chrono's range.
pub const MAX_DAYS_BACK: u32 = 365_000;

/// Parsed run settings plus the selected dataset schema.
#[derive(Debug, Clone)]
pub struct Config {
    pub sep: char,
    pub lines: u64,
    pub header: bool,
    pub switch_locale: bool,
    pub days_back: u32,
    pub locales: Vec<Locale>,
    pub custom_datatypes: BTreeSet<String>,
    pub dataset: DatasetSchema,
    pub seed: Option<u64>,
    pub output: PathBuf,
}

/// Ordered column specs of one dataset section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    pub fn is_dummy(&self) -> bool {
        self.name == DUMMY_DATASET
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }
}

/// A column name and its raw generator spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub spec: String,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    sep: String,
    lines: u64,
    header: bool,
    switch_locale: bool,
    days_back: u32,
    locales: ListValue,
    #[serde(default)]
    custom_datatypes: Option<ListValue>,
    dataset: String,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    output: Option<PathBuf>,
}

/// Either `"a, b"` or `["a", "b"]`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListValue {
    Joined(String),
    Items(Vec<String>),
}

impl ListValue {
    fn into_items(self) -> Vec<String> {
        let items = match self {
            ListValue::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            ListValue::Items(items) => items,
        };
        items
            .into_iter()
            .map(|item| item.chars().filter(|c| !c.is_whitespace()).collect::<String>())
            .filter(|item| !item.is_empty())
            .collect()
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let doc: toml::Table = toml::from_str(content)?;
        let main: RawMain = doc
            .get(MAIN_SECTION)
            .cloned()
            .ok_or_else(|| ConfigError::MissingSection(MAIN_SECTION.to_string()))?
            .try_into()?;

        let sep = parse_separator(&main.sep)?;

        let mut locales: Vec<Locale> = Vec::new();
        for id in main.locales.into_items() {
            let locale = Locale::parse(&id).ok_or(ConfigError::UnsupportedLocale(id))?;
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        if locales.is_empty() {
            return Err(ConfigError::invalid("locales", "at least one locale is required"));
        }

        if main.days_back > MAX_DAYS_BACK {
            return Err(ConfigError::invalid(
                "days_back",
                format!("must be at most {MAX_DAYS_BACK}, got {}", main.days_back),
            ));
        }

        let custom_datatypes = main
            .custom_datatypes
            .map(ListValue::into_items)
            .unwrap_or_default()
            .into_iter()
            .collect();

        let dataset_name = if doc.contains_key(&main.dataset) {
            main.dataset
        } else {
            if main.dataset != DUMMY_DATASET {
                warn!(
                    dataset = %main.dataset,
                    "dataset section not found, using dummy dataset"
                );
            }
            DUMMY_DATASET.to_string()
        };
        let dataset = parse_dataset(&doc, dataset_name)?;

        Ok(Self {
            sep,
            lines: main.lines,
            header: main.header,
            switch_locale: main.switch_locale,
            days_back: main.days_back,
            locales,
            custom_datatypes,
            dataset,
            seed: main.seed,
            output: main.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        })
    }

    /// Header cells, in schema order.
    pub fn header_row(&self) -> Vec<&str> {
        self.dataset.column_names()
    }
}

fn parse_separator(value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(sep), None) if sep.is_ascii() && sep != '\n' && sep != '\r' && sep != '"' => Ok(sep),
        (Some(_), None) => Err(ConfigError::invalid(
            "sep",
            format!("'{value}' cannot be used as a field separator"),
        )),
        _ => Err(ConfigError::invalid(
            "sep",
            format!("expected a single character, got '{value}'"),
        )),
    }
}

fn parse_dataset(doc: &toml::Table, name: String) -> Result<DatasetSchema, ConfigError> {
    let section = doc
        .get(&name)
        .ok_or_else(|| ConfigError::MissingSection(name.clone()))?
        .as_table()
        .ok_or_else(|| ConfigError::invalid(&name, "expected a table of columns"))?;

    let mut columns = Vec::with_capacity(section.len());
    for (column, value) in section {
        let spec = match value {
            toml::Value::String(spec) => spec.trim().to_string(),
            toml::Value::Integer(len) => len.to_string(),
            other => {
                return Err(ConfigError::invalid(
                    format!("{name}.{column}"),
                    format!("expected a string or integer, got {}", other.type_str()),
                ));
            }
        };
        columns.push(ColumnSpec {
            name: column.clone(),
            spec,
        });
    }

    Ok(DatasetSchema { name, columns })
}
