use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub dataset: String,
    pub rows_requested: u64,
    pub rows_generated: u64,
    pub header: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    pub bytes_written: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub locale_switches: u64,
    /// Rows generated per locale id.
    pub locale_usage: BTreeMap<String, u64>,
    /// Columns downgraded to free text because their spec was not recognised.
    pub fallback_count: u64,
    pub generator_usage: BTreeMap<String, u64>,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, dataset: String, rows_requested: u64, header: bool) -> Self {
        Self {
            run_id,
            dataset,
            rows_requested,
            rows_generated: 0,
            header,
            output: None,
            bytes_written: 0,
            seed: None,
            locale_switches: 0,
            locale_usage: BTreeMap::new(),
            fallback_count: 0,
            generator_usage: BTreeMap::new(),
            duration_ms: 0,
        }
    }

    pub fn record_generator_usage(&mut self, id: &str) {
        *self.generator_usage.entry(id.to_string()).or_insert(0) += 1;
    }

    pub fn record_locale_usage(&mut self, locale: &str) {
        *self.locale_usage.entry(locale.to_string()).or_insert(0) += 1;
    }
}
