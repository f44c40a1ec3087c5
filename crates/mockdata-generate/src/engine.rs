use std::path::PathBuf;
use std::time::Instant;

use chrono::{NaiveDateTime, Timelike, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::context::GenerationContext;
use crate::errors::GenerationError;
use crate::generators::ProviderRegistry;
use crate::model::GenerationReport;
use crate::output::csv::{Dataset, write_dataset};
use crate::row::RowGenerator;
use crate::template::Template;

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output: PathBuf,
    pub report: GenerationReport,
}

/// Dataset held in memory, not yet written.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub dataset: Dataset,
    pub report: GenerationReport,
}

/// Entry point for generating a dataset from a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    registry: ProviderRegistry,
}

impl GenerationEngine {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Generates the dataset and writes it to `config.output`. Nothing is
    /// written when generation fails.
    pub fn run(&self, config: &Config) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let GeneratedDataset {
            dataset,
            mut report,
        } = self.generate(config)?;

        let bytes_written = write_dataset(&config.output, &dataset)?;
        info!(
            path = %config.output.display(),
            lines = dataset.len(),
            bytes = bytes_written,
            "dataset written"
        );

        report.output = Some(config.output.clone());
        report.bytes_written = bytes_written;
        report.duration_ms = start.elapsed().as_millis() as u64;

        Ok(GenerationResult {
            output: config.output.clone(),
            report,
        })
    }

    /// Builds every row in memory, anchoring timestamps to the current time.
    pub fn generate(&self, config: &Config) -> Result<GeneratedDataset, GenerationError> {
        self.generate_at(config, current_time())
    }

    /// Like [`GenerationEngine::generate`] with an explicit `now`.
    pub fn generate_at(
        &self,
        config: &Config,
        now: NaiveDateTime,
    ) -> Result<GeneratedDataset, GenerationError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        let template =
            Template::resolve(&config.dataset, &config.custom_datatypes, &self.registry)?;

        let mut report = GenerationReport::new(
            run_id.clone(),
            config.dataset.name.clone(),
            config.lines,
            config.header,
        );
        report.seed = config.seed;
        report.fallback_count = template.fallback_count() as u64;

        let mut ctx = GenerationContext::new(config, now, report)?;

        info!(
            run_id = %run_id,
            dataset = %config.dataset.name,
            columns = template.len(),
            rows = config.lines,
            switch_locale = config.switch_locale,
            locale = %ctx.active_locale().id(),
            "generation started"
        );

        if config.header {
            ctx.dataset.push_record(&config.header_row())?;
        }

        let generator = RowGenerator::new(&template, &self.registry);
        for index in 0..config.lines {
            if !template.is_dummy() {
                ctx.on_row(index);
            }
            let fields = match generator.generate(&mut ctx) {
                Ok(fields) => fields,
                Err(err) => {
                    warn!(run_id = %run_id, row = index, error = %err, "generation failed");
                    return Err(err);
                }
            };
            ctx.dataset.push_record(&fields)?;
            ctx.report.rows_generated += 1;
        }

        let (dataset, mut report, switches) = ctx.into_parts();
        report.locale_switches = switches;
        report.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            run_id = %run_id,
            rows_generated = report.rows_generated,
            locale_switches = report.locale_switches,
            duration_ms = report.duration_ms,
            "generation completed"
        );

        Ok(GeneratedDataset { dataset, report })
    }
}

fn current_time() -> NaiveDateTime {
    let now = Utc::now().naive_utc();
    now.with_nanosecond(0).unwrap_or(now)
}
