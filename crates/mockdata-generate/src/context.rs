use chrono::NaiveDateTime;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::Config;
use crate::errors::{ConfigError, GenerationError};
use crate::locale::{Locale, LocaleRotator, RotationMode};
use crate::model::GenerationReport;
use crate::output::csv::Dataset;

/// Mutable state of one generation run.
///
/// `rng` drives row-level draws (seeds, amounts, letters, locale picks);
/// `field_rng` feeds providers and is reseeded from `rng` within a small
/// range, so nearby rows repeat values.
#[derive(Debug)]
pub struct GenerationContext {
    pub(crate) rng: ChaCha8Rng,
    pub(crate) field_rng: ChaCha8Rng,
    pub(crate) locales: LocaleRotator,
    pub(crate) days_back: u32,
    pub(crate) now: NaiveDateTime,
    pub(crate) dataset: Dataset,
    pub(crate) report: GenerationReport,
}

impl GenerationContext {
    pub fn new(
        config: &Config,
        now: NaiveDateTime,
        report: GenerationReport,
    ) -> Result<Self, GenerationError> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        let mode = if config.switch_locale {
            RotationMode::Rotating
        } else {
            RotationMode::Fixed
        };
        let locales = LocaleRotator::new(config.locales.clone(), mode, &mut rng)
            .ok_or_else(|| ConfigError::invalid("locales", "at least one locale is required"))?;

        Ok(Self {
            rng,
            field_rng: ChaCha8Rng::seed_from_u64(0),
            locales,
            days_back: config.days_back,
            now,
            dataset: Dataset::new(config.sep),
            report,
        })
    }

    pub fn active_locale(&self) -> &Locale {
        self.locales.active()
    }

    /// Applies locale rotation for row `index`.
    pub fn on_row(&mut self, index: u64) -> bool {
        let switched = self.locales.on_row(index, &mut self.rng);
        let locale = self.locales.active().id().to_string();
        self.report.record_locale_usage(&locale);
        switched
    }

    /// Replaces the provider RNG with one seeded from `0..=bound`.
    pub(crate) fn reseed_fields(&mut self, bound: u64) {
        let seed = self.rng.random_range(0..=bound);
        self.field_rng = ChaCha8Rng::seed_from_u64(seed);
    }

    pub(crate) fn into_parts(self) -> (Dataset, GenerationReport, u64) {
        let switches = self.locales.switches();
        (self.dataset, self.report, switches)
    }
}
