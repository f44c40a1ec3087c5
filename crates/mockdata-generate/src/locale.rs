use rand::{Rng, RngCore};
use tracing::debug;

use crate::faker_rs::locales::LocaleKey;

/// Rows generated between two locale draws when rotation is enabled.
pub const ROTATION_BLOCK: u64 = 100;

/// A configured locale identifier resolved to a data set and a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    id: String,
    key: LocaleKey,
    country: String,
}

impl Locale {
    /// Resolves `xx_YY` identifiers. Unknown regions of a supported language
    /// reuse that language's data set and keep their own country code.
    pub fn parse(id: &str) -> Option<Self> {
        let (language, country) = id.split_once('_').unwrap_or((id, ""));
        let key = LocaleKey::parse(id).or_else(|| LocaleKey::for_language(language))?;
        Some(Self {
            id: id.to_string(),
            key,
            country: country.to_ascii_uppercase(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> LocaleKey {
        self.key
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    Fixed,
    Rotating,
}

/// Picks the active locale, optionally redrawing it every [`ROTATION_BLOCK`] rows.
#[derive(Debug, Clone)]
pub struct LocaleRotator {
    locales: Vec<Locale>,
    mode: RotationMode,
    current: usize,
    switches: u64,
}

impl LocaleRotator {
    /// Returns `None` for an empty locale list. The starting locale is drawn
    /// at random in both modes.
    pub fn new(locales: Vec<Locale>, mode: RotationMode, rng: &mut dyn RngCore) -> Option<Self> {
        if locales.is_empty() {
            return None;
        }
        let current = rng.random_range(0..locales.len());
        Some(Self {
            locales,
            mode,
            current,
            switches: 0,
        })
    }

    pub fn active(&self) -> &Locale {
        &self.locales[self.current]
    }

    /// Number of times the active locale actually changed.
    pub fn switches(&self) -> u64 {
        self.switches
    }

    /// Called before row `index` is generated. Returns true when the active
    /// locale changed.
    pub fn on_row(&mut self, index: u64, rng: &mut dyn RngCore) -> bool {
        if self.mode != RotationMode::Rotating || index % ROTATION_BLOCK != 0 {
            return false;
        }

        let previous = self.current;
        self.current = self.draw_other(rng);
        if self.locales[self.current].id == self.locales[previous].id {
            return false;
        }

        self.switches += 1;
        debug!(
            row = index,
            from = %self.locales[previous].id,
            to = %self.active().id,
            country = %self.active().country,
            "locale switched"
        );
        true
    }

    /// Uniform draw among the locales other than the current one.
    fn draw_other(&self, rng: &mut dyn RngCore) -> usize {
        if self.locales.len() == 1 {
            return self.current;
        }
        let pick = rng.random_range(0..self.locales.len() - 1);
        if pick >= self.current { pick + 1 } else { pick }
    }
}
