use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::RngCore;

use crate::faker_rs;
use crate::faker_rs::locales::LocaleKey;

pub mod custom;
pub mod primitives;

/// Generated value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratedValue {
    Bool(bool),
    Float(f64),
    Text(String),
    Uuid(String),
    Date(NaiveDate),
    Time(NaiveTime),
    Timestamp(NaiveDateTime),
}

impl GeneratedValue {
    /// Field text as written to the dataset.
    pub fn render(&self) -> String {
        match self {
            GeneratedValue::Bool(value) => value.to_string(),
            GeneratedValue::Float(value) => value.to_string(),
            GeneratedValue::Text(value) | GeneratedValue::Uuid(value) => value.clone(),
            GeneratedValue::Date(value) => value.format("%Y-%m-%d").to_string(),
            GeneratedValue::Time(value) => value.format("%H:%M:%S").to_string(),
            GeneratedValue::Timestamp(value) => value.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GeneratedValue::Text(value) | GeneratedValue::Uuid(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Format used for rendered timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Zero-argument generator: locale in, value out.
pub type ProviderFn = fn(LocaleKey, &mut dyn RngCore) -> GeneratedValue;

/// Static lookup of provider names to their generator functions.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<&'static str, ProviderFn>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();
        faker_rs::catalog::register(&mut registry);
        primitives::register(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self {
            providers: BTreeMap::new(),
        }
    }

    pub fn register(&mut self, id: &'static str, provider: ProviderFn) {
        self.providers.insert(id, provider);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    pub fn provider(&self, id: &str) -> Option<ProviderFn> {
        self.providers.get(id).copied()
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        self.providers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn generate(
        &self,
        id: &str,
        locale: LocaleKey,
        rng: &mut dyn RngCore,
    ) -> Option<GeneratedValue> {
        self.provider(id).map(|provider| provider(locale, rng))
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.ids())
            .finish()
    }
}
