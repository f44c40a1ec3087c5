use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rand::{Rng, RngCore};

use crate::faker_rs::locales::LocaleKey;
use crate::generators::{GeneratedValue, ProviderRegistry};

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const SECONDS_PER_DAY: u32 = 86_400;
/// Span covered by the `date` and `date_time` providers, counted forward from
/// 2000-01-01.
const DATE_SPAN_DAYS: i64 = 365 * 30;

pub fn register(registry: &mut ProviderRegistry) {
    registry.register("boolean", boolean);
    registry.register("uuid4", uuid4);
    registry.register("date", date);
    registry.register("time", time);
    registry.register("date_time", date_time);
    registry.register("latitude", latitude);
    registry.register("longitude", longitude);
}

/// Random string of `len` ASCII letters, upper and lower case.
pub fn ascii_letters(len: usize, rng: &mut dyn RngCore) -> String {
    (0..len)
        .map(|_| char::from(ASCII_LETTERS[rng.random_range(0..ASCII_LETTERS.len())]))
        .collect()
}

fn boolean(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Bool(rng.random_bool(0.5))
}

fn uuid4(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    let mut bytes = [0_u8; 16];
    rng.fill_bytes(&mut bytes);
    let value = uuid::Builder::from_random_bytes(bytes).into_uuid();
    GeneratedValue::Uuid(value.to_string())
}

fn date(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Date(random_date(rng))
}

fn time(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Time(random_time(rng))
}

fn date_time(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    let date = random_date(rng);
    let time = random_time(rng);
    GeneratedValue::Timestamp(NaiveDateTime::new(date, time))
}

fn latitude(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    let value: f64 = rng.random_range(-90.0..=90.0);
    GeneratedValue::Text(format!("{value:.6}"))
}

fn longitude(_locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    let value: f64 = rng.random_range(-180.0..=180.0);
    GeneratedValue::Text(format!("{value:.6}"))
}

fn random_date(rng: &mut dyn RngCore) -> NaiveDate {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let offset = rng.random_range(0..=DATE_SPAN_DAYS);
    base + Duration::days(offset)
}

fn random_time(rng: &mut dyn RngCore) -> NaiveTime {
    let seconds = rng.random_range(0..SECONDS_PER_DAY);
    NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default()
}
