//! Column kinds that need more than a plain provider call.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use rand::{Rng, RngCore};

use crate::faker_rs::catalog;
use crate::faker_rs::locales::LocaleKey;
use crate::generators::GeneratedValue;

pub const AMOUNT_MAX: f64 = 3000.0;
pub const SHORT_TEXT_CHARS: usize = 30;

/// Custom datatypes with a built-in handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CustomKind {
    Amount,
    Ts,
    GpsLoc,
    Text,
}

impl CustomKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "amount" => Some(Self::Amount),
            "ts" => Some(Self::Ts),
            "gps_loc" => Some(Self::GpsLoc),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Ts => "ts",
            Self::GpsLoc => "gps_loc",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for CustomKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decimal in `[0, 3000]` rounded to cents.
pub fn amount(rng: &mut dyn RngCore) -> GeneratedValue {
    let raw: f64 = rng.random_range(0.0..=AMOUNT_MAX);
    GeneratedValue::Float((raw * 100.0).round() / 100.0)
}

/// Timestamp uniform in `[now - days_back, now]`, whole seconds.
pub fn timestamp_between(
    now: NaiveDateTime,
    days_back: u32,
    rng: &mut dyn RngCore,
) -> GeneratedValue {
    let start = now
        .checked_sub_signed(Duration::days(i64::from(days_back)))
        .unwrap_or(NaiveDateTime::MIN);
    let span = (now - start).num_seconds();
    let offset = rng.random_range(0..=span);
    GeneratedValue::Timestamp(start + Duration::seconds(offset))
}

/// `(lat, lon)` near the centroid of `country`, or anywhere for unknown codes.
pub fn gps_near(country: &str, rng: &mut dyn RngCore) -> GeneratedValue {
    let (lat, lon) = match centroid(country) {
        Some(area) => (
            jitter(area.lat, area.spread, rng).clamp(-90.0, 90.0),
            jitter(area.lon, area.spread, rng).clamp(-180.0, 180.0),
        ),
        None => (
            rng.random_range(-60.0..=70.0),
            rng.random_range(-180.0..=180.0),
        ),
    };
    GeneratedValue::Text(format!("({lat:.5}, {lon:.5})"))
}

pub fn short_text(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Text(catalog::text(locale, SHORT_TEXT_CHARS, rng))
}

fn jitter(center: f64, spread: f64, rng: &mut dyn RngCore) -> f64 {
    center + rng.random_range(-spread..=spread)
}

struct Centroid {
    country: &'static str,
    lat: f64,
    lon: f64,
    spread: f64,
}

const fn area(country: &'static str, lat: f64, lon: f64, spread: f64) -> Centroid {
    Centroid {
        country,
        lat,
        lon,
        spread,
    }
}

const CENTROIDS: &[Centroid] = &[
    area("US", 39.8, -98.6, 8.0),
    area("CA", 56.1, -106.3, 8.0),
    area("MX", 23.6, -102.5, 5.0),
    area("BR", -14.2, -51.9, 8.0),
    area("AR", -38.4, -63.6, 6.0),
    area("GB", 54.0, -2.5, 2.5),
    area("IE", 53.4, -8.2, 1.5),
    area("FR", 46.6, 2.2, 3.0),
    area("BE", 50.5, 4.5, 0.8),
    area("CH", 46.8, 8.2, 0.8),
    area("DE", 51.2, 10.4, 2.5),
    area("AT", 47.5, 14.6, 1.2),
    area("NL", 52.1, 5.3, 0.8),
    area("ES", 40.5, -3.7, 3.0),
    area("PT", 39.4, -8.2, 1.5),
    area("IT", 41.9, 12.6, 3.0),
    area("JP", 36.2, 138.3, 3.0),
    area("CN", 35.9, 104.2, 8.0),
    area("TW", 23.7, 121.0, 0.8),
    area("IN", 20.6, 79.0, 6.0),
    area("SA", 23.9, 45.1, 5.0),
    area("AE", 23.4, 53.8, 1.2),
    area("EG", 26.8, 30.8, 4.0),
    area("AU", -25.3, 133.8, 8.0),
    area("NZ", -40.9, 174.9, 2.5),
];

fn centroid(country: &str) -> Option<&'static Centroid> {
    CENTROIDS
        .iter()
        .find(|area| area.country.eq_ignore_ascii_case(country))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn parse_pair(value: &GeneratedValue) -> (f64, f64) {
        let text = value.as_str().expect("text value");
        let inner = text.trim_start_matches('(').trim_end_matches(')');
        let (lat, lon) = inner.split_once(", ").expect("pair");
        (lat.parse().expect("lat"), lon.parse().expect("lon"))
    }

    #[test]
    fn gps_stays_near_known_centroid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let (lat, lon) = parse_pair(&gps_near("FR", &mut rng));
            assert!((46.6 - 3.0..=46.6 + 3.0).contains(&lat), "lat {lat}");
            assert!((2.2 - 3.0..=2.2 + 3.0).contains(&lon), "lon {lon}");
        }
    }

    #[test]
    fn gps_unknown_country_is_still_a_valid_pair() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let (lat, lon) = parse_pair(&gps_near("ZZ", &mut rng));
        assert!((-90.0..=90.0).contains(&lat));
        assert!((-180.0..=180.0).contains(&lon));
    }

    #[test]
    fn timestamp_with_zero_days_is_now() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .expect("valid timestamp");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            timestamp_between(now, 0, &mut rng),
            GeneratedValue::Timestamp(now)
        );
    }

    #[test]
    fn timestamp_window_is_clamped_to_the_earliest_date() {
        let now = NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .expect("valid timestamp");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..50 {
            match timestamp_between(now, u32::MAX, &mut rng) {
                GeneratedValue::Timestamp(ts) => assert!(ts <= now),
                other => panic!("unexpected value {other:?}"),
            }
        }
    }

    #[test]
    fn amount_has_at_most_two_decimals() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let value = amount(&mut rng).render();
            let decimals = value.split_once('.').map(|(_, d)| d.len()).unwrap_or(0);
            assert!(decimals <= 2, "{value}");
        }
    }

    #[test]
    fn custom_kind_names_round_trip() {
        for kind in [
            CustomKind::Amount,
            CustomKind::Ts,
            CustomKind::GpsLoc,
            CustomKind::Text,
        ] {
            assert_eq!(CustomKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(CustomKind::parse("price"), None);
    }
}
