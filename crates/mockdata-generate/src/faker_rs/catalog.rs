use std::ops::Range;

use fake::Fake;
use fake::faker::address::raw as address;
use fake::faker::barcode::raw as barcode;
use fake::faker::company::raw as company;
use fake::faker::creditcard::raw as creditcard;
use fake::faker::currency::raw as currency;
use fake::faker::filesystem::raw as filesystem;
use fake::faker::internet::raw as internet;
use fake::faker::job::raw as job;
use fake::faker::lorem::raw as lorem;
use fake::faker::name::raw as name;
use fake::faker::phone_number::raw as phone;
use rand::RngCore;

use crate::faker_rs::locales::{LocaleKey, localized};
use crate::generators::{GeneratedValue, ProviderRegistry};

/// Upper bound used by the `text` provider.
pub const DEFAULT_TEXT_CHARS: usize = 200;
/// Below this size `text` is built from words instead of sentences.
const WORD_TEXT_THRESHOLD: usize = 25;
const MAX_TEXT_ATTEMPTS: usize = 16;
const SENTENCE_WORDS: Range<usize> = 3..7;

macro_rules! faker_provider {
    ($fn_name:ident, $faker:path) => {
        fn $fn_name(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
            let value = localized!(locale, |l| $faker(l).fake_with_rng::<String, _>(rng));
            GeneratedValue::Text(value)
        }
    };
}

faker_provider!(first_name, name::FirstName);
faker_provider!(last_name, name::LastName);
faker_provider!(full_name, name::Name);
faker_provider!(prefix, name::Title);
faker_provider!(suffix, name::Suffix);
faker_provider!(street_name, address::StreetName);
faker_provider!(building_number, address::BuildingNumber);
faker_provider!(city, address::CityName);
faker_provider!(state, address::StateName);
faker_provider!(state_abbr, address::StateAbbr);
faker_provider!(country, address::CountryName);
faker_provider!(country_code, address::CountryCode);
faker_provider!(postcode, address::PostCode);
faker_provider!(zipcode, address::ZipCode);
faker_provider!(company_name, company::CompanyName);
faker_provider!(company_suffix, company::CompanySuffix);
faker_provider!(bs, company::Bs);
faker_provider!(industry, company::Industry);
faker_provider!(job_title, job::Title);
faker_provider!(safe_email, internet::SafeEmail);
faker_provider!(free_email, internet::FreeEmail);
faker_provider!(user_name, internet::Username);
faker_provider!(ipv4, internet::IPv4);
faker_provider!(ipv6, internet::IPv6);
faker_provider!(mac_address, internet::MACAddress);
faker_provider!(user_agent, internet::UserAgent);
faker_provider!(domain_suffix, internet::DomainSuffix);
faker_provider!(phone_number, phone::PhoneNumber);
faker_provider!(cell_phone, phone::CellNumber);
faker_provider!(word, lorem::Word);
faker_provider!(currency_code, currency::CurrencyCode);
faker_provider!(currency_name, currency::CurrencyName);
faker_provider!(credit_card_number, creditcard::CreditCardNumber);
faker_provider!(file_name, filesystem::FileName);
faker_provider!(file_extension, filesystem::FileExtension);
faker_provider!(isbn10, barcode::Isbn10);
faker_provider!(isbn13, barcode::Isbn13);

pub fn register(registry: &mut ProviderRegistry) {
    registry.register("first_name", first_name);
    registry.register("last_name", last_name);
    registry.register("name", full_name);
    registry.register("prefix", prefix);
    registry.register("suffix", suffix);
    registry.register("address", full_address);
    registry.register("street_address", street_address);
    registry.register("street_name", street_name);
    registry.register("building_number", building_number);
    registry.register("city", city);
    registry.register("state", state);
    registry.register("state_abbr", state_abbr);
    registry.register("country", country);
    registry.register("country_code", country_code);
    registry.register("postcode", postcode);
    registry.register("zipcode", zipcode);
    registry.register("company", company_name);
    registry.register("company_suffix", company_suffix);
    registry.register("bs", bs);
    registry.register("industry", industry);
    registry.register("job", job_title);
    registry.register("email", safe_email);
    registry.register("safe_email", safe_email);
    registry.register("free_email", free_email);
    registry.register("user_name", user_name);
    registry.register("ipv4", ipv4);
    registry.register("ipv6", ipv6);
    registry.register("mac_address", mac_address);
    registry.register("user_agent", user_agent);
    registry.register("domain_suffix", domain_suffix);
    registry.register("phone_number", phone_number);
    registry.register("cell_phone", cell_phone);
    registry.register("word", word);
    registry.register("sentence", sentence_provider);
    registry.register("paragraph", paragraph);
    registry.register("text", text_provider);
    registry.register("currency_code", currency_code);
    registry.register("currency_name", currency_name);
    registry.register("credit_card_number", credit_card_number);
    registry.register("file_name", file_name);
    registry.register("file_extension", file_extension);
    registry.register("isbn10", isbn10);
    registry.register("isbn13", isbn13);
}

fn street_address(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Text(street_line(locale, rng))
}

/// Two-line postal address; the row generator flattens the line break.
fn full_address(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    let street = street_line(locale, rng);
    let (city, state, zip) = localized!(locale, |l| {
        (
            address::CityName(l).fake_with_rng::<String, _>(rng),
            address::StateAbbr(l).fake_with_rng::<String, _>(rng),
            address::ZipCode(l).fake_with_rng::<String, _>(rng),
        )
    });
    GeneratedValue::Text(format!("{street}\n{city}, {state} {zip}"))
}

fn street_line(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
    localized!(locale, |l| {
        let number = address::BuildingNumber(l).fake_with_rng::<String, _>(rng);
        let street = address::StreetName(l).fake_with_rng::<String, _>(rng);
        format!("{number} {street}")
    })
}

fn sentence_provider(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Text(sentence(locale, rng))
}

fn paragraph(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    let value = localized!(locale, |l| lorem::Paragraph(l, 3..6)
        .fake_with_rng::<String, _>(rng));
    GeneratedValue::Text(value)
}

fn text_provider(locale: LocaleKey, rng: &mut dyn RngCore) -> GeneratedValue {
    GeneratedValue::Text(text(locale, DEFAULT_TEXT_CHARS, rng))
}

pub fn sentence(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
    localized!(locale, |l| lorem::Sentence(l, SENTENCE_WORDS)
        .fake_with_rng::<String, _>(rng))
}

fn lorem_word(locale: LocaleKey, rng: &mut dyn RngCore) -> String {
    localized!(locale, |l| lorem::Word(l).fake_with_rng::<String, _>(rng))
}

/// Free text of at most `max_chars` characters.
///
/// Pieces (sentences, or words for short limits) are appended until the
/// limit is reached and the overflowing piece is dropped. When every attempt
/// overflows on its first piece, a truncated sentence is returned instead.
pub fn text(locale: LocaleKey, max_chars: usize, rng: &mut dyn RngCore) -> String {
    let max_chars = max_chars.max(1);
    let use_words = max_chars < WORD_TEXT_THRESHOLD;

    for _ in 0..MAX_TEXT_ATTEMPTS {
        let mut pieces: Vec<String> = Vec::new();
        let mut size = 0;
        while size < max_chars {
            let piece = if use_words {
                lorem_word(locale, rng)
            } else {
                sentence(locale, rng)
            };
            size += piece.chars().count() + usize::from(!pieces.is_empty());
            pieces.push(piece);
        }
        pieces.pop();
        if pieces.is_empty() {
            continue;
        }

        let mut value = pieces.join(" ");
        if use_words {
            value = capitalize(&value);
            value.push('.');
        }
        return value;
    }

    sentence(locale, rng).chars().take(max_chars).collect()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
