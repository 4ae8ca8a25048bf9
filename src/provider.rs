//! Fake-value provider.
//!
//! Wraps the `fake` crate behind a seeded RNG so a run is reproducible, and
//! layers the guarantees the generators need on top: session-unique emails,
//! single-line addresses, bounded date sampling, and URL-safe slugs.

use std::collections::HashSet;

use anyhow::{bail, Result};
use chrono::{Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime};
use fake::faker::address::en::{CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Attempts before unique-email fabrication gives up.
const EMAIL_ATTEMPTS: usize = 100;

/// Seeded source of realistic scalar values.
pub struct ValueProvider {
    rng: StdRng,
    seen_emails: HashSet<String>,
}

impl ValueProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seen_emails: HashSet::new(),
        }
    }

    pub fn username(&mut self) -> String {
        Username().fake_with_rng(&mut self.rng)
    }

    /// Email unique within this provider session. A numeric suffix widens the
    /// space; if every attempt still collides the run aborts.
    pub fn unique_email(&mut self) -> Result<String> {
        for _ in 0..EMAIL_ATTEMPTS {
            let base: String = SafeEmail().fake_with_rng(&mut self.rng);
            let num: u32 = self.rng.random_range(1..1000);
            let candidate = match base.split_once('@') {
                Some((local, domain)) => format!("{local}{num}@{domain}"),
                None => base,
            };
            if self.seen_emails.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        bail!("exhausted unique email pool after {EMAIL_ATTEMPTS} attempts");
    }

    pub fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    pub fn country(&mut self) -> String {
        CountryName().fake_with_rng(&mut self.rng)
    }

    pub fn company(&mut self) -> String {
        CompanyName().fake_with_rng(&mut self.rng)
    }

    /// Single-line street address.
    pub fn address(&mut self) -> String {
        let number: u32 = self.rng.random_range(1..999);
        let street: String = StreetName().fake_with_rng(&mut self.rng);
        let city: String = CityName().fake_with_rng(&mut self.rng);
        let state: String = StateName().fake_with_rng(&mut self.rng);
        let zip: String = ZipCode().fake_with_rng(&mut self.rng);
        format!("{} {}, {}, {} {}", number, street, city, state, zip)
    }

    pub fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        Sentence(min_words..max_words).fake_with_rng(&mut self.rng)
    }

    pub fn ipv4(&mut self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.rng.random_range(1..255),
            self.rng.random_range(0..255),
            self.rng.random_range(0..255),
            self.rng.random_range(1..255)
        )
    }

    pub fn image_url(&mut self) -> String {
        format!(
            "https://picsum.photos/{}/{}",
            self.rng.random_range(200..800),
            self.rng.random_range(200..800)
        )
    }

    /// Uniform integer in `[lo, hi]`.
    pub fn number_between(&mut self, lo: i64, hi: i64) -> i64 {
        self.rng.random_range(lo..=hi)
    }

    pub fn hex_string(&mut self, len: usize) -> String {
        const HEX: &[u8] = b"0123456789abcdef";
        (0..len)
            .map(|_| HEX[self.rng.random_range(0..HEX.len())] as char)
            .collect()
    }

    pub fn letters(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| self.rng.random_range(b'a'..=b'z') as char)
            .collect()
    }

    /// Pick a random element from a non-empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.rng.random_range(0..items.len())]
    }

    /// Uniform date in `[from, to]`. Caller keeps `from <= to`.
    pub fn date_between(&mut self, from: NaiveDate, to: NaiveDate) -> NaiveDate {
        let span = (to - from).num_days().max(0);
        from + Duration::days(self.rng.random_range(0..=span))
    }

    pub fn date_of_birth(&mut self, min_age: u32, max_age: u32) -> NaiveDate {
        let today = Local::now().date_naive();
        let youngest = today - Months::new(12 * min_age);
        let oldest = today - Months::new(12 * max_age);
        self.date_between(oldest, youngest)
    }

    /// Timestamp between January 1 of the current year and now.
    pub fn datetime_this_year(&mut self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        let start = NaiveDate::from_ymd_opt(now.year(), 1, 1)
            .expect("january 1 is a valid date")
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time");
        let span = (now - start).num_seconds().max(1);
        start + Duration::seconds(self.rng.random_range(0..span))
    }
}

/// URL-safe slug: lowercase ASCII alphanumerics with `-` separators,
/// non-alphanumeric runs collapsed, no leading or trailing separator.
pub fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('-');
            }
            pending_sep = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_and_lowercases() {
        assert_eq!(slug("Hello World"), "hello-world");
        assert_eq!(slug("user_name.42"), "user-name-42");
        assert_eq!(slug("  --Weird__input--  "), "weird-input");
        assert_eq!(slug("déjà"), "dj");
    }

    #[test]
    fn same_seed_same_values() {
        let mut a = ValueProvider::new(42);
        let mut b = ValueProvider::new(42);
        assert_eq!(a.username(), b.username());
        assert_eq!(a.city(), b.city());
        assert_eq!(a.number_between(0, 100), b.number_between(0, 100));
    }

    #[test]
    fn emails_are_unique_across_a_session() {
        let mut provider = ValueProvider::new(42);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let email = provider.unique_email().unwrap();
            assert!(email.contains('@'));
            assert!(seen.insert(email));
        }
    }

    #[test]
    fn date_between_respects_bounds() {
        let mut provider = ValueProvider::new(42);
        let from = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        for _ in 0..100 {
            let d = provider.date_between(from, to);
            assert!(d >= from && d <= to);
        }
        // Degenerate range is allowed.
        assert_eq!(provider.date_between(from, from), from);
    }

    #[test]
    fn hex_and_letters_use_expected_alphabets() {
        let mut provider = ValueProvider::new(42);
        let hex = provider.hex_string(22);
        assert_eq!(hex.len(), 22);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));

        let letters = provider.letters(8);
        assert_eq!(letters.len(), 8);
        assert!(letters.chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn birthday_lands_in_the_age_window() {
        let mut provider = ValueProvider::new(42);
        let today = Local::now().date_naive();
        for _ in 0..50 {
            let birthday = provider.date_of_birth(18, 55);
            assert!(birthday <= today - Months::new(12 * 18));
            assert!(birthday >= today - Months::new(12 * 55));
        }
    }
}
