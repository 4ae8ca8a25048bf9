//! Social platform providers and synthetic external account ids.

use crate::provider::{slug, ValueProvider};

/// Exact casing of the `provider_value` enum in the target schema.
pub const PROVIDERS: &[&str] = &[
    "facebook",
    "instagram",
    "X",
    "linkedin",
    "ticketmaster",
    "snapchat",
    "tiktok",
];

/// Providers that also act as event sources.
pub const EVENT_SOURCES: &[&str] = &["facebook", "ticketmaster"];

/// Synthesize an external account id shaped like the platform's real ones.
///
/// Unknown providers fall through to a slugged username rather than failing.
pub fn external_uid(provider: &str, values: &mut ValueProvider) -> String {
    match provider {
        // 12-digit numeric id
        "facebook" => values.number_between(100_000_000_000, 999_999_999_999).to_string(),
        "instagram" | "x" | "X" | "tiktok" => {
            let name = values.username();
            slug(&name.chars().take(15).collect::<String>())
        }
        "linkedin" => format!("urn:li:person:{}", values.hex_string(22)),
        // 10-digit numeric id
        "ticketmaster" => values.number_between(1_000_000_000, 9_999_999_999).to_string(),
        "snapchat" => values.letters(8),
        _ => slug(&values.username()),
    }
}
