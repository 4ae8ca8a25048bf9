//! Seed data generator for a social-events database schema.
//!
//! Fabricates referentially consistent rows for users, places, events, tags,
//! subscriptions, social accounts, and engagement records (likes,
//! participations, notifications), then writes one CSV file per table for
//! bulk loading. Identifier pools for the top-level entities are created
//! first; every dependent table samples from them, so foreign keys always
//! reference rows that exist. Like cancellations are additionally gated on
//! the acting user holding an active subscription at the chosen instant.
//!
//! # Example
//!
//! ```rust
//! use matchseed::{Counts, CsvSink, Generator};
//!
//! // Same seed, same rows.
//! let mut gen = Generator::new(42, Counts::default());
//! let data = gen.generate().unwrap();
//!
//! let sink = CsvSink::new(std::env::temp_dir().join("matchseed-demo"));
//! sink.write_all(&data).unwrap();
//! ```

pub mod generator;
pub mod ids;
pub mod provider;
pub mod social;
pub mod subscription;
pub mod table;
pub mod trace;
pub mod writer;

pub use generator::{Counts, Generator};
pub use ids::IdPool;
pub use provider::ValueProvider;
pub use social::{external_uid, EVENT_SOURCES, PROVIDERS};
pub use subscription::{Subscription, SubscriptionLedger};
pub use table::{CsvValue, GeneratedData, Row, TableData};
pub use trace::TracePayload;
pub use writer::CsvSink;
