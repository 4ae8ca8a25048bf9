//! Record generators, one routine per output table.
//!
//! Follows the dependency order of the schema: identifier pools for the
//! top-level entities come first, dependent tables sample from the retained
//! pools, and the like generator consults the subscription ledger before
//! stamping a cancellation.

use anyhow::{Context, Result};
use chrono::{Duration, Local, Months, NaiveDate, NaiveDateTime};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ids::{sample_indices, IdPool};
use crate::provider::{slug, ValueProvider};
use crate::social::{external_uid, EVENT_SOURCES, PROVIDERS};
use crate::subscription::{Subscription, SubscriptionLedger};
use crate::table::{CsvValue, GeneratedData, Row, TableData};
use crate::trace::TracePayload;

/// Interest tags, one row each in `tag.csv`.
const TAG_TYPES: &[&str] = &[
    "cycling",
    "rock",
    "cinema",
    "hiking",
    "yoga",
    "coding",
    "coffee",
    "art",
    "boardgames",
    "running",
];

/// Fixed category hierarchy: two roots, four leaves referencing them.
const CATEGORIES: &[(&str, Option<i64>)] = &[
    ("Sport", None),
    ("Culture", None),
    ("Endurance", Some(1)),
    ("Music", Some(2)),
    ("Gaming", Some(2)),
    ("Wellness", Some(1)),
];

/// Leaf categories eligible for tag assignment.
const LEAF_CATEGORY_IDS: &[i64] = &[3, 4, 5, 6];

const EYE_COLORS: &[&str] = &["blue", "brown", "green", "hazel"];
const GENDERS: &[&str] = &["man", "woman"];
const ORIENTATIONS: &[&str] = &["heterosexual", "other"];
const PLACE_KINDS: &[&str] = &["Bar", "Club", "Gym", "Hall"];
const PARTICIPATION_STATUSES: &[&str] = &["interested", "going"];

const TRACE_ACTIONS: &[&str] = &["login", "logout", "profile_update", "browse"];
const TRACE_DEVICES: &[&str] = &["mobile", "desktop", "tablet"];
const TRACE_TARGET_TYPES: &[&str] = &["post", "comment", "photo"];
const TRACE_SHARED_TYPES: &[&str] = &["event", "post", "profile"];
const TRACE_REACTIONS: &[&str] = &["like", "love", "haha", "wow", "sad", "angry"];

const NOTIFICATION_TEMPLATES: &[&str] = &[
    "Your registration for {event} has been recorded.",
    "Reminder: {event} starts soon!",
    "You received a new like from another user.",
    "Your subscription was renewed successfully.",
    "A new event {event} was added near you.",
    "You were added to the waiting list for {event}.",
    "Your participation in {event} has been confirmed.",
    "{event} has been cancelled. We will keep you posted.",
    "Another user wants to connect with you.",
    "Your profile was updated successfully.",
    "You have a new message about {event}.",
    "Your friend request was accepted.",
    "Your ticket for {event} is available in your account.",
    "Reminder: {event} starts in 1 hour.",
    "You were mentioned in a discussion about {event}.",
    "Your booking for {event} was cancelled at your request.",
    "Another user commented on your participation in {event}.",
    "Your rating for {event} has been saved.",
    "An event similar to {event} might interest you.",
    "The organiser noticed your attendance at {event}.",
];

/// Rows sampled for the tag/place and tag/user join tables, clamped to the
/// pool size when counts are dialed down.
const TAG_PLACE_ROWS: usize = 10;
const TAG_USER_ROWS: usize = 50;

/// A nope draws a candidate cancellation instant with this probability; the
/// cancellation is only recorded when the subscription gate passes.
const CANCEL_CANDIDATE_P: f64 = 0.2;
/// A subscription gets an end date with this probability.
const SUBSCRIPTION_END_P: f64 = 0.7;

/// Row counts for the generated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counts {
    pub users: usize,
    pub places: usize,
    pub events: usize,
    pub notifications: usize,
    pub traces: usize,
    pub likes: usize,
    pub participations: usize,
}

impl Default for Counts {
    fn default() -> Self {
        Self {
            users: 120,
            places: 25,
            events: 40,
            notifications: 60,
            traces: 200,
            likes: 400,
            participations: 180,
        }
    }
}

/// Seeded generation context threaded through every table routine.
pub struct Generator {
    rng: ChaCha8Rng,
    values: ValueProvider,
    counts: Counts,
}

impl Generator {
    pub fn new(seed: u64, counts: Counts) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            values: ValueProvider::new(seed.wrapping_add(1)),
            counts,
        }
    }

    /// Run the single generation pass. Tables come back in load order.
    pub fn generate(&mut self) -> Result<GeneratedData> {
        let users = IdPool::new(self.counts.users);
        let places = IdPool::new(self.counts.places);
        let events = IdPool::new(self.counts.events);
        let tags = IdPool::new(TAG_TYPES.len());

        let mut tables = Vec::with_capacity(15);
        tables.push(self.generate_users(&users)?);
        tables.push(self.generate_places(&places));
        tables.push(self.generate_tags());
        tables.push(self.generate_categories());
        tables.push(self.generate_tag_categories(&tags));
        tables.push(self.generate_events(&events, &tags, &places, &users));

        let (subscription_table, subscriptions) = self.generate_subscriptions(&users);
        tables.push(subscription_table);

        let (social_table, account_ids) = self.generate_social_accounts(&users);
        tables.push(social_table);
        tables.push(self.generate_digital_traces(&account_ids)?);
        tables.push(self.generate_likes(&users, &subscriptions));
        tables.push(self.generate_participations(&users, &events));
        tables.push(self.generate_tag_event_assignments(&tags, &events));
        tables.push(self.generate_tag_place_assignments(&tags, &places));
        tables.push(self.generate_tag_user_assignments(&tags, &users));
        tables.push(self.generate_notifications(&users, &events));

        Ok(GeneratedData {
            tables,
            subscriptions,
        })
    }

    fn generate_users(&mut self, users: &IdPool) -> Result<TableData> {
        let mut rows = Vec::with_capacity(users.len());
        for &id in users.ids() {
            let pseudo = slug(&format!("{}{}", self.values.username(), id));
            let email = self
                .values
                .unique_email()
                .with_context(|| format!("user.csv: record {id}"))?;
            let weight = (self.rng.random_range(50.0..100.0_f64) * 10.0).round() / 10.0;
            rows.push(vec![
                CsvValue::Str(pseudo),
                CsvValue::Str(email),
                CsvValue::Int(self.rng.random_range(150..=200)),
                CsvValue::Float(weight),
                CsvValue::Str(self.values.pick(EYE_COLORS).to_string()),
                CsvValue::Str(self.values.city()),
                CsvValue::Str(self.values.country()),
                CsvValue::Str(self.values.pick(GENDERS).to_string()),
                CsvValue::Str(self.values.pick(ORIENTATIONS).to_string()),
                CsvValue::Str(fmt_date(self.values.date_of_birth(18, 55))),
            ]);
        }
        Ok(TableData {
            name: "user",
            columns: &[
                "pseudo",
                "email",
                "height_cm",
                "weight_kg",
                "eye_color",
                "city",
                "country",
                "gender",
                "orientation",
                "birthday",
            ],
            rows,
        })
    }

    fn generate_places(&mut self, places: &IdPool) -> TableData {
        let mut rows = Vec::with_capacity(places.len());
        for _ in places.ids() {
            let name = format!("{} {}", self.values.company(), self.values.pick(PLACE_KINDS));
            rows.push(vec![
                CsvValue::Str(name),
                CsvValue::Str(self.values.address()),
                CsvValue::Str(self.values.city()),
                CsvValue::Str(self.values.country()),
            ]);
        }
        TableData {
            name: "place",
            columns: &["name", "address", "city", "country"],
            rows,
        }
    }

    fn generate_tags(&mut self) -> TableData {
        let rows: Vec<Row> = TAG_TYPES
            .iter()
            .map(|t| vec![CsvValue::Str(t.to_string())])
            .collect();
        TableData {
            name: "tag",
            columns: &["type"],
            rows,
        }
    }

    fn generate_categories(&mut self) -> TableData {
        let rows: Vec<Row> = CATEGORIES
            .iter()
            .map(|&(name, parent)| {
                vec![
                    CsvValue::Str(name.to_string()),
                    parent.map_or(CsvValue::Null, CsvValue::Int),
                ]
            })
            .collect();
        TableData {
            name: "category",
            columns: &["name", "parent_id"],
            rows,
        }
    }

    fn generate_tag_categories(&mut self, tags: &IdPool) -> TableData {
        let mut rows = Vec::with_capacity(tags.len());
        for &tag_id in tags.ids() {
            rows.push(vec![
                CsvValue::Int(tag_id),
                CsvValue::Int(*self.values.pick(LEAF_CATEGORY_IDS)),
            ]);
        }
        TableData {
            name: "tag_category",
            columns: &["tag_id", "category_id"],
            rows,
        }
    }

    fn generate_events(
        &mut self,
        events: &IdPool,
        tags: &IdPool,
        places: &IdPool,
        users: &IdPool,
    ) -> TableData {
        let columns: &'static [&'static str] = &[
            "title",
            "description",
            "tag_id",
            "starts_at",
            "ends_at",
            "price",
            "place_id",
            "organiser_id",
            "source",
        ];
        if places.is_empty() || users.is_empty() {
            return TableData {
                name: "event",
                columns,
                rows: Vec::new(),
            };
        }

        let now = Local::now().naive_local();
        let mut rows = Vec::with_capacity(events.len());
        for &id in events.ids() {
            let starts = now
                + Duration::days(self.rng.random_range(1..=60))
                + Duration::hours(self.rng.random_range(8..=20));
            let ends = starts + Duration::hours(self.rng.random_range(2..=6));
            let price = (self.rng.random_range(0.0..40.0_f64) * 100.0).round() / 100.0;
            rows.push(vec![
                CsvValue::Str(format!("Event #{id}")),
                CsvValue::Str(self.values.sentence(8, 13)),
                CsvValue::Int(tags.pick(&mut self.rng)),
                CsvValue::Str(fmt_ts(starts)),
                CsvValue::Str(fmt_ts(ends)),
                CsvValue::Float(price),
                CsvValue::Int(places.pick(&mut self.rng)),
                CsvValue::Int(users.pick(&mut self.rng)),
                CsvValue::Str(self.values.pick(EVENT_SOURCES).to_string()),
            ]);
        }
        TableData {
            name: "event",
            columns,
            rows,
        }
    }

    /// Half of the users get one subscription each; every emitted window is
    /// also pushed onto the ledger for the cancellation gate.
    fn generate_subscriptions(&mut self, users: &IdPool) -> (TableData, SubscriptionLedger) {
        let today = Local::now().date_naive();
        let window_start = today - Months::new(24);
        let yesterday = today - Duration::days(1);

        let mut ledger = SubscriptionLedger::new();
        let mut rows = Vec::with_capacity(users.len() / 2);
        for uid in users.sample(&mut self.rng, users.len() / 2) {
            let start = self.values.date_between(window_start, yesterday);
            let end = if self.rng.random_bool(SUBSCRIPTION_END_P) {
                Some(self.values.date_between(start, start + Months::new(6)))
            } else {
                None
            };
            ledger.push(Subscription {
                user_id: uid,
                start,
                end,
            });
            rows.push(vec![
                CsvValue::Int(uid),
                CsvValue::Str(fmt_date(start)),
                end.map_or(CsvValue::Null, |e| CsvValue::Str(fmt_date(e))),
            ]);
        }
        (
            TableData {
                name: "subscription",
                columns: &["user_id", "start_date", "end_date"],
                rows,
            },
            ledger,
        )
    }

    /// Each user gets 1..=7 distinct providers. Account ids are assigned
    /// sequentially in emission order and retained for the trace generator.
    fn generate_social_accounts(&mut self, users: &IdPool) -> (TableData, Vec<i64>) {
        let mut rows = Vec::new();
        let mut account_ids = Vec::new();
        let mut next_account = 1i64;
        for &uid in users.ids() {
            let k = self.rng.random_range(1..=PROVIDERS.len());
            for idx in sample_indices(&mut self.rng, PROVIDERS.len(), k) {
                let provider = PROVIDERS[idx];
                rows.push(vec![
                    CsvValue::Int(uid),
                    CsvValue::Str(provider.to_string()),
                    CsvValue::Str(external_uid(provider, &mut self.values)),
                ]);
                account_ids.push(next_account);
                next_account += 1;
            }
        }
        (
            TableData {
                name: "social_account",
                columns: &["user_id", "provider", "external_uid"],
                rows,
            },
            account_ids,
        )
    }

    fn generate_digital_traces(&mut self, account_ids: &[i64]) -> Result<TableData> {
        let columns: &'static [&'static str] = &["sa_id", "trace_type", "ts", "payload"];
        if account_ids.is_empty() {
            return Ok(TableData {
                name: "digital_trace",
                columns,
                rows: Vec::new(),
            });
        }

        let mut rows = Vec::with_capacity(self.counts.traces);
        for i in 0..self.counts.traces {
            let sa_id = account_ids[self.rng.random_range(0..account_ids.len())];
            let payload = self.trace_payload();
            let json = payload
                .to_json()
                .with_context(|| format!("digital_trace.csv: record {i}"))?;
            rows.push(vec![
                CsvValue::Int(sa_id),
                CsvValue::Str(payload.trace_type().to_string()),
                CsvValue::Str(fmt_ts(self.values.datetime_this_year())),
                CsvValue::Str(json),
            ]);
        }
        Ok(TableData {
            name: "digital_trace",
            columns,
            rows,
        })
    }

    fn trace_payload(&mut self) -> TracePayload {
        match self.rng.random_range(0..6) {
            0 => TracePayload::Activity {
                action: self.values.pick(TRACE_ACTIONS).to_string(),
                device: self.values.pick(TRACE_DEVICES).to_string(),
                ip: self.values.ipv4(),
            },
            1 => TracePayload::Like {
                target_type: self.values.pick(TRACE_TARGET_TYPES).to_string(),
                target_id: self.values.number_between(1000, 9999),
            },
            2 => TracePayload::Post {
                content: self.values.sentence(5, 10),
                media: if self.rng.random_bool(0.5) {
                    String::new()
                } else {
                    self.values.image_url()
                },
            },
            3 => TracePayload::Comment {
                comment: self.values.sentence(5, 10),
                post_id: self.values.number_between(1000, 9999),
            },
            4 => TracePayload::Share {
                shared_type: self.values.pick(TRACE_SHARED_TYPES).to_string(),
                shared_id: self.values.number_between(1000, 9999),
            },
            _ => TracePayload::Reaction {
                reaction: self.values.pick(TRACE_REACTIONS).to_string(),
                target_id: self.values.number_between(1000, 9999),
            },
        }
    }

    fn generate_likes(&mut self, users: &IdPool, subscriptions: &SubscriptionLedger) -> TableData {
        let columns: &'static [&'static str] = &[
            "source_user_id",
            "target_user_id",
            "value",
            "created_at",
            "canceled_at",
        ];
        if users.len() < 2 {
            return TableData {
                name: "likes",
                columns,
                rows: Vec::new(),
            };
        }

        let mut rows = Vec::with_capacity(self.counts.likes);
        for _ in 0..self.counts.likes {
            let (source, target) = users.pick_pair(&mut self.rng);
            let value = if self.rng.random_bool(0.5) { "like" } else { "nope" };
            let mut canceled = CsvValue::Null;
            if value == "nope" && self.rng.random_bool(CANCEL_CANDIDATE_P) {
                // Only subscribed users may cancel a nope; mirrors the
                // database trigger on the target schema.
                let instant = self.values.datetime_this_year();
                if subscriptions.has_active_subscription(source, instant) {
                    canceled = CsvValue::Str(fmt_ts(instant));
                }
            }
            rows.push(vec![
                CsvValue::Int(source),
                CsvValue::Int(target),
                CsvValue::Str(value.to_string()),
                CsvValue::Str(fmt_ts(self.values.datetime_this_year())),
                canceled,
            ]);
        }
        TableData {
            name: "likes",
            columns,
            rows,
        }
    }

    fn generate_participations(&mut self, users: &IdPool, events: &IdPool) -> TableData {
        let columns: &'static [&'static str] = &["user_id", "event_id", "status", "created_at"];
        if users.is_empty() || events.is_empty() {
            return TableData {
                name: "participation",
                columns,
                rows: Vec::new(),
            };
        }

        let mut rows = Vec::with_capacity(self.counts.participations);
        for _ in 0..self.counts.participations {
            rows.push(vec![
                CsvValue::Int(users.pick(&mut self.rng)),
                CsvValue::Int(events.pick(&mut self.rng)),
                CsvValue::Str(self.values.pick(PARTICIPATION_STATUSES).to_string()),
                CsvValue::Str(fmt_ts(self.values.datetime_this_year())),
            ]);
        }
        TableData {
            name: "participation",
            columns,
            rows,
        }
    }

    fn generate_tag_event_assignments(&mut self, tags: &IdPool, events: &IdPool) -> TableData {
        let mut rows = Vec::with_capacity(events.len());
        for &event_id in events.ids() {
            rows.push(vec![
                CsvValue::Int(tags.pick(&mut self.rng)),
                CsvValue::Int(event_id),
            ]);
        }
        TableData {
            name: "tag_event_assignment",
            columns: &["tag_id", "event_id"],
            rows,
        }
    }

    fn generate_tag_place_assignments(&mut self, tags: &IdPool, places: &IdPool) -> TableData {
        let mut rows = Vec::with_capacity(TAG_PLACE_ROWS);
        for place_id in places.sample(&mut self.rng, TAG_PLACE_ROWS) {
            rows.push(vec![
                CsvValue::Int(tags.pick(&mut self.rng)),
                CsvValue::Int(place_id),
            ]);
        }
        TableData {
            name: "tag_place_assignment",
            columns: &["tag_id", "place_id"],
            rows,
        }
    }

    fn generate_tag_user_assignments(&mut self, tags: &IdPool, users: &IdPool) -> TableData {
        let mut rows = Vec::with_capacity(TAG_USER_ROWS);
        for user_id in users.sample(&mut self.rng, TAG_USER_ROWS) {
            rows.push(vec![
                CsvValue::Int(tags.pick(&mut self.rng)),
                CsvValue::Int(user_id),
            ]);
        }
        TableData {
            name: "tag_user_assignment",
            columns: &["tag_id", "user_id"],
            rows,
        }
    }

    /// Message labels embed a generated `Event #<id>` name; the label does
    /// not have to match an emitted event row.
    fn generate_notifications(&mut self, users: &IdPool, events: &IdPool) -> TableData {
        let columns: &'static [&'static str] = &["user_id", "message", "sent_at"];
        if users.is_empty() || events.is_empty() {
            return TableData {
                name: "notification",
                columns,
                rows: Vec::new(),
            };
        }

        let mut rows = Vec::with_capacity(self.counts.notifications);
        for _ in 0..self.counts.notifications {
            let label = format!("Event #{}", events.pick(&mut self.rng));
            let message = self
                .values
                .pick(NOTIFICATION_TEMPLATES)
                .replace("{event}", &label);
            rows.push(vec![
                CsvValue::Int(users.pick(&mut self.rng)),
                CsvValue::Str(message),
                CsvValue::Str(fmt_ts(self.values.datetime_this_year())),
            ]);
        }
        TableData {
            name: "notification",
            columns,
            rows,
        }
    }
}

fn fmt_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn fmt_ts(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
