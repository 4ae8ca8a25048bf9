//! Digital-trace payloads.
//!
//! Each trace row carries a `trace_type` discriminator and a JSON payload
//! whose keys depend on the type. The payload is a tagged union so rendering
//! stays exhaustive if a type is added.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TracePayload {
    Activity {
        action: String,
        device: String,
        ip: String,
    },
    Like {
        target_type: String,
        target_id: i64,
    },
    Post {
        content: String,
        media: String,
    },
    Comment {
        comment: String,
        post_id: i64,
    },
    Share {
        shared_type: String,
        shared_id: i64,
    },
    Reaction {
        reaction: String,
        target_id: i64,
    },
}

impl TracePayload {
    /// Discriminator written to the `trace_type` column.
    pub fn trace_type(&self) -> &'static str {
        match self {
            TracePayload::Activity { .. } => "activity",
            TracePayload::Like { .. } => "like",
            TracePayload::Post { .. } => "post",
            TracePayload::Comment { .. } => "comment",
            TracePayload::Share { .. } => "share",
            TracePayload::Reaction { .. } => "reaction",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
