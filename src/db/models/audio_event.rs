//! Audio classification event data model.
//!
//! Written by the classifier while a night is being tracked; never updated.

use serde::{Deserialize, Serialize};

use crate::date_key::DateKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioEvent {
    pub id: i64,
    pub date_key: DateKey,
    pub label: String,
    pub score: f64,
    pub timestamp_millis: i64,
}

/// Insert input for an audio event; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAudioEvent {
    pub date_key: DateKey,
    pub label: String,
    pub score: f64,
    pub timestamp_millis: i64,
}

/// One label/score pair as reported by the classifier for a single inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub label: String,
    pub score: f64,
}
