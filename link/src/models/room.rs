use serde::{Deserialize, Serialize};

use super::{contains_ci, default_true};

/// A room as returned by the room endpoints.
///
/// `room_number` is unique system-wide; the backend enforces the
/// constraint and the client surfaces the conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(alias = "_id")]
    pub id: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Room {
    /// Substring search over room number and type (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        contains_ci(&self.room_number, query) || contains_ci(&self.room_type, query)
    }
}

/// Admin-side room creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price_per_night: f64,
    pub hotel_id: String,
}

/// Admin-side room update request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub price_per_night: f64,
    pub hotel_id: String,
}

/// Advisory availability probe result.
///
/// Non-binding: the room is not reserved, a later submission can still
/// fail with a conflict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityProbe {
    pub available: bool,
}
