use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::contains_ci;

/// Lifecycle status of a booking.
///
/// Bookings are only ever mutated through status transitions (cancel) or
/// deletion; dates are never edited after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Running,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Running => "RUNNING",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to the owning user embedded in some booking payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUserRef {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Reference to the hotel embedded in some booking payloads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingHotelRef {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A booking as returned by the booking endpoints.
///
/// Hotel and user details are denormalized for display; depending on the
/// endpoint they arrive either flattened (`hotelName`, `username`) or as
/// embedded references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(alias = "_id")]
    pub id: String,
    pub booking_number: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub hotel_id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub hotel_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub user: Option<BookingUserRef>,
    #[serde(default)]
    pub hotel: Option<BookingHotelRef>,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub status: BookingStatus,
}

impl Booking {
    /// Username for display, regardless of which wire shape was used
    pub fn display_username(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .or(self.username.as_deref())
            .unwrap_or("")
    }

    /// Hotel name for display, regardless of which wire shape was used
    pub fn display_hotel_name(&self) -> &str {
        self.hotel
            .as_ref()
            .and_then(|h| h.name.as_deref())
            .or(self.hotel_name.as_deref())
            .unwrap_or("")
    }

    /// Substring search over booking number, username and hotel name
    /// (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        contains_ci(&self.booking_number, query)
            || contains_ci(self.display_username(), query)
            || contains_ci(self.display_hotel_name(), query)
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == BookingStatus::Cancelled
    }
}

/// Booking submission payload.
///
/// The user is identified server-side from the request credential, so only
/// the room and the validated date range travel on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub room_id: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

/// Response to a successful booking submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub booking_number: Option<String>,
}

impl BookingReceipt {
    /// The confirmation message to show, with the standard fallback
    pub fn confirmation(&self) -> &str {
        self.message.as_deref().unwrap_or("Room booked successfully!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(json: &str) -> Booking {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_status_wire_values() {
        for (status, wire) in [
            (BookingStatus::Pending, "\"PENDING\""),
            (BookingStatus::Confirmed, "\"CONFIRMED\""),
            (BookingStatus::Running, "\"RUNNING\""),
            (BookingStatus::Completed, "\"COMPLETED\""),
            (BookingStatus::Cancelled, "\"CANCELLED\""),
        ] {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let parsed: BookingStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_flattened_wire_shape() {
        let booking = sample(
            r#"{
                "id": "b1",
                "bookingNumber": "BK-1001",
                "hotelName": "Grand Palace",
                "username": "alice",
                "roomNumber": "101",
                "fromDate": "2025-03-01",
                "toDate": "2025-03-04",
                "status": "CONFIRMED"
            }"#,
        );
        assert_eq!(booking.display_username(), "alice");
        assert_eq!(booking.display_hotel_name(), "Grand Palace");
        assert_eq!(
            booking.from_date,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_embedded_wire_shape() {
        let booking = sample(
            r#"{
                "_id": "b2",
                "bookingNumber": "BK-1002",
                "user": {"_id": "u1", "username": "bob"},
                "hotel": {"_id": "h1", "name": "Sea View"},
                "fromDate": "2025-05-10",
                "toDate": "2025-05-12",
                "status": "PENDING"
            }"#,
        );
        assert_eq!(booking.display_username(), "bob");
        assert_eq!(booking.display_hotel_name(), "Sea View");
    }

    #[test]
    fn test_matches_booking_fields() {
        let booking = sample(
            r#"{
                "id": "b1",
                "bookingNumber": "BK-1001",
                "hotelName": "Grand Palace",
                "username": "Alice",
                "fromDate": "2025-03-01",
                "toDate": "2025-03-04",
                "status": "CONFIRMED"
            }"#,
        );
        assert!(booking.matches("bk-10"));
        assert!(booking.matches("alice"));
        assert!(booking.matches("PALACE"));
        assert!(!booking.matches("bob"));
    }

    #[test]
    fn test_receipt_fallback_message() {
        let receipt = BookingReceipt::default();
        assert_eq!(receipt.confirmation(), "Room booked successfully!");

        let receipt: BookingReceipt =
            serde_json::from_str(r#"{"message": "Booked, see you soon"}"#).unwrap();
        assert_eq!(receipt.confirmation(), "Booked, see you soon");
    }
}
