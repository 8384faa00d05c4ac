//! Wire models for the Staybook REST API.
//!
//! All request/response structures use camelCase field names on the wire.
//! Listable entities implement [`matches`](Hotel::matches)-style substring
//! search used by the management views.

mod booking;
mod contact;
mod error_body;
mod hotel;
mod review;
mod room;
mod user;

pub use booking::{Booking, BookingHotelRef, BookingReceipt, BookingRequest, BookingStatus, BookingUserRef};
pub use contact::ContactMessage;
pub use error_body::ErrorBody;
pub use hotel::{Hotel, HotelUpdate, NewHotel};
pub use review::ReviewRequest;
pub use room::{AvailabilityProbe, NewRoom, Room, RoomUpdate};
pub use user::{LoginReply, LoginRequest, NewUser, RegisterRequest, Role, User, UserUpdate};

/// Case-insensitive substring match used by list filtering.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Grand Palace", "palace"));
        assert!(contains_ci("Grand Palace", "AND PAL"));
        assert!(contains_ci("Grand Palace", ""));
        assert!(!contains_ci("Grand Palace", "plaza"));
    }
}
