//! Booking endpoints: submission, listing, cancellation and invoices.

use chrono::NaiveDate;

use crate::{
    client::ApiClient,
    dates::BookingDates,
    error::Result,
    models::{Booking, BookingReceipt, BookingRequest},
};

impl ApiClient {
    /// Submit a booking for a room.
    ///
    /// Local validation runs first (both dates present, check-in not in
    /// the past relative to `today`, check-out strictly after check-in);
    /// no request is made until every rule passes. Conflict detection is
    /// the backend's job — its message is surfaced verbatim on failure.
    pub async fn submit_booking(
        &self,
        room_id: &str,
        dates: BookingDates,
        today: NaiveDate,
    ) -> Result<BookingReceipt> {
        let range = dates.validate(today)?;
        let request = BookingRequest {
            room_id: room_id.to_string(),
            from_date: range.from,
            to_date: range.to,
        };
        self.transport.post_json("/bookings/add", &request).await
    }

    /// Bookings belonging to a user
    pub async fn my_bookings(&self, user_id: &str) -> Result<Vec<Booking>> {
        self.transport
            .get_json(&format!("/bookings/{}", user_id), &[])
            .await
    }

    /// All bookings (admin)
    pub async fn all_bookings(&self) -> Result<Vec<Booking>> {
        self.transport.get_json("/bookings/allbooking", &[]).await
    }

    /// Bookings for one room, used for the availability calendar
    pub async fn bookings_for_room(&self, room_id: &str) -> Result<Vec<Booking>> {
        self.transport
            .get_json(&format!("/bookings/room/{}", room_id), &[])
            .await
    }

    /// Cancel a booking (status transition; the record remains)
    pub async fn cancel_booking(&self, booking_id: &str) -> Result<()> {
        self.transport
            .put_unit(
                &format!("/bookings/cancelstatus/{}", booking_id),
                &serde_json::json!({}),
            )
            .await
    }

    /// Delete a booking outright (admin)
    pub async fn delete_booking(&self, booking_id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/bookings/delete/{}", booking_id))
            .await
    }

    /// Download the PDF invoice for a booking
    pub async fn booking_invoice(&self, booking_id: &str) -> Result<Vec<u8>> {
        self.transport
            .get_bytes(&format!("/bookings/invoice/{}", booking_id))
            .await
    }
}

/// Client-side booking list filtering (case-insensitive substring over
/// booking number, username and hotel name). Keeps arrival order.
pub fn filter_bookings(bookings: Vec<Booking>, query: &str) -> Vec<Booking> {
    if query.trim().is_empty() {
        return bookings;
    }
    bookings.into_iter().filter(|b| b.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    /// Invalid dates must be rejected before any request is issued: a
    /// client pointed at an unroutable address still fails with the
    /// validation message, not a network error.
    #[tokio::test]
    async fn test_submit_booking_rejects_locally_without_network() {
        let client = ApiClient::builder()
            .base_url("http://192.0.2.1:9/api")
            .max_retries(0)
            .build()
            .unwrap();

        let dates = BookingDates::new(Some(d(2025, 1, 10)), Some(d(2025, 1, 9)));
        let err = client
            .submit_booking("room1", dates, d(2025, 1, 1))
            .await
            .unwrap_err();

        match err {
            ApiError::Validation(msg) => {
                assert_eq!(msg, "Check-out date must be after check-in date!");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_booking_rejects_past_checkin_locally() {
        let client = ApiClient::builder()
            .base_url("http://192.0.2.1:9/api")
            .max_retries(0)
            .build()
            .unwrap();

        let dates = BookingDates::new(Some(d(2025, 1, 1)), Some(d(2025, 1, 5)));
        let err = client
            .submit_booking("room1", dates, d(2025, 6, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }
}
