//! Room endpoints and the client-side availability query refinement.

use crate::{
    client::ApiClient,
    dates::DateRange,
    error::Result,
    models::{AvailabilityProbe, NewRoom, Room, RoomUpdate},
};

impl ApiClient {
    /// List all rooms
    pub async fn rooms(&self) -> Result<Vec<Room>> {
        self.transport.get_json("/rooms/all", &[]).await
    }

    /// Rooms free for the whole date range.
    ///
    /// An empty result is a normal outcome (no rooms available), distinct
    /// from a request failure.
    pub async fn available_rooms(&self, range: DateRange) -> Result<Vec<Room>> {
        self.transport
            .get_json(
                "/rooms/available",
                &[
                    ("fromDate", range.from.to_string()),
                    ("toDate", range.to.to_string()),
                ],
            )
            .await
    }

    /// Advisory availability probe for a single room.
    ///
    /// Non-binding: nothing is reserved, and a subsequent booking can
    /// still fail independently.
    pub async fn check_room_availability(
        &self,
        room_id: &str,
        range: DateRange,
    ) -> Result<AvailabilityProbe> {
        self.transport
            .post_json(
                &format!("/rooms/check-availability/{}", room_id),
                &serde_json::json!({
                    "fromDate": range.from,
                    "toDate": range.to,
                }),
            )
            .await
    }

    /// Create a room (admin). The backend enforces room-number
    /// uniqueness; a conflict surfaces as a server error.
    pub async fn add_room(&self, room: &NewRoom) -> Result<()> {
        self.transport.post_unit("/rooms/add", room).await
    }

    /// Update a room (admin)
    pub async fn update_room(&self, id: &str, update: &RoomUpdate) -> Result<()> {
        self.transport
            .put_unit(&format!("/rooms/roomUpdate/{}", id), update)
            .await
    }

    /// Delete a room (admin)
    pub async fn delete_room(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/rooms/delete/{}", id))
            .await
    }
}

/// Client-side room list filtering (case-insensitive substring over room
/// number and type). Keeps arrival order.
pub fn filter_rooms(rooms: Vec<Room>, query: &str) -> Vec<Room> {
    if query.trim().is_empty() {
        return rooms;
    }
    rooms.into_iter().filter(|r| r.matches(query)).collect()
}

/// Sort order for availability results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomSort {
    /// Ascending price per night
    PriceAsc,
    /// Descending rating; missing ratings count as zero
    RatingDesc,
}

impl RoomSort {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "price" | "lowprice" => Some(Self::PriceAsc),
            "rating" | "highrating" => Some(Self::RatingDesc),
            _ => None,
        }
    }
}

/// Client-side refinement of an availability result: optional exact
/// room-type filter, then an optional stable sort.
#[derive(Debug, Clone, Default)]
pub struct RoomQuery {
    pub room_type: Option<String>,
    pub sort: Option<RoomSort>,
}

impl RoomQuery {
    pub fn new(room_type: Option<String>, sort: Option<RoomSort>) -> Self {
        Self { room_type, sort }
    }

    /// Apply filter and sort. The sort is stable: rooms comparing equal
    /// keep their arrival order.
    pub fn apply(&self, rooms: Vec<Room>) -> Vec<Room> {
        let mut rooms: Vec<Room> = match &self.room_type {
            Some(wanted) => rooms
                .into_iter()
                .filter(|r| r.room_type.eq_ignore_ascii_case(wanted))
                .collect(),
            None => rooms,
        };

        match self.sort {
            Some(RoomSort::PriceAsc) => {
                rooms.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night));
            }
            Some(RoomSort::RatingDesc) => {
                rooms.sort_by(|a, b| {
                    b.rating
                        .unwrap_or(0.0)
                        .total_cmp(&a.rating.unwrap_or(0.0))
                });
            }
            None => {}
        }
        rooms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(number: &str, room_type: &str, price: f64, rating: Option<f64>) -> Room {
        let mut value = serde_json::json!({
            "id": number,
            "roomNumber": number,
            "type": room_type,
            "pricePerNight": price,
        });
        if let Some(r) = rating {
            value["rating"] = serde_json::json!(r);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_type_filter_matches_whole_type_ignoring_case() {
        let rooms = vec![
            room("101", "single", 900.0, None),
            room("102", "double", 1500.0, None),
            room("103", "Single", 950.0, None),
        ];
        let query = RoomQuery::new(Some("single".into()), None);
        let result = query.apply(rooms);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].room_number, "101");
        assert_eq!(result[1].room_number, "103");
    }

    #[test]
    fn test_price_sort_non_decreasing() {
        let rooms = vec![
            room("a", "single", 1500.0, None),
            room("b", "single", 900.0, None),
            room("c", "single", 1200.0, None),
        ];
        let sorted = RoomQuery::new(None, Some(RoomSort::PriceAsc)).apply(rooms);
        let prices: Vec<f64> = sorted.iter().map(|r| r.price_per_night).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_price_sort_is_stable_on_ties() {
        let rooms = vec![
            room("first", "single", 1000.0, None),
            room("second", "single", 1000.0, None),
            room("cheap", "single", 500.0, None),
            room("third", "single", 1000.0, None),
        ];
        let sorted = RoomQuery::new(None, Some(RoomSort::PriceAsc)).apply(rooms);
        let order: Vec<&str> = sorted.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(order, vec!["cheap", "first", "second", "third"]);
    }

    #[test]
    fn test_rating_sort_non_increasing_with_missing_as_zero() {
        let rooms = vec![
            room("a", "single", 1.0, Some(3.5)),
            room("b", "single", 1.0, None),
            room("c", "single", 1.0, Some(4.8)),
        ];
        let sorted = RoomQuery::new(None, Some(RoomSort::RatingDesc)).apply(rooms);
        let order: Vec<&str> = sorted.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
        let ratings: Vec<f64> = sorted.iter().map(|r| r.rating.unwrap_or(0.0)).collect();
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_no_refinement_keeps_arrival_order() {
        let rooms = vec![
            room("z", "double", 3.0, None),
            room("a", "single", 1.0, None),
        ];
        let result = RoomQuery::default().apply(rooms);
        assert_eq!(result[0].room_number, "z");
        assert_eq!(result[1].room_number, "a");
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(RoomSort::parse("price"), Some(RoomSort::PriceAsc));
        assert_eq!(RoomSort::parse("lowPrice"), Some(RoomSort::PriceAsc));
        assert_eq!(RoomSort::parse("rating"), Some(RoomSort::RatingDesc));
        assert_eq!(RoomSort::parse("stars"), None);
    }
}
