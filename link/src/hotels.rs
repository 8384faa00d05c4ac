//! Hotel endpoints: catalogue, detail, search, admin CRUD and reviews.

use crate::{
    client::ApiClient,
    error::Result,
    models::{Hotel, HotelUpdate, NewHotel, ReviewRequest, Room},
};

impl ApiClient {
    /// List all hotels
    pub async fn hotels(&self) -> Result<Vec<Hotel>> {
        self.transport.get_json("/hotels/all", &[]).await
    }

    /// Fetch one hotel by id. A missing id is a page-level
    /// [`NotFound`](crate::ApiError::NotFound) error.
    pub async fn hotel(&self, id: &str) -> Result<Hotel> {
        self.transport
            .get_json(&format!("/hotels/{}", id), &[])
            .await
    }

    /// Rooms belonging to a hotel
    pub async fn rooms_by_hotel(&self, hotel_id: &str) -> Result<Vec<Room>> {
        self.transport
            .get_json(&format!("/rooms/hotel/{}", hotel_id), &[])
            .await
    }

    /// Server-side hotel search by name/location
    pub async fn search_hotels(&self, query: &str) -> Result<Vec<Hotel>> {
        self.transport
            .get_json("/hotels/search", &[("query", query.to_string())])
            .await
    }

    /// Create a hotel (admin)
    pub async fn add_hotel(&self, hotel: &NewHotel) -> Result<()> {
        self.transport.post_unit("/hotels/add", hotel).await
    }

    /// Update a hotel (admin)
    pub async fn update_hotel(&self, id: &str, update: &HotelUpdate) -> Result<()> {
        self.transport
            .put_unit(&format!("/hotels/update/{}", id), update)
            .await
    }

    /// Delete a hotel (admin)
    pub async fn delete_hotel(&self, id: &str) -> Result<()> {
        self.transport
            .delete(&format!("/hotels/delete/{}", id))
            .await
    }

    /// Submit a review for a hotel.
    ///
    /// Local validation (non-empty comment, rating bounds) runs first.
    pub async fn add_review(&self, review: &ReviewRequest) -> Result<()> {
        review.validate()?;
        self.transport.post_unit("/reviews/add", review).await
    }
}

/// Client-side hotel list filtering (case-insensitive substring over
/// name, location and hotel number). Keeps arrival order.
pub fn filter_hotels(hotels: Vec<Hotel>, query: &str) -> Vec<Hotel> {
    if query.trim().is_empty() {
        return hotels;
    }
    hotels.into_iter().filter(|h| h.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hotel(name: &str, location: &str) -> Hotel {
        serde_json::from_value(serde_json::json!({
            "id": name,
            "name": name,
            "location": location,
            "pricePerNight": 1000.0,
        }))
        .unwrap()
    }

    #[test]
    fn test_filter_hotels_substring() {
        let hotels = vec![
            hotel("Grand Palace", "Mumbai"),
            hotel("Palace Inn", "Delhi"),
            hotel("Sea View", "Goa"),
        ];
        let filtered = filter_hotels(hotels, "palace");
        assert_eq!(filtered.len(), 2);
        // Arrival order preserved
        assert_eq!(filtered[0].name, "Grand Palace");
        assert_eq!(filtered[1].name, "Palace Inn");
    }

    #[test]
    fn test_filter_hotels_by_location() {
        let hotels = vec![hotel("Grand Palace", "Mumbai"), hotel("Sea View", "Goa")];
        let filtered = filter_hotels(hotels, "GOA");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Sea View");
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let hotels = vec![hotel("A", "X"), hotel("B", "Y")];
        assert_eq!(filter_hotels(hotels, "  ").len(), 2);
    }
}
