use serde::{Deserialize, Serialize};

use super::{contains_ci, default_true};

/// A hotel as returned by the hotel endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub hotel_number: Option<String>,
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Hotel {
    /// Substring search over name, location and hotel number
    /// (case-insensitive)
    pub fn matches(&self, query: &str) -> bool {
        contains_ci(&self.name, query)
            || contains_ci(&self.location, query)
            || self
                .hotel_number
                .as_deref()
                .is_some_and(|n| contains_ci(n, query))
    }
}

/// Admin-side hotel creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHotel {
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotel_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Admin-side hotel update request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelUpdate {
    pub name: String,
    pub location: String,
    pub price_per_night: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Hotel {
        serde_json::from_str(
            r#"{
                "_id": "h1",
                "hotelNumber": "HT-100",
                "name": "Grand Palace",
                "location": "Mumbai",
                "pricePerNight": 4500.0,
                "rating": 4.2
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_camel_case_wire_format() {
        let hotel = sample();
        assert_eq!(hotel.id, "h1");
        assert_eq!(hotel.price_per_night, 4500.0);
        // availability defaults to true when the backend omits it
        assert!(hotel.available);

        let json = serde_json::to_string(&hotel).unwrap();
        assert!(json.contains("\"pricePerNight\":4500.0"));
        assert!(json.contains("\"hotelNumber\":\"HT-100\""));
    }

    #[test]
    fn test_matches_across_fields() {
        let hotel = sample();
        assert!(hotel.matches("palace"));
        assert!(hotel.matches("MUM"));
        assert!(hotel.matches("ht-100"));
        assert!(!hotel.matches("goa"));
    }

    #[test]
    fn test_matches_without_hotel_number() {
        let hotel: Hotel = serde_json::from_str(
            r#"{"id": "h2", "name": "Sea View", "location": "Goa", "pricePerNight": 2000.0}"#,
        )
        .unwrap();
        assert!(hotel.matches("sea"));
        assert!(!hotel.matches("HT-"));
    }
}
