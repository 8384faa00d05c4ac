use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

/// Review submission for a hotel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub hotel_id: String,
    pub rating: u8,
    pub comment: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl ReviewRequest {
    /// Local validation: non-empty comment, rating within 1..=5.
    pub fn validate(&self) -> Result<()> {
        if self.comment.trim().is_empty() {
            return Err(ApiError::validation("Please enter a comment."));
        }
        if !(1..=5).contains(&self.rating) {
            return Err(ApiError::validation("Rating must be between 1 and 5."));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, comment: &str) -> ReviewRequest {
        ReviewRequest {
            hotel_id: "h1".into(),
            rating,
            comment: comment.into(),
            user_id: None,
            username: Some("alice".into()),
        }
    }

    #[test]
    fn test_comment_required() {
        assert_eq!(
            review(5, "  ").validate().unwrap_err().to_string(),
            "Please enter a comment."
        );
    }

    #[test]
    fn test_rating_bounds() {
        assert!(review(1, "ok").validate().is_ok());
        assert!(review(5, "great").validate().is_ok());
        assert!(review(0, "bad").validate().is_err());
        assert!(review(6, "too good").validate().is_err());
    }
}
