//! Review domain entities
//!
//! Bidirectional reviews: after a contract completes, each party may review
//! the other exactly once. Reviews carry an overall rating plus dimension
//! ratings, and other users can vote on their helpfulness.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::contract::ContractId;
use super::user::UserId;

/// Unique identifier for a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReviewId(pub Uuid);

impl ReviewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ReviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for ReviewId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ReviewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dimension ratings, each 1-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRatings {
    pub communication: i32,
    pub expertise: i32,
    pub timeliness: i32,
}

impl DimensionRatings {
    pub fn all_in_range(&self) -> bool {
        [self.communication, self.expertise, self.timeliness]
            .iter()
            .all(|r| (1..=5).contains(r))
    }
}

/// A review left by one contract party about the other
#[derive(Debug, Clone, Serialize)]
pub struct Review {
    pub id: ReviewId,
    pub contract_id: ContractId,
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    /// Overall rating 1-5
    pub rating: i32,
    pub dimensions: DimensionRatings,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Ratings of 4 or 5 count as a recommendation in the rating card
    pub fn is_recommendation(&self) -> bool {
        self.rating >= 4
    }
}

/// Data needed to create a new review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub contract_id: ContractId,
    pub reviewer_id: UserId,
    pub reviewee_id: UserId,
    pub rating: i32,
    pub dimensions: DimensionRatings,
    pub comment: String,
}

/// A helpfulness vote on a review; one per user per review
#[derive(Debug, Clone, Serialize)]
pub struct ReviewVote {
    pub review_id: ReviewId,
    pub voter_id: UserId,
    pub helpful: bool,
    pub created_at: DateTime<Utc>,
}

/// Data needed to record a vote
#[derive(Debug, Clone)]
pub struct NewReviewVote {
    pub review_id: ReviewId,
    pub voter_id: UserId,
    pub helpful: bool,
}

/// Helpful/unhelpful tallies for a review
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct VoteCounts {
    pub helpful: i64,
    pub unhelpful: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_range_check() {
        let ok = DimensionRatings {
            communication: 1,
            expertise: 5,
            timeliness: 3,
        };
        assert!(ok.all_in_range());

        let too_low = DimensionRatings {
            communication: 0,
            expertise: 3,
            timeliness: 3,
        };
        assert!(!too_low.all_in_range());

        let too_high = DimensionRatings {
            communication: 3,
            expertise: 6,
            timeliness: 3,
        };
        assert!(!too_high.all_in_range());
    }

    #[test]
    fn recommendation_threshold() {
        let mut review = Review {
            id: ReviewId::new(),
            contract_id: ContractId::new(),
            reviewer_id: UserId::new(),
            reviewee_id: UserId::new(),
            rating: 4,
            dimensions: DimensionRatings {
                communication: 4,
                expertise: 4,
                timeliness: 4,
            },
            comment: "Solid delivery".to_string(),
            created_at: Utc::now(),
        };
        assert!(review.is_recommendation());
        review.rating = 3;
        assert!(!review.is_recommendation());
    }
}
