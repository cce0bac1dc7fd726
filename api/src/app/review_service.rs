//! Review service
//!
//! Bidirectional reviews after contract completion: each party reviews the
//! other at most once per contract. Other users vote on review helpfulness,
//! one vote per user, never on reviews they wrote or received.

use std::sync::Arc;

use crate::app::review_analytics::{self, RatingCard};
use crate::app::PageParams;
use crate::domain::entities::{
    Contract, ContractStatus, DimensionRatings, NewReview, NewReviewVote, Review, ReviewId,
    User, UserId, VoteCounts,
};
use crate::domain::ports::{ContractRepository, ReviewRepository};
use crate::error::{AppError, DomainError, FieldError};

/// Input for writing a review
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub contract_id: crate::domain::entities::ContractId,
    pub rating: i32,
    pub dimensions: DimensionRatings,
    pub comment: String,
}

/// Which side of a user's reviews to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDirection {
    Given,
    Received,
}

/// A review together with its vote tallies
#[derive(Debug, serde::Serialize)]
pub struct ReviewWithVotes {
    #[serde(flatten)]
    pub review: Review,
    pub votes: VoteCounts,
}

/// Service for reviews, votes, and rating analytics
pub struct ReviewService<RR, CR>
where
    RR: ReviewRepository,
    CR: ContractRepository,
{
    reviews: Arc<RR>,
    contracts: Arc<CR>,
}

impl<RR, CR> ReviewService<RR, CR>
where
    RR: ReviewRepository,
    CR: ContractRepository,
{
    pub fn new(reviews: Arc<RR>, contracts: Arc<CR>) -> Self {
        Self { reviews, contracts }
    }

    /// Write a review for the counterparty on a completed contract
    pub async fn create(&self, user: &User, input: CreateReview) -> Result<Review, AppError> {
        let contract = self
            .contracts
            .find_by_id(&input.contract_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Contract {} not found", input.contract_id))
            })?;

        if !contract.is_party(&user.id) {
            return Err(AppError::Forbidden(
                "Only contract parties can review each other".to_string(),
            ));
        }
        if contract.status != ContractStatus::Completed {
            return Err(AppError::Domain(DomainError::Conflict(
                "Reviews open once the contract is completed".to_string(),
            )));
        }
        if self
            .reviews
            .exists_for_contract_and_reviewer(&contract.id, &user.id)
            .await?
        {
            return Err(AppError::Domain(DomainError::Conflict(
                "You have already reviewed this contract".to_string(),
            )));
        }

        let mut fields = Vec::new();
        if !(1..=5).contains(&input.rating) {
            fields.push(FieldError::new("rating", "must be between 1 and 5"));
        }
        if !input.dimensions.all_in_range() {
            fields.push(FieldError::new(
                "dimensions",
                "each dimension rating must be between 1 and 5",
            ));
        }
        if input.comment.trim().is_empty() || input.comment.len() > 4000 {
            fields.push(FieldError::new(
                "comment",
                "must be between 1 and 4000 characters",
            ));
        }
        if !fields.is_empty() {
            return Err(AppError::Fields(fields));
        }

        let reviewee_id = counterparty(&contract, &user.id);
        let review = self
            .reviews
            .create(&NewReview {
                contract_id: contract.id,
                reviewer_id: user.id,
                reviewee_id,
                rating: input.rating,
                dimensions: input.dimensions,
                comment: input.comment.trim().to_string(),
            })
            .await?;

        tracing::info!(
            review_id = %review.id,
            contract_id = %contract.id,
            reviewer_id = %user.id,
            rating = review.rating,
            "Review created"
        );
        Ok(review)
    }

    /// Completed contracts the caller has not reviewed yet
    pub async fn eligible_contracts(&self, user: &User) -> Result<Vec<Contract>, AppError> {
        let mut eligible = Vec::new();
        for contract in self.contracts.find_by_party(&user.id).await? {
            if contract.status == ContractStatus::Completed
                && !self
                    .reviews
                    .exists_for_contract_and_reviewer(&contract.id, &user.id)
                    .await?
            {
                eligible.push(contract);
            }
        }
        Ok(eligible)
    }

    /// Reviews the caller has given or received, paginated
    pub async fn list_mine(
        &self,
        user: &User,
        direction: ReviewDirection,
        page: PageParams,
    ) -> Result<Vec<Review>, AppError> {
        let reviews = match direction {
            ReviewDirection::Given => {
                self.reviews
                    .find_by_reviewer(&user.id, page.limit(), page.offset())
                    .await?
            }
            ReviewDirection::Received => {
                self.reviews
                    .find_by_reviewee(&user.id, page.limit(), page.offset())
                    .await?
            }
        };
        Ok(reviews)
    }

    /// Reviews received by any user, with vote tallies, paginated
    pub async fn list_for_user(
        &self,
        reviewee_id: &UserId,
        page: PageParams,
    ) -> Result<Vec<ReviewWithVotes>, AppError> {
        let reviews = self
            .reviews
            .find_by_reviewee(reviewee_id, page.limit(), page.offset())
            .await?;
        let mut out = Vec::with_capacity(reviews.len());
        for review in reviews {
            let votes = self.reviews.vote_counts(&review.id).await?;
            out.push(ReviewWithVotes { review, votes });
        }
        Ok(out)
    }

    /// Vote on a review's helpfulness. One vote per user; voting on your own
    /// review, or a review about you, is rejected.
    pub async fn vote(
        &self,
        user: &User,
        review_id: &ReviewId,
        helpful: bool,
    ) -> Result<VoteCounts, AppError> {
        let review = self
            .reviews
            .find_by_id(review_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review {} not found", review_id)))?;

        if review.reviewer_id == user.id || review.reviewee_id == user.id {
            return Err(AppError::Forbidden(
                "Cannot vote on reviews you wrote or received".to_string(),
            ));
        }
        if self.reviews.has_voted(review_id, &user.id).await? {
            return Err(AppError::Domain(DomainError::Conflict(
                "You have already voted on this review".to_string(),
            )));
        }

        self.reviews
            .create_vote(&NewReviewVote {
                review_id: *review_id,
                voter_id: user.id,
                helpful,
            })
            .await?;
        Ok(self.reviews.vote_counts(review_id).await?)
    }

    /// Aggregate rating card for a user: means, star distribution, percent
    /// recommended, and the recent monthly trend.
    pub async fn rating_card(&self, reviewee_id: &UserId) -> Result<RatingCard, AppError> {
        let reviews = self.reviews.find_all_by_reviewee(reviewee_id).await?;
        let helpful_votes = self.reviews.helpful_votes_for_reviewee(reviewee_id).await?;
        Ok(review_analytics::rating_card(&reviews, helpful_votes))
    }
}

fn counterparty(contract: &Contract, user_id: &UserId) -> UserId {
    if contract.client_id == *user_id {
        contract.provider_id
    } else {
        contract.client_id
    }
}
