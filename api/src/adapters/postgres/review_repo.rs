//! PostgreSQL adapter for ReviewRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::domain::entities::{
    ContractId, DimensionRatings, NewReview, NewReviewVote, Review, ReviewId, ReviewVote, UserId,
    VoteCounts,
};
use crate::domain::ports::ReviewRepository;
use crate::entity::{review_votes, reviews};
use crate::error::DomainError;

/// PostgreSQL implementation of ReviewRepository
pub struct PostgresReviewRepository {
    db: DatabaseConnection,
}

impl PostgresReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError> {
        let result = reviews::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_reviewer(
        &self,
        reviewer_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Review>, DomainError> {
        let results = reviews::Entity::find()
            .filter(reviews::Column::ReviewerId.eq(reviewer_id.0))
            .order_by_desc(reviews::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_by_reviewee(
        &self,
        reviewee_id: &UserId,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Review>, DomainError> {
        let results = reviews::Entity::find()
            .filter(reviews::Column::RevieweeId.eq(reviewee_id.0))
            .order_by_desc(reviews::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_all_by_reviewee(
        &self,
        reviewee_id: &UserId,
    ) -> Result<Vec<Review>, DomainError> {
        let results = reviews::Entity::find()
            .filter(reviews::Column::RevieweeId.eq(reviewee_id.0))
            .order_by_desc(reviews::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn exists_for_contract_and_reviewer(
        &self,
        contract_id: &ContractId,
        reviewer_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result = reviews::Entity::find()
            .filter(reviews::Column::ContractId.eq(contract_id.0))
            .filter(reviews::Column::ReviewerId.eq(reviewer_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn create(&self, review: &NewReview) -> Result<Review, DomainError> {
        let model = reviews::ActiveModel {
            id: Set(Uuid::new_v4()),
            contract_id: Set(review.contract_id.0),
            reviewer_id: Set(review.reviewer_id.0),
            reviewee_id: Set(review.reviewee_id.0),
            rating: Set(review.rating),
            communication: Set(review.dimensions.communication),
            expertise: Set(review.dimensions.expertise),
            timeliness: Set(review.dimensions.timeliness),
            comment: Set(review.comment.clone()),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn create_vote(&self, vote: &NewReviewVote) -> Result<ReviewVote, DomainError> {
        let model = review_votes::ActiveModel {
            review_id: Set(vote.review_id.0),
            voter_id: Set(vote.voter_id.0),
            helpful: Set(vote.helpful),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.into())
    }

    async fn has_voted(
        &self,
        review_id: &ReviewId,
        voter_id: &UserId,
    ) -> Result<bool, DomainError> {
        let result = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewId.eq(review_id.0))
            .filter(review_votes::Column::VoterId.eq(voter_id.0))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn vote_counts(&self, review_id: &ReviewId) -> Result<VoteCounts, DomainError> {
        let helpful = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewId.eq(review_id.0))
            .filter(review_votes::Column::Helpful.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let unhelpful = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewId.eq(review_id.0))
            .filter(review_votes::Column::Helpful.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(VoteCounts {
            helpful: helpful as i64,
            unhelpful: unhelpful as i64,
        })
    }

    async fn helpful_votes_for_reviewee(
        &self,
        reviewee_id: &UserId,
    ) -> Result<i64, DomainError> {
        let review_ids: Vec<Uuid> = reviews::Entity::find()
            .filter(reviews::Column::RevieweeId.eq(reviewee_id.0))
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|m| m.id)
            .collect();

        if review_ids.is_empty() {
            return Ok(0);
        }

        let count = review_votes::Entity::find()
            .filter(review_votes::Column::ReviewId.is_in(review_ids))
            .filter(review_votes::Column::Helpful.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(count as i64)
    }
}

/// Convert SeaORM model to domain entity
impl From<reviews::Model> for Review {
    fn from(model: reviews::Model) -> Self {
        Review {
            id: ReviewId(model.id),
            contract_id: ContractId(model.contract_id),
            reviewer_id: UserId(model.reviewer_id),
            reviewee_id: UserId(model.reviewee_id),
            rating: model.rating,
            dimensions: DimensionRatings {
                communication: model.communication,
                expertise: model.expertise,
                timeliness: model.timeliness,
            },
            comment: model.comment,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<review_votes::Model> for ReviewVote {
    fn from(model: review_votes::Model) -> Self {
        ReviewVote {
            review_id: ReviewId(model.review_id),
            voter_id: UserId(model.voter_id),
            helpful: model.helpful,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
