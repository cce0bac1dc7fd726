//! Review handlers
//!
//! Reviews, helpfulness votes, and the public rating card / analytics.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::review_analytics::{DimensionMeans, TrendPoint};
use crate::app::{CreateReview, PageParams, ReviewDirection, ReviewWithVotes};
use crate::domain::entities::{
    Contract, ContractId, DimensionRatings, Review, ReviewId, User, UserId, VoteCounts,
};
use crate::error::AppError;
use crate::AppState;

/// Request to write a review
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub contract_id: Uuid,
    pub rating: i32,
    pub dimensions: DimensionRatings,
    pub comment: String,
}

/// Query parameters for listing own reviews
#[derive(Debug, Deserialize)]
pub struct MyReviewsQuery {
    pub direction: ReviewDirection,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}

/// Request to vote on a review's helpfulness
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub helpful: bool,
}

/// The aggregate card without the trend series
#[derive(Debug, Serialize)]
pub struct RatingCardResponse {
    pub review_count: usize,
    pub mean_rating: Option<f64>,
    pub dimension_means: Option<DimensionMeans>,
    pub star_distribution: [f64; 5],
    pub percent_recommended: f64,
    pub helpful_votes: i64,
}

/// The aggregate card plus the monthly trend
#[derive(Debug, Serialize)]
pub struct ReviewAnalyticsResponse {
    #[serde(flatten)]
    pub card: RatingCardResponse,
    pub trend: Vec<TrendPoint>,
}

/// POST /reviews
///
/// Review the counterparty on a completed contract.
pub async fn create_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    let review = state
        .review_service
        .create(
            &user,
            CreateReview {
                contract_id: ContractId(req.contract_id),
                rating: req.rating,
                dimensions: req.dimensions,
                comment: req.comment,
            },
        )
        .await?;
    Ok(Json(review))
}

/// GET /reviews/my-reviews?direction=given|received
pub async fn list_my_reviews(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(query): Query<MyReviewsQuery>,
) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(
        state
            .review_service
            .list_mine(
                &user,
                query.direction,
                PageParams {
                    page: query.page,
                    per_page: query.per_page,
                },
            )
            .await?,
    ))
}

/// GET /reviews/eligible
///
/// Completed contracts the caller has not reviewed yet.
pub async fn list_eligible_contracts(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Contract>>, AppError> {
    Ok(Json(state.review_service.eligible_contracts(&user).await?))
}

/// POST /reviews/:id/vote
pub async fn vote_on_review(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteCounts>, AppError> {
    Ok(Json(
        state
            .review_service
            .vote(&user, &ReviewId(id), req.helpful)
            .await?,
    ))
}

/// GET /users/:id/reviews
///
/// Reviews received by a user, with vote tallies.
pub async fn list_user_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<ReviewWithVotes>>, AppError> {
    Ok(Json(
        state
            .review_service
            .list_for_user(&UserId(id), page)
            .await?,
    ))
}

/// GET /users/:id/rating-card
pub async fn get_rating_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RatingCardResponse>, AppError> {
    let card = state.review_service.rating_card(&UserId(id)).await?;
    Ok(Json(RatingCardResponse {
        review_count: card.review_count,
        mean_rating: card.mean_rating,
        dimension_means: card.dimension_means,
        star_distribution: card.star_distribution,
        percent_recommended: card.percent_recommended,
        helpful_votes: card.helpful_votes,
    }))
}

/// GET /users/:id/review-analytics
///
/// Rating card plus the monthly trend.
pub async fn get_review_analytics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReviewAnalyticsResponse>, AppError> {
    let card = state.review_service.rating_card(&UserId(id)).await?;
    Ok(Json(ReviewAnalyticsResponse {
        card: RatingCardResponse {
            review_count: card.review_count,
            mean_rating: card.mean_rating,
            dimension_means: card.dimension_means,
            star_distribution: card.star_distribution,
            percent_recommended: card.percent_recommended,
            helpful_votes: card.helpful_votes,
        },
        trend: card.trend,
    }))
}
