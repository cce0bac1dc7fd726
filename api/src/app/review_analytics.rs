//! Rating analytics
//!
//! Pure aggregation over a user's received reviews: rating means, star
//! distribution, percent recommended, and a recent monthly trend. Kept free
//! of I/O so the numbers are easy to test.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::app::policy::ANALYTICS_TREND_MONTHS;
use crate::domain::entities::Review;

/// Mean dimension ratings across reviews
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionMeans {
    pub communication: f64,
    pub expertise: f64,
    pub timeliness: f64,
}

/// One month in the trend, oldest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Calendar month as `YYYY-MM`
    pub month: String,
    pub review_count: usize,
    /// Mean overall rating for the month, absent when no reviews landed
    pub mean_rating: Option<f64>,
}

/// The aggregate rating card shown on a user's public profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCard {
    pub review_count: usize,
    pub mean_rating: Option<f64>,
    pub dimension_means: Option<DimensionMeans>,
    /// Percentage of reviews per star, index 0 = 1 star
    pub star_distribution: [f64; 5],
    /// Percentage of reviews rating 4 or higher
    pub percent_recommended: f64,
    pub helpful_votes: i64,
    pub trend: Vec<TrendPoint>,
}

/// Build the rating card from all of a user's received reviews
pub fn rating_card(reviews: &[Review], helpful_votes: i64) -> RatingCard {
    rating_card_at(reviews, helpful_votes, Utc::now())
}

fn rating_card_at(reviews: &[Review], helpful_votes: i64, now: DateTime<Utc>) -> RatingCard {
    let count = reviews.len();

    let mean_rating = mean(reviews.iter().map(|r| r.rating));
    let dimension_means = if count == 0 {
        None
    } else {
        Some(DimensionMeans {
            communication: mean(reviews.iter().map(|r| r.dimensions.communication))
                .unwrap_or(0.0),
            expertise: mean(reviews.iter().map(|r| r.dimensions.expertise)).unwrap_or(0.0),
            timeliness: mean(reviews.iter().map(|r| r.dimensions.timeliness)).unwrap_or(0.0),
        })
    };

    let mut star_counts = [0usize; 5];
    let mut recommended = 0usize;
    for review in reviews {
        if (1..=5).contains(&review.rating) {
            star_counts[(review.rating - 1) as usize] += 1;
        }
        if review.is_recommendation() {
            recommended += 1;
        }
    }
    let star_distribution = star_counts.map(|c| percentage(c, count));
    let percent_recommended = percentage(recommended, count);

    RatingCard {
        review_count: count,
        mean_rating,
        dimension_means,
        star_distribution,
        percent_recommended,
        helpful_votes,
        trend: trend(reviews, now),
    }
}

/// Monthly trend over the configured window, oldest month first. Months
/// without reviews appear with a zero count so the series has no gaps.
fn trend(reviews: &[Review], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let mut points = Vec::with_capacity(ANALYTICS_TREND_MONTHS as usize);
    for offset in (0..ANALYTICS_TREND_MONTHS).rev() {
        let (year, month) = month_back(now.year(), now.month(), offset);
        let in_month: Vec<&Review> = reviews
            .iter()
            .filter(|r| r.created_at.year() == year && r.created_at.month() == month)
            .collect();
        points.push(TrendPoint {
            month: format!("{:04}-{:02}", year, month),
            review_count: in_month.len(),
            mean_rating: mean(in_month.iter().map(|r| r.rating)),
        });
    }
    points
}

/// Walk `offset` calendar months back from (year, month)
fn month_back(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 - offset as i32;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

fn mean(values: impl Iterator<Item = i32>) -> Option<f64> {
    let (sum, count) = values.fold((0i64, 0usize), |(s, c), v| (s + v as i64, c + 1));
    if count == 0 {
        None
    } else {
        Some(round2(sum as f64 / count as f64))
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round2(part as f64 * 100.0 / whole as f64)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
