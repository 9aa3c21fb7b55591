use super::{response_rate, Aggregate, SummaryDelta};
use crate::domain::entities::Review;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: i64,
    pub replied_reviews: i64,
    pub pending_replies: i64,
    pub response_rate: i64,
    pub average_rating: Decimal,
    #[serde(skip)]
    rating_sum: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReviewStatsDelta {
    pub reviews: i64,
    pub replied: i64,
    pub rating_sum: i64,
}

impl SummaryDelta for ReviewStatsDelta {
    fn plus(&self, other: &Self) -> Self {
        Self {
            reviews: self.reviews + other.reviews,
            replied: self.replied + other.replied,
            rating_sum: self.rating_sum + other.rating_sum,
        }
    }

    fn negate(&self) -> Self {
        Self {
            reviews: -self.reviews,
            replied: -self.replied,
            rating_sum: -self.rating_sum,
        }
    }
}

impl Aggregate<Review> for ReviewStats {
    type Delta = ReviewStatsDelta;

    fn contribution(review: &Review) -> ReviewStatsDelta {
        ReviewStatsDelta {
            reviews: 1,
            replied: i64::from(review.has_reply),
            rating_sum: i64::from(review.rating),
        }
    }

    fn counters(&self) -> ReviewStatsDelta {
        ReviewStatsDelta {
            reviews: self.total_reviews,
            replied: self.replied_reviews,
            rating_sum: self.rating_sum,
        }
    }

    fn from_counters(counters: ReviewStatsDelta) -> Self {
        // 平均評価は小数第 1 位まで
        let average_rating = if counters.reviews > 0 {
            (Decimal::from(counters.rating_sum) / Decimal::from(counters.reviews)).round_dp(1)
        } else {
            Decimal::ZERO
        };
        Self {
            total_reviews: counters.reviews,
            replied_reviews: counters.replied,
            pending_replies: counters.reviews - counters.replied,
            response_rate: response_rate(counters.replied, counters.reviews),
            average_rating,
            rating_sum: counters.rating_sum,
        }
    }
}
