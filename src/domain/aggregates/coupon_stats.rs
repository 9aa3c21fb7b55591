use super::{Aggregate, SummaryDelta};
use crate::domain::entities::Coupon;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponStats {
    pub total_coupons: i64,
    pub active_coupons: i64,
    pub inactive_coupons: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CouponStatsDelta {
    pub coupons: i64,
    pub active: i64,
}

impl SummaryDelta for CouponStatsDelta {
    fn plus(&self, other: &Self) -> Self {
        Self {
            coupons: self.coupons + other.coupons,
            active: self.active + other.active,
        }
    }

    fn negate(&self) -> Self {
        Self {
            coupons: -self.coupons,
            active: -self.active,
        }
    }
}

impl Aggregate<Coupon> for CouponStats {
    type Delta = CouponStatsDelta;

    fn contribution(coupon: &Coupon) -> CouponStatsDelta {
        CouponStatsDelta {
            coupons: 1,
            active: i64::from(coupon.is_active),
        }
    }

    fn counters(&self) -> CouponStatsDelta {
        CouponStatsDelta {
            coupons: self.total_coupons,
            active: self.active_coupons,
        }
    }

    fn from_counters(counters: CouponStatsDelta) -> Self {
        Self {
            total_coupons: counters.coupons,
            active_coupons: counters.active,
            inactive_coupons: counters.coupons - counters.active,
        }
    }
}
