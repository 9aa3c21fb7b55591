use super::{require, require_confirmed};
use crate::application::coordinator::{Mutation, MutationKind, OptimisticChange};
use crate::application::ports::{CouponDraft, CouponPatch};
use crate::domain::entities::{Coupon, DiscountType};
use crate::domain::value_objects::RecordId;
use crate::shared::{AppError, ValidationFailureKind};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const CODE_MIN_CHARS: usize = 3;
const CODE_MAX_CHARS: usize = 32;

/// 大文字化したクーポンコード。英数字と `-` `_` のみ許可する。
fn normalize_code(code: &str) -> Result<String, AppError> {
    let code = code.trim().to_uppercase();
    let length = code.chars().count();
    if !(CODE_MIN_CHARS..=CODE_MAX_CHARS).contains(&length) {
        return Err(AppError::validation(
            ValidationFailureKind::InvalidCouponCode,
            format!("Coupon code must be {CODE_MIN_CHARS}-{CODE_MAX_CHARS} characters"),
        ));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::validation(
            ValidationFailureKind::InvalidCouponCode,
            "Coupon code may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(code)
}

fn validate_discount(discount_type: DiscountType, value: Decimal) -> Result<(), AppError> {
    if value <= Decimal::ZERO {
        return Err(AppError::validation(
            ValidationFailureKind::DiscountOutOfRange,
            "Discount value must be greater than 0",
        ));
    }
    if discount_type == DiscountType::Percentage && value > Decimal::ONE_HUNDRED {
        return Err(AppError::validation(
            ValidationFailureKind::DiscountOutOfRange,
            "Percentage discount cannot exceed 100",
        ));
    }
    Ok(())
}

/// 新規クーポン。確定までは一時 ID で一覧の先頭に置く。
#[derive(Debug, Clone)]
pub struct CreateCoupon {
    id: RecordId,
    draft: CouponDraft,
}

impl CreateCoupon {
    pub fn new(mut draft: CouponDraft) -> Self {
        draft.code = draft.code.trim().to_uppercase();
        let (id, _) = RecordId::pending();
        Self { id, draft }
    }

    pub fn draft(&self) -> &CouponDraft {
        &self.draft
    }
}

impl Mutation<Coupon> for CreateCoupon {
    type Confirmed = Coupon;

    fn kind(&self) -> MutationKind {
        MutationKind::CreateCoupon
    }

    fn target(&self) -> &RecordId {
        &self.id
    }

    fn prepare(
        &self,
        _current: Option<&Coupon>,
        now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Coupon>, AppError> {
        let code = normalize_code(&self.draft.code)?;
        validate_discount(self.draft.discount_type, self.draft.discount_value)?;

        Ok(OptimisticChange::Insert(Coupon {
            id: self.id.clone(),
            code,
            discount_type: self.draft.discount_type,
            discount_value: self.draft.discount_value,
            is_active: self.draft.is_active,
            usage_limit: self.draft.usage_limit,
            used_count: 0,
            expires_at: self.draft.expires_at,
            created_at: now,
            updated_at: now,
        }))
    }

    fn reconcile(&self, _current: &Coupon, confirmed: Coupon) -> Option<Coupon> {
        Some(confirmed)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCoupon {
    id: RecordId,
    patch: CouponPatch,
}

impl UpdateCoupon {
    pub fn new(id: RecordId, mut patch: CouponPatch) -> Self {
        if let Some(code) = patch.code.as_mut() {
            *code = code.trim().to_uppercase();
        }
        Self { id, patch }
    }

    pub fn patch(&self) -> &CouponPatch {
        &self.patch
    }
}

impl Mutation<Coupon> for UpdateCoupon {
    type Confirmed = Coupon;

    fn kind(&self) -> MutationKind {
        MutationKind::UpdateCoupon
    }

    fn target(&self) -> &RecordId {
        &self.id
    }

    fn prepare(
        &self,
        current: Option<&Coupon>,
        _now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Coupon>, AppError> {
        require_confirmed(&self.id, "Coupon")?;
        if self.patch.is_empty() {
            return Err(AppError::validation(
                ValidationFailureKind::EmptyPatch,
                "Nothing to update",
            ));
        }
        let coupon = require(current, "Coupon", &self.id)?;
        if let Some(code) = &self.patch.code {
            normalize_code(code)?;
        }
        if let Some(value) = self.patch.discount_value {
            validate_discount(coupon.discount_type, value)?;
        }

        let mut next = coupon.clone();
        self.patch.apply_to(&mut next);
        Ok(OptimisticChange::Update(next))
    }

    fn reconcile(&self, _current: &Coupon, confirmed: Coupon) -> Option<Coupon> {
        Some(confirmed)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCoupon {
    id: RecordId,
}

impl DeleteCoupon {
    pub fn new(id: RecordId) -> Self {
        Self { id }
    }
}

impl Mutation<Coupon> for DeleteCoupon {
    type Confirmed = ();

    fn kind(&self) -> MutationKind {
        MutationKind::DeleteCoupon
    }

    fn target(&self) -> &RecordId {
        &self.id
    }

    fn prepare(
        &self,
        current: Option<&Coupon>,
        _now: DateTime<Utc>,
    ) -> Result<OptimisticChange<Coupon>, AppError> {
        require_confirmed(&self.id, "Coupon")?;
        require(current, "Coupon", &self.id)?;
        Ok(OptimisticChange::Remove)
    }

    fn reconcile(&self, _current: &Coupon, _confirmed: ()) -> Option<Coupon> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_normalization() {
        assert_eq!(normalize_code(" spring-25 ").unwrap(), "SPRING-25");
        let too_long = "X".repeat(CODE_MAX_CHARS + 1);
        for bad in ["ab", "has space", "emoji🎉", too_long.as_str()] {
            assert_eq!(
                normalize_code(bad).unwrap_err().validation_kind(),
                Some(ValidationFailureKind::InvalidCouponCode),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_discount_bounds() {
        assert!(validate_discount(DiscountType::Percentage, Decimal::ONE_HUNDRED).is_ok());
        assert!(validate_discount(DiscountType::Fixed, Decimal::from(500)).is_ok());
        assert!(validate_discount(DiscountType::Percentage, Decimal::from(101)).is_err());
        assert!(validate_discount(DiscountType::Fixed, Decimal::ZERO).is_err());
    }

    #[test]
    fn test_create_inserts_pending_coupon() {
        let create = CreateCoupon::new(CouponDraft::new(
            "welcome10",
            DiscountType::Percentage,
            Decimal::from(10),
        ));
        assert_eq!(create.draft().code, "WELCOME10");

        let change = create.prepare(None, Utc::now()).unwrap();
        let OptimisticChange::Insert(coupon) = change else {
            panic!("expected insert");
        };
        assert!(coupon.id.is_pending());
        assert_eq!(coupon.used_count, 0);
        assert!(coupon.is_active);
    }

    #[test]
    fn test_pending_coupons_cannot_be_edited() {
        let (pending, _) = RecordId::pending();
        let err = DeleteCoupon::new(pending)
            .prepare(None, Utc::now())
            .unwrap_err();
        assert_eq!(
            err.validation_kind(),
            Some(ValidationFailureKind::PendingRecord)
        );
    }
}
