use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, SqlErr};

pub const DONATION_PREFIX: &str = "DON";
pub const EXPENSE_PREFIX: &str = "EXP";
/// Inserts retried when a concurrent writer claimed the same reference first.
pub const REFERENCE_ATTEMPTS: u32 = 5;

pub fn format_reference(prefix: &str, millis: i64) -> String {
    format!("{prefix}-{millis}")
}

/// `{PREFIX}-{epochMillis}`, bumping the millisecond value until no row in
/// `column` already holds it.
pub async fn next_reference_number<E, C>(db: &C, prefix: &str, column: E::Column) -> AppResult<String>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut millis = Utc::now().timestamp_millis();
    loop {
        let candidate = format_reference(prefix, millis);
        let taken = E::find()
            .filter(column.eq(candidate.as_str()))
            .one(db)
            .await?
            .is_some();
        if !taken {
            return Ok(candidate);
        }
        millis += 1;
    }
}

/// The free-number check and the insert are separate statements, so a
/// concurrent create can still hit the unique index in between.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_reference() {
        assert_eq!(format_reference(DONATION_PREFIX, 1700000000123), "DON-1700000000123");
        assert_eq!(format_reference(EXPENSE_PREFIX, 1), "EXP-1");
    }

    #[test]
    fn test_other_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DbErr::Custom("boom".into())));
        assert!(!is_unique_violation(&DbErr::RecordNotFound("donations".into())));
    }
}
