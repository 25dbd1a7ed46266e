use crate::entities::{PledgeStatus, member_entity as members, pledge_entity as pledges};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::{members_by_id, sum_cents};
use crate::utils::{
    from_cents, optional_text, parse_optional_date, positive_cents, required, required_text, today,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// Status a pledge must carry once `paid` has been applied against `pledged`.
///
/// A cancelled pledge stays cancelled, a fully paid one is completed and
/// anything else is active.
pub fn settle_status(requested: PledgeStatus, pledged_cents: i64, paid_cents: i64) -> PledgeStatus {
    match requested {
        PledgeStatus::Cancelled => PledgeStatus::Cancelled,
        _ if paid_cents >= pledged_cents => PledgeStatus::Completed,
        _ => PledgeStatus::Active,
    }
}

#[derive(Clone)]
pub struct PledgeService {
    pool: DatabaseConnection,
}

impl PledgeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &PledgeQuery) -> AppResult<PaginatedResponse<PledgeResponse>> {
        let params = PaginationParams::new(query.page, query.limit, DIRECTORY_PAGE_SIZE);

        let mut base_query = pledges::Entity::find().filter(pledges::Column::DeletedAt.is_null());
        if let Some(status) = query.status {
            base_query = base_query.filter(pledges::Column::Status.eq(status));
        }
        if let Some(member_id) = query.member_id {
            base_query = base_query.filter(pledges::Column::MemberId.eq(member_id));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_desc(pledges::Column::PledgeDate)
            .order_by_desc(pledges::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let data = self.with_member(rows).await?;
        Ok(PaginatedResponse::new(data, &params, total))
    }

    pub async fn get(&self, id: i64) -> AppResult<PledgeResponse> {
        let pledge = pledges::Entity::find_by_id(id)
            .filter(pledges::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pledge not found".to_string()))?;
        self.with_member(vec![pledge])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Pledge not found".to_string()))
    }

    pub async fn create(
        &self,
        recorded_by: i64,
        request: CreatePledgeRequest,
    ) -> AppResult<PledgeResponse> {
        let member_id = required(request.member_id, "memberId")?;
        let pledge_type = required_text(request.pledge_type, "pledgeType")?;
        let pledged_cents = positive_cents(
            required(request.amount_pledged, "amountPledged")?,
            "amountPledged",
        )?;
        let pledge_date = parse_optional_date(request.pledge_date.as_deref(), "pledgeDate")?
            .unwrap_or_else(today);
        let due_date = parse_optional_date(request.due_date.as_deref(), "dueDate")?;

        let member_exists = members::Entity::find_by_id(member_id)
            .filter(members::Column::DeletedAt.is_null())
            .count(&self.pool)
            .await?;
        if member_exists == 0 {
            return Err(AppError::ValidationError(format!(
                "Member {member_id} does not exist"
            )));
        }

        let now = Utc::now();
        let pledge = pledges::ActiveModel {
            member_id: Set(member_id),
            pledge_type: Set(pledge_type),
            amount_pledged_cents: Set(pledged_cents),
            amount_paid_cents: Set(0),
            pledge_date: Set(pledge_date),
            due_date: Set(due_date),
            status: Set(PledgeStatus::Active),
            description: Set(optional_text(request.description)),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Pledge {} created for member {member_id}: {pledged_cents} cents",
            pledge.id
        );
        self.get(pledge.id).await
    }

    /// Partial update. `amountPaid` is never touched here; it only moves through payments.
    pub async fn update(&self, id: i64, request: UpdatePledgeRequest) -> AppResult<PledgeResponse> {
        let existing = pledges::Entity::find_by_id(id)
            .filter(pledges::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pledge not found".to_string()))?;

        let pledged_cents = match request.amount_pledged {
            Some(amount) => positive_cents(amount, "amountPledged")?,
            None => existing.amount_pledged_cents,
        };
        if pledged_cents < existing.amount_paid_cents {
            return Err(AppError::ValidationError(
                "amountPledged cannot be less than the amount already paid".to_string(),
            ));
        }

        if request.status == Some(PledgeStatus::Completed)
            && existing.amount_paid_cents < pledged_cents
        {
            return Err(AppError::ValidationError(
                "A pledge can only be completed once it is fully paid".to_string(),
            ));
        }
        // completed stays completed only while it is still fully paid
        let requested = request.status.unwrap_or(existing.status);
        let status = settle_status(requested, pledged_cents, existing.amount_paid_cents);

        let pledge_date = parse_optional_date(request.pledge_date.as_deref(), "pledgeDate")?;
        let due_date = parse_optional_date(request.due_date.as_deref(), "dueDate")?;

        let mut am = existing.into_active_model();
        if let Some(pledge_type) = request.pledge_type {
            am.pledge_type = Set(required_text(Some(pledge_type), "pledgeType")?);
        }
        if let Some(date) = pledge_date {
            am.pledge_date = Set(date);
        }
        if let Some(date) = due_date {
            am.due_date = Set(Some(date));
        }
        if request.description.is_some() {
            am.description = Set(optional_text(request.description));
        }
        am.amount_pledged_cents = Set(pledged_cents);
        am.status = Set(status);
        am.updated_at = Set(Utc::now());

        am.update(&self.pool).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = pledges::Entity::find_by_id(id)
            .filter(pledges::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Pledge not found".to_string()))?;

        let now = Utc::now();
        let mut am = existing.into_active_model();
        am.deleted_at = Set(Some(now));
        am.updated_at = Set(now);
        am.update(&self.pool).await?;

        log::info!("Pledge {id} soft-deleted");
        Ok(())
    }

    /// Adds a payment to the pledge inside one transaction.
    ///
    /// On PostgreSQL the pledge row is read with `FOR UPDATE`, so concurrent
    /// payments against the same pledge queue up instead of losing an update.
    /// Any error drops the transaction, which rolls it back.
    pub async fn record_payment(
        &self,
        id: i64,
        request: PledgePaymentRequest,
    ) -> AppResult<PledgeResponse> {
        let amount_cents = positive_cents(required(request.amount, "amount")?, "amount")?;

        let txn = self.pool.begin().await?;

        let mut select = pledges::Entity::find_by_id(id).filter(pledges::Column::DeletedAt.is_null());
        if txn.get_database_backend() == DbBackend::Postgres {
            select = select.lock_exclusive();
        }
        let pledge = select
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound("Pledge not found".to_string()))?;

        if pledge.status == PledgeStatus::Cancelled {
            return Err(AppError::ValidationError(
                "Cannot record a payment on a cancelled pledge".to_string(),
            ));
        }

        let paid_cents = pledge.amount_paid_cents + amount_cents;
        if paid_cents > pledge.amount_pledged_cents {
            return Err(AppError::ValidationError(format!(
                "Payment exceeds the outstanding balance of {}",
                from_cents(pledge.amount_pledged_cents - pledge.amount_paid_cents)
            )));
        }

        let status = settle_status(pledge.status, pledge.amount_pledged_cents, paid_cents);
        let mut am = pledge.into_active_model();
        am.amount_paid_cents = Set(paid_cents);
        am.status = Set(status);
        am.updated_at = Set(Utc::now());
        am.update(&txn).await?;

        txn.commit().await?;

        log::info!("Pledge {id} received {amount_cents} cents, now {status:?}");
        self.get(id).await
    }

    pub async fn summary(&self) -> AppResult<PledgeSummaryResponse> {
        let active = pledges::Entity::find()
            .filter(pledges::Column::DeletedAt.is_null())
            .filter(pledges::Column::Status.eq(PledgeStatus::Active));

        let count = active.clone().count(&self.pool).await?;
        let pledged = sum_cents(&self.pool, active.clone(), pledges::Column::AmountPledgedCents).await?;
        let paid = sum_cents(&self.pool, active, pledges::Column::AmountPaidCents).await?;

        let completed = pledges::Entity::find()
            .filter(pledges::Column::DeletedAt.is_null())
            .filter(pledges::Column::Status.eq(PledgeStatus::Completed))
            .count(&self.pool)
            .await?;

        Ok(PledgeSummaryResponse {
            active: ActivePledgeTotals {
                count,
                total_pledged: from_cents(pledged),
                total_paid: from_cents(paid),
                outstanding: from_cents(pledged - paid),
            },
            completed,
        })
    }

    async fn with_member(&self, rows: Vec<pledges::Model>) -> AppResult<Vec<PledgeResponse>> {
        let members = members_by_id(&self.pool, rows.iter().map(|p| p.member_id)).await?;
        Ok(rows
            .into_iter()
            .map(|p| {
                let member = members.get(&p.member_id).cloned().map(Into::into);
                PledgeResponse {
                    member,
                    ..p.into()
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_status() {
        assert_eq!(settle_status(PledgeStatus::Active, 10000, 4000), PledgeStatus::Active);
        assert_eq!(settle_status(PledgeStatus::Active, 10000, 10000), PledgeStatus::Completed);
        assert_eq!(settle_status(PledgeStatus::Completed, 10000, 10000), PledgeStatus::Completed);
        // raising the pledge reopens it
        assert_eq!(settle_status(PledgeStatus::Completed, 20000, 10000), PledgeStatus::Active);
        assert_eq!(settle_status(PledgeStatus::Cancelled, 10000, 10000), PledgeStatus::Cancelled);
    }
}
