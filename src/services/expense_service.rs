use crate::entities::{ExpenseStatus, expense_entity as expenses};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::users_by_id;
use crate::utils::{
    EXPENSE_PREFIX, REFERENCE_ATTEMPTS, is_unique_violation, next_reference_number,
    optional_text, parse_optional_date, positive_cents, required, required_text, today,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct ExpenseService {
    pool: DatabaseConnection,
}

impl ExpenseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &ExpenseQuery) -> AppResult<PaginatedResponse<ExpenseResponse>> {
        let params = PaginationParams::new(query.page, query.limit, RECORD_PAGE_SIZE);
        let start = parse_optional_date(query.start_date.as_deref(), "startDate")?;
        let end = parse_optional_date(query.end_date.as_deref(), "endDate")?;

        let mut base_query = expenses::Entity::find().filter(expenses::Column::DeletedAt.is_null());
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            base_query = base_query.filter(expenses::Column::Category.eq(category));
        }
        if let Some(status) = query.status {
            base_query = base_query.filter(expenses::Column::Status.eq(status));
        }
        if let Some(start) = start {
            base_query = base_query.filter(expenses::Column::ExpenseDate.gte(start));
        }
        if let Some(end) = end {
            base_query = base_query.filter(expenses::Column::ExpenseDate.lte(end));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_desc(expenses::Column::ExpenseDate)
            .order_by_desc(expenses::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let data = self.with_approver(rows).await?;
        Ok(PaginatedResponse::new(data, &params, total))
    }

    pub async fn get(&self, id: i64) -> AppResult<ExpenseResponse> {
        let expense = self.find_live(id).await?;
        self.with_approver(vec![expense])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
    }

    /// New expenses always start out pending with no approver.
    pub async fn create(&self, request: CreateExpenseRequest) -> AppResult<ExpenseResponse> {
        let category = required_text(request.category, "category")?;
        let description = required_text(request.description, "description")?;
        let amount_cents = positive_cents(required(request.amount, "amount")?, "amount")?;
        let expense_date = parse_optional_date(request.expense_date.as_deref(), "expenseDate")?
            .unwrap_or_else(today);

        let now = Utc::now();
        let draft = expenses::ActiveModel {
            category: Set(category),
            description: Set(description),
            amount_cents: Set(amount_cents),
            expense_date: Set(expense_date),
            vendor: Set(optional_text(request.vendor)),
            approved_by: Set(None),
            status: Set(ExpenseStatus::Pending),
            receipt_path: Set(optional_text(request.receipt_path)),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let mut attempt = 1;
        let expense = loop {
            let reference_number = next_reference_number::<expenses::Entity, _>(
                &self.pool,
                EXPENSE_PREFIX,
                expenses::Column::ReferenceNumber,
            )
            .await?;
            let mut candidate = draft.clone();
            candidate.reference_number = Set(reference_number.clone());
            match candidate.insert(&self.pool).await {
                Ok(expense) => break expense,
                Err(err) if attempt < REFERENCE_ATTEMPTS && is_unique_violation(&err) => {
                    log::warn!("Reference {reference_number} was taken concurrently, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        };

        log::info!(
            "Expense {} created: {} cents for {}",
            expense.reference_number,
            expense.amount_cents,
            expense.category
        );
        self.get(expense.id).await
    }

    pub async fn update(
        &self,
        id: i64,
        acting_user: i64,
        request: UpdateExpenseRequest,
    ) -> AppResult<ExpenseResponse> {
        let existing = self.find_live(id).await?;
        let mut am = existing.into_active_model();

        if let Some(category) = request.category {
            am.category = Set(required_text(Some(category), "category")?);
        }
        if let Some(description) = request.description {
            am.description = Set(required_text(Some(description), "description")?);
        }
        if let Some(amount) = request.amount {
            am.amount_cents = Set(positive_cents(amount, "amount")?);
        }
        if let Some(date) = parse_optional_date(request.expense_date.as_deref(), "expenseDate")? {
            am.expense_date = Set(date);
        }
        if request.vendor.is_some() {
            am.vendor = Set(optional_text(request.vendor));
        }
        if request.receipt_path.is_some() {
            am.receipt_path = Set(optional_text(request.receipt_path));
        }
        if let Some(status) = request.status {
            am.status = Set(status);
            if status == ExpenseStatus::Approved {
                am.approved_by = Set(Some(acting_user));
            }
        }
        am.updated_at = Set(Utc::now());

        am.update(&self.pool).await?;
        self.get(id).await
    }

    pub async fn approve(&self, id: i64, acting_user: i64) -> AppResult<ExpenseResponse> {
        self.transition(id, acting_user, ExpenseStatus::Approved).await
    }

    pub async fn reject(&self, id: i64, acting_user: i64) -> AppResult<ExpenseResponse> {
        self.transition(id, acting_user, ExpenseStatus::Rejected).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find_live(id).await?;
        let now = Utc::now();
        let mut am = existing.into_active_model();
        am.deleted_at = Set(Some(now));
        am.updated_at = Set(now);
        am.update(&self.pool).await?;

        log::info!("Expense {id} soft-deleted");
        Ok(())
    }

    async fn transition(
        &self,
        id: i64,
        acting_user: i64,
        status: ExpenseStatus,
    ) -> AppResult<ExpenseResponse> {
        let existing = self.find_live(id).await?;
        let mut am = existing.into_active_model();
        am.status = Set(status);
        am.approved_by = Set(Some(acting_user));
        am.updated_at = Set(Utc::now());
        am.update(&self.pool).await?;

        log::info!("Expense {id} marked {status:?} by user {acting_user}");
        self.get(id).await
    }

    async fn find_live(&self, id: i64) -> AppResult<expenses::Model> {
        expenses::Entity::find_by_id(id)
            .filter(expenses::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Expense not found".to_string()))
    }

    async fn with_approver(&self, rows: Vec<expenses::Model>) -> AppResult<Vec<ExpenseResponse>> {
        let users = users_by_id(&self.pool, rows.iter().filter_map(|e| e.approved_by)).await?;
        Ok(rows
            .into_iter()
            .map(|e| {
                let approver = e
                    .approved_by
                    .and_then(|id| users.get(&id).cloned())
                    .map(Into::into);
                ExpenseResponse {
                    approver,
                    ..e.into()
                }
            })
            .collect())
    }
}
