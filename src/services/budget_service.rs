use crate::entities::budget_entity as budgets;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::users_by_id;
use crate::utils::{optional_text, parse_date, parse_optional_date, positive_cents, required, required_text};
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

fn check_period(start: NaiveDate, end: NaiveDate) -> AppResult<()> {
    if end < start {
        return Err(AppError::ValidationError(
            "endDate must not be before startDate".to_string(),
        ));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BudgetService {
    pool: DatabaseConnection,
}

impl BudgetService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &BudgetQuery) -> AppResult<PaginatedResponse<BudgetResponse>> {
        let params = PaginationParams::new(query.page, query.limit, RECORD_PAGE_SIZE);

        let mut base_query = budgets::Entity::find().filter(budgets::Column::DeletedAt.is_null());
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            base_query = base_query.filter(budgets::Column::Category.eq(category));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_desc(budgets::Column::StartDate)
            .order_by_desc(budgets::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let data = self.with_creator(rows).await?;
        Ok(PaginatedResponse::new(data, &params, total))
    }

    pub async fn get(&self, id: i64) -> AppResult<BudgetResponse> {
        let budget = self.find_live(id).await?;
        self.with_creator(vec![budget])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
    }

    pub async fn create(
        &self,
        created_by: i64,
        request: CreateBudgetRequest,
    ) -> AppResult<BudgetResponse> {
        let category = required_text(request.category, "category")?;
        let allocated_cents = positive_cents(
            required(request.allocated_amount, "allocatedAmount")?,
            "allocatedAmount",
        )?;
        let start_date = parse_date(&required(request.start_date, "startDate")?, "startDate")?;
        let end_date = parse_date(&required(request.end_date, "endDate")?, "endDate")?;
        check_period(start_date, end_date)?;

        let now = Utc::now();
        let budget = budgets::ActiveModel {
            category: Set(category),
            allocated_amount_cents: Set(allocated_cents),
            start_date: Set(start_date),
            end_date: Set(end_date),
            description: Set(optional_text(request.description)),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Budget {} created for {}", budget.id, budget.category);
        self.get(budget.id).await
    }

    pub async fn update(&self, id: i64, request: UpdateBudgetRequest) -> AppResult<BudgetResponse> {
        let existing = self.find_live(id).await?;

        let start_date = parse_optional_date(request.start_date.as_deref(), "startDate")?
            .unwrap_or(existing.start_date);
        let end_date = parse_optional_date(request.end_date.as_deref(), "endDate")?
            .unwrap_or(existing.end_date);
        check_period(start_date, end_date)?;

        let mut am = existing.into_active_model();
        if let Some(category) = request.category {
            am.category = Set(required_text(Some(category), "category")?);
        }
        if let Some(amount) = request.allocated_amount {
            am.allocated_amount_cents = Set(positive_cents(amount, "allocatedAmount")?);
        }
        if request.description.is_some() {
            am.description = Set(optional_text(request.description));
        }
        am.start_date = Set(start_date);
        am.end_date = Set(end_date);
        am.updated_at = Set(Utc::now());

        am.update(&self.pool).await?;
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find_live(id).await?;
        let now = Utc::now();
        let mut am = existing.into_active_model();
        am.deleted_at = Set(Some(now));
        am.updated_at = Set(now);
        am.update(&self.pool).await?;

        log::info!("Budget {id} soft-deleted");
        Ok(())
    }

    async fn find_live(&self, id: i64) -> AppResult<budgets::Model> {
        budgets::Entity::find_by_id(id)
            .filter(budgets::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Budget not found".to_string()))
    }

    async fn with_creator(&self, rows: Vec<budgets::Model>) -> AppResult<Vec<BudgetResponse>> {
        let users = users_by_id(&self.pool, rows.iter().map(|b| b.created_by)).await?;
        Ok(rows
            .into_iter()
            .map(|b| {
                let creator = users.get(&b.created_by).cloned().map(Into::into);
                BudgetResponse {
                    creator,
                    ..b.into()
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_period() {
        let d = |s: &str| parse_date(s, "date").unwrap();
        assert!(check_period(d("2024-01-01"), d("2024-12-31")).is_ok());
        assert!(check_period(d("2024-01-01"), d("2024-01-01")).is_ok());
        assert!(check_period(d("2024-02-01"), d("2024-01-31")).is_err());
    }
}
