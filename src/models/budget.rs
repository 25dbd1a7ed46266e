use crate::entities::budgets;
use crate::models::UserSummary;
use crate::utils::from_cents;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    pub id: i64,
    pub category: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub allocated_amount: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<UserSummary>,
}

impl From<budgets::Model> for BudgetResponse {
    fn from(b: budgets::Model) -> Self {
        Self {
            id: b.id,
            category: b.category,
            allocated_amount: from_cents(b.allocated_amount_cents),
            start_date: b.start_date,
            end_date: b.end_date,
            description: b.description,
            created_by: b.created_by,
            created_at: b.created_at,
            updated_at: b.updated_at,
            creator: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub allocated_amount: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    pub category: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub allocated_amount: Option<Decimal>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BudgetQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub category: Option<String>,
}
