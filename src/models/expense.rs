use crate::entities::{ExpenseStatus, expenses};
use crate::models::UserSummary;
use crate::utils::from_cents;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseResponse {
    pub id: i64,
    pub category: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub expense_date: NaiveDate,
    pub vendor: Option<String>,
    pub reference_number: String,
    pub approved_by: Option<i64>,
    pub status: ExpenseStatus,
    pub receipt_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver: Option<UserSummary>,
}

impl From<expenses::Model> for ExpenseResponse {
    fn from(e: expenses::Model) -> Self {
        Self {
            id: e.id,
            category: e.category,
            description: e.description,
            amount: from_cents(e.amount_cents),
            expense_date: e.expense_date,
            vendor: e.vendor,
            reference_number: e.reference_number,
            approved_by: e.approved_by,
            status: e.status,
            receipt_path: e.receipt_path,
            created_at: e.created_at,
            updated_at: e.updated_at,
            approver: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    /// YYYY-MM-DD, defaults to today
    pub expense_date: Option<String>,
    pub vendor: Option<String>,
    pub receipt_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub category: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub expense_date: Option<String>,
    pub vendor: Option<String>,
    pub receipt_path: Option<String>,
    /// Setting `approved` stamps the acting user as approver
    pub status: Option<ExpenseStatus>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ExpenseQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub category: Option<String>,
    pub status: Option<ExpenseStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
