use crate::entities::{ReportType, financial_reports};
use crate::models::{DonationTypeBreakdown, ExpenseCategoryBreakdown, UserSummary};
use crate::utils::from_cents;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub donations: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub expenses: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub net: Decimal,
}

impl PeriodTotals {
    pub fn from_cents(donations: i64, expenses: i64) -> Self {
        Self {
            donations: from_cents(donations),
            expenses: from_cents(expenses),
            net: from_cents(donations - expenses),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PendingTotals {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub expenses: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub this_month: PeriodTotals,
    pub all_time: PeriodTotals,
    pub pending: PendingTotals,
    pub donations_by_type: Vec<DonationTypeBreakdown>,
    pub expenses_by_category: Vec<ExpenseCategoryBreakdown>,
}

/// Breakdown snapshot persisted with a generated report.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub donations_by_type: Vec<DonationTypeBreakdown>,
    pub expenses_by_category: Vec<ExpenseCategoryBreakdown>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: i64,
    pub report_name: String,
    pub report_type: ReportType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub total_donations: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub total_expenses: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub net_balance: Decimal,
    pub generated_by: i64,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<UserSummary>,
}

impl TryFrom<financial_reports::Model> for ReportResponse {
    type Error = serde_json::Error;

    fn try_from(r: financial_reports::Model) -> Result<Self, Self::Error> {
        let data = match r.data.as_deref() {
            Some(raw) => serde_json::from_str(raw)?,
            None => serde_json::Value::Null,
        };
        Ok(Self {
            id: r.id,
            report_name: r.report_name,
            report_type: r.report_type,
            start_date: r.start_date,
            end_date: r.end_date,
            total_donations: from_cents(r.total_donations_cents),
            total_expenses: from_cents(r.total_expenses_cents),
            net_balance: from_cents(r.net_balance_cents),
            generated_by: r.generated_by,
            data,
            created_at: r.created_at,
            updated_at: r.updated_at,
            generator: None,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub report_type: Option<ReportType>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub report_type: Option<ReportType>,
}
