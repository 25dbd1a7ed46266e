use crate::entities::{PledgeStatus, pledges};
use crate::models::MemberSummary;
use crate::utils::from_cents;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PledgeResponse {
    pub id: i64,
    pub member_id: i64,
    pub pledge_type: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub amount_pledged: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub amount_paid: Decimal,
    pub pledge_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub status: PledgeStatus,
    pub description: Option<String>,
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberSummary>,
}

impl From<pledges::Model> for PledgeResponse {
    fn from(p: pledges::Model) -> Self {
        Self {
            id: p.id,
            member_id: p.member_id,
            pledge_type: p.pledge_type,
            amount_pledged: from_cents(p.amount_pledged_cents),
            amount_paid: from_cents(p.amount_paid_cents),
            pledge_date: p.pledge_date,
            due_date: p.due_date,
            status: p.status,
            description: p.description,
            recorded_by: p.recorded_by,
            created_at: p.created_at,
            updated_at: p.updated_at,
            member: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePledgeRequest {
    pub member_id: Option<i64>,
    pub pledge_type: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount_pledged: Option<Decimal>,
    /// YYYY-MM-DD, defaults to today
    pub pledge_date: Option<String>,
    pub due_date: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePledgeRequest {
    pub pledge_type: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub amount_pledged: Option<Decimal>,
    pub pledge_date: Option<String>,
    pub due_date: Option<String>,
    pub status: Option<PledgeStatus>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PledgePaymentRequest {
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PledgeQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<PledgeStatus>,
    pub member_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivePledgeTotals {
    pub count: u64,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub total_pledged: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub total_paid: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub outstanding: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PledgeSummaryResponse {
    pub active: ActivePledgeTotals,
    /// Number of completed pledges
    pub completed: u64,
}
