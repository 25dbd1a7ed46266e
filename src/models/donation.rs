use crate::entities::{DonationType, PaymentMethod, donations};
use crate::models::{MemberSummary, OfferingTypeSummary, UserSummary};
use crate::utils::from_cents;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub id: i64,
    pub member_id: i64,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub donation_type: DonationType,
    pub offering_type_id: Option<i64>,
    pub description: Option<String>,
    pub donation_date: NaiveDate,
    pub reference_number: String,
    pub payment_method: PaymentMethod,
    pub recorded_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_by_user: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offering_type: Option<OfferingTypeSummary>,
}

impl From<donations::Model> for DonationResponse {
    fn from(d: donations::Model) -> Self {
        Self {
            id: d.id,
            member_id: d.member_id,
            amount: from_cents(d.amount_cents),
            donation_type: d.donation_type,
            offering_type_id: d.offering_type_id,
            description: d.description,
            donation_date: d.donation_date,
            reference_number: d.reference_number,
            payment_method: d.payment_method,
            recorded_by: d.recorded_by,
            created_at: d.created_at,
            updated_at: d.updated_at,
            member: None,
            recorded_by_user: None,
            offering_type: None,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDonationRequest {
    pub member_id: Option<i64>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub donation_type: Option<DonationType>,
    pub offering_type_id: Option<i64>,
    pub description: Option<String>,
    /// YYYY-MM-DD, defaults to today
    pub donation_date: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDonationRequest {
    pub member_id: Option<i64>,
    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,
    pub donation_type: Option<DonationType>,
    pub offering_type_id: Option<i64>,
    pub description: Option<String>,
    pub donation_date: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DonationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(rename = "type")]
    pub donation_type: Option<DonationType>,
    pub member_id: Option<i64>,
    pub offering_type_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
