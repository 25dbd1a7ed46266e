use crate::entities::{Gender, MaritalStatus, members};
use crate::models::DonationResponse;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: i64,
    pub member_number: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: Option<String>,
    pub join_date: NaiveDate,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<members::Model> for MemberResponse {
    fn from(m: members::Model) -> Self {
        Self {
            id: m.id,
            member_number: m.member_number,
            full_name: m.full_name,
            phone: m.phone,
            email: m.email,
            address: m.address,
            date_of_birth: m.date_of_birth,
            gender: m.gender,
            marital_status: m.marital_status,
            occupation: m.occupation,
            join_date: m.join_date,
            is_active: m.is_active,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Member reference inlined into donations and pledges.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: i64,
    pub member_number: String,
    pub full_name: String,
}

impl From<members::Model> for MemberSummary {
    fn from(m: members::Model) -> Self {
        Self {
            id: m.id,
            member_number: m.member_number,
            full_name: m.full_name,
        }
    }
}

/// A member with its most recent donations.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetailResponse {
    #[serde(flatten)]
    pub member: MemberResponse,
    pub donations: Vec<DonationResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub member_number: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    /// YYYY-MM-DD
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: Option<String>,
    /// YYYY-MM-DD, defaults to today
    pub join_date: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    pub member_number: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub occupation: Option<String>,
    pub join_date: Option<String>,
    pub is_active: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct MemberQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Case-insensitive match on name, member number, phone or email
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TitheHistoryQuery {
    pub year: Option<i32>,
    /// 1-12, only applied together with `year`
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitheSummary {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub total_amount: Decimal,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TitheHistoryResponse {
    pub member: MemberResponse,
    pub donations: Vec<DonationResponse>,
    pub summary: TitheSummary,
}
