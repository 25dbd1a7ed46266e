use crate::entities::offering_types;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfferingTypeResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<offering_types::Model> for OfferingTypeResponse {
    fn from(t: offering_types::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            code: t.code,
            description: t.description,
            is_active: t.is_active,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfferingTypeSummary {
    pub id: i64,
    pub name: String,
    pub code: String,
}

impl From<offering_types::Model> for OfferingTypeSummary {
    fn from(t: offering_types::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            code: t.code,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferingTypeRequest {
    pub name: Option<String>,
    /// Stored upper-cased
    pub code: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOfferingTypeRequest {
    pub name: Option<String>,
    pub code: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OfferingTypeQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub active: Option<bool>,
    pub search: Option<String>,
}
