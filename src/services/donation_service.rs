use crate::entities::{
    donation_entity as donations, member_entity as members, offering_type_entity as offering_types,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::{members_by_id, offering_types_by_id, users_by_id};
use crate::utils::{
    DONATION_PREFIX, REFERENCE_ATTEMPTS, is_unique_violation, next_reference_number,
    optional_text, parse_optional_date, positive_cents, required, today,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct DonationService {
    pool: DatabaseConnection,
}

impl DonationService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        query: &DonationQuery,
    ) -> AppResult<PaginatedResponse<DonationResponse>> {
        let params = PaginationParams::new(query.page, query.limit, RECORD_PAGE_SIZE);
        let start = parse_optional_date(query.start_date.as_deref(), "startDate")?;
        let end = parse_optional_date(query.end_date.as_deref(), "endDate")?;

        let mut base_query =
            donations::Entity::find().filter(donations::Column::DeletedAt.is_null());
        if let Some(donation_type) = query.donation_type {
            base_query = base_query.filter(donations::Column::DonationType.eq(donation_type));
        }
        if let Some(member_id) = query.member_id {
            base_query = base_query.filter(donations::Column::MemberId.eq(member_id));
        }
        if let Some(offering_type_id) = query.offering_type_id {
            base_query = base_query.filter(donations::Column::OfferingTypeId.eq(offering_type_id));
        }
        if let Some(start) = start {
            base_query = base_query.filter(donations::Column::DonationDate.gte(start));
        }
        if let Some(end) = end {
            base_query = base_query.filter(donations::Column::DonationDate.lte(end));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_desc(donations::Column::DonationDate)
            .order_by_desc(donations::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let data = self.with_relations(rows).await?;
        Ok(PaginatedResponse::new(data, &params, total))
    }

    pub async fn get(&self, id: i64) -> AppResult<DonationResponse> {
        let donation = self.find_live(id).await?;
        self.with_relations(vec![donation])
            .await?
            .pop()
            .ok_or_else(|| AppError::NotFound("Donation not found".to_string()))
    }

    pub async fn create(
        &self,
        recorded_by: i64,
        request: CreateDonationRequest,
    ) -> AppResult<DonationResponse> {
        let member_id = required(request.member_id, "memberId")?;
        let amount_cents = positive_cents(required(request.amount, "amount")?, "amount")?;
        self.ensure_member(member_id).await?;
        if let Some(offering_type_id) = request.offering_type_id {
            self.ensure_offering_type(offering_type_id).await?;
        }
        let donation_date = parse_optional_date(request.donation_date.as_deref(), "donationDate")?
            .unwrap_or_else(today);

        let now = Utc::now();
        let draft = donations::ActiveModel {
            member_id: Set(member_id),
            amount_cents: Set(amount_cents),
            donation_type: Set(request.donation_type.unwrap_or_default()),
            offering_type_id: Set(request.offering_type_id),
            description: Set(optional_text(request.description)),
            donation_date: Set(donation_date),
            payment_method: Set(request.payment_method.unwrap_or_default()),
            recorded_by: Set(recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        };

        let mut attempt = 1;
        let donation = loop {
            let reference_number = next_reference_number::<donations::Entity, _>(
                &self.pool,
                DONATION_PREFIX,
                donations::Column::ReferenceNumber,
            )
            .await?;
            let mut candidate = draft.clone();
            candidate.reference_number = Set(reference_number.clone());
            match candidate.insert(&self.pool).await {
                Ok(donation) => break donation,
                Err(err) if attempt < REFERENCE_ATTEMPTS && is_unique_violation(&err) => {
                    log::warn!("Reference {reference_number} was taken concurrently, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        };

        log::info!(
            "Donation {} recorded by user {recorded_by}: {} cents from member {member_id}",
            donation.reference_number,
            donation.amount_cents
        );
        self.get(donation.id).await
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateDonationRequest,
    ) -> AppResult<DonationResponse> {
        let existing = self.find_live(id).await?;
        let mut am = existing.into_active_model();

        if let Some(member_id) = request.member_id {
            self.ensure_member(member_id).await?;
            am.member_id = Set(member_id);
        }
        if let Some(amount) = request.amount {
            am.amount_cents = Set(positive_cents(amount, "amount")?);
        }
        if let Some(donation_type) = request.donation_type {
            am.donation_type = Set(donation_type);
        }
        if let Some(offering_type_id) = request.offering_type_id {
            self.ensure_offering_type(offering_type_id).await?;
            am.offering_type_id = Set(Some(offering_type_id));
        }
        if request.description.is_some() {
            am.description = Set(optional_text(request.description));
        }
        if let Some(date) = parse_optional_date(request.donation_date.as_deref(), "donationDate")? {
            am.donation_date = Set(date);
        }
        if let Some(method) = request.payment_method {
            am.payment_method = Set(method);
        }
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

        log::info!("Donation {id} soft-deleted");
        Ok(())
    }

    async fn find_live(&self, id: i64) -> AppResult<donations::Model> {
        donations::Entity::find_by_id(id)
            .filter(donations::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Donation not found".to_string()))
    }

    async fn ensure_member(&self, member_id: i64) -> AppResult<()> {
        let exists = members::Entity::find_by_id(member_id)
            .filter(members::Column::DeletedAt.is_null())
            .count(&self.pool)
            .await?;
        if exists == 0 {
            return Err(AppError::ValidationError(format!(
                "Member {member_id} does not exist"
            )));
        }
        Ok(())
    }

    async fn ensure_offering_type(&self, offering_type_id: i64) -> AppResult<()> {
        let exists = offering_types::Entity::find_by_id(offering_type_id)
            .count(&self.pool)
            .await?;
        if exists == 0 {
            return Err(AppError::ValidationError(format!(
                "Offering type {offering_type_id} does not exist"
            )));
        }
        Ok(())
    }

    /// Inlines member, recording user and offering type with one query per relation.
    async fn with_relations(&self, rows: Vec<donations::Model>) -> AppResult<Vec<DonationResponse>> {
        let members = members_by_id(&self.pool, rows.iter().map(|d| d.member_id)).await?;
        let users = users_by_id(&self.pool, rows.iter().map(|d| d.recorded_by)).await?;
        let types =
            offering_types_by_id(&self.pool, rows.iter().filter_map(|d| d.offering_type_id))
                .await?;

        Ok(rows
            .into_iter()
            .map(|d| {
                let member = members.get(&d.member_id).cloned().map(Into::into);
                let recorded_by_user = users.get(&d.recorded_by).cloned().map(Into::into);
                let offering_type = d
                    .offering_type_id
                    .and_then(|id| types.get(&id).cloned())
                    .map(Into::into);
                DonationResponse {
                    member,
                    recorded_by_user,
                    offering_type,
                    ..d.into()
                }
            })
            .collect())
    }
}
