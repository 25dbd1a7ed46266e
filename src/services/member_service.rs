use crate::entities::{DonationType, donation_entity as donations, member_entity as members};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::contains_ci;
use crate::utils::{
    from_cents, optional_text, parse_optional_date, period_bounds, required_text, today,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

const RECENT_DONATIONS: u64 = 10;

#[derive(Clone)]
pub struct MemberService {
    pool: DatabaseConnection,
}

impl MemberService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(&self, query: &MemberQuery) -> AppResult<PaginatedResponse<MemberResponse>> {
        let params = PaginationParams::new(query.page, query.limit, DIRECTORY_PAGE_SIZE);

        let mut base_query = members::Entity::find().filter(members::Column::DeletedAt.is_null());

        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            base_query = base_query.filter(
                Condition::any()
                    .add(contains_ci(members::Column::FullName, search))
                    .add(contains_ci(members::Column::MemberNumber, search))
                    .add(contains_ci(members::Column::Phone, search))
                    .add(contains_ci(members::Column::Email, search)),
            );
        }
        if let Some(is_active) = query.is_active {
            base_query = base_query.filter(members::Column::IsActive.eq(is_active));
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_asc(members::Column::FullName)
            .order_by_asc(members::Column::Id)
            .limit(params.get_limit())
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(Into::into).collect(),
            &params,
            total,
        ))
    }

    /// Member with its ten most recent donations.
    pub async fn get(&self, id: i64) -> AppResult<MemberDetailResponse> {
        let member = self.find_live(id).await?;

        let recent = donations::Entity::find()
            .filter(donations::Column::MemberId.eq(id))
            .filter(donations::Column::DeletedAt.is_null())
            .order_by_desc(donations::Column::DonationDate)
            .order_by_desc(donations::Column::Id)
            .limit(RECENT_DONATIONS)
            .all(&self.pool)
            .await?;

        Ok(MemberDetailResponse {
            member: member.into(),
            donations: recent.into_iter().map(Into::into).collect(),
        })
    }

    pub async fn create(&self, request: CreateMemberRequest) -> AppResult<MemberResponse> {
        let member_number = required_text(request.member_number, "memberNumber")?;
        let full_name = required_text(request.full_name, "fullName")?;
        self.ensure_number_free(&member_number, None).await?;

        let date_of_birth = parse_optional_date(request.date_of_birth.as_deref(), "dateOfBirth")?;
        let join_date = parse_optional_date(request.join_date.as_deref(), "joinDate")?
            .unwrap_or_else(today);

        let now = Utc::now();
        let member = members::ActiveModel {
            member_number: Set(member_number),
            full_name: Set(full_name),
            phone: Set(optional_text(request.phone)),
            email: Set(optional_text(request.email)),
            address: Set(optional_text(request.address)),
            date_of_birth: Set(date_of_birth),
            gender: Set(request.gender),
            marital_status: Set(request.marital_status),
            occupation: Set(optional_text(request.occupation)),
            join_date: Set(join_date),
            is_active: Set(request.is_active.unwrap_or(true)),
            notes: Set(optional_text(request.notes)),
            created_at: Set(now),
            updated_at: Set(now),
            deleted_at: Set(None),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Member {} ({}) created", member.id, member.member_number);
        Ok(member.into())
    }

    pub async fn update(&self, id: i64, request: UpdateMemberRequest) -> AppResult<MemberResponse> {
        let existing = self.find_live(id).await?;
        let mut am = existing.clone().into_active_model();

        if let Some(number) = request.member_number {
            let number = required_text(Some(number), "memberNumber")?;
            if number != existing.member_number {
                self.ensure_number_free(&number, Some(id)).await?;
            }
            am.member_number = Set(number);
        }
        if let Some(full_name) = request.full_name {
            am.full_name = Set(required_text(Some(full_name), "fullName")?);
        }
        if request.phone.is_some() {
            am.phone = Set(optional_text(request.phone));
        }
        if request.email.is_some() {
            am.email = Set(optional_text(request.email));
        }
        if request.address.is_some() {
            am.address = Set(optional_text(request.address));
        }
        if let Some(dob) = parse_optional_date(request.date_of_birth.as_deref(), "dateOfBirth")? {
            am.date_of_birth = Set(Some(dob));
        }
        if let Some(gender) = request.gender {
            am.gender = Set(Some(gender));
        }
        if let Some(status) = request.marital_status {
            am.marital_status = Set(Some(status));
        }
        if request.occupation.is_some() {
            am.occupation = Set(optional_text(request.occupation));
        }
        if let Some(join_date) = parse_optional_date(request.join_date.as_deref(), "joinDate")? {
            am.join_date = Set(join_date);
        }
        if let Some(is_active) = request.is_active {
            am.is_active = Set(is_active);
        }
        if request.notes.is_some() {
            am.notes = Set(optional_text(request.notes));
        }
        am.updated_at = Set(Utc::now());

        let member = am.update(&self.pool).await?;
        Ok(member.into())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find_live(id).await?;
        let now = Utc::now();
        let mut am = existing.into_active_model();
        am.deleted_at = Set(Some(now));
        am.updated_at = Set(now);
        am.update(&self.pool).await?;

        log::info!("Member {id} soft-deleted");
        Ok(())
    }

    /// Tithe donations of a member, optionally limited to a year or a month of it.
    pub async fn tithe_history(
        &self,
        id: i64,
        query: &TitheHistoryQuery,
    ) -> AppResult<TitheHistoryResponse> {
        let member = self.find_live(id).await?;

        let mut tithe_query = donations::Entity::find()
            .filter(donations::Column::MemberId.eq(id))
            .filter(donations::Column::DonationType.eq(DonationType::Tithe))
            .filter(donations::Column::DeletedAt.is_null());

        // month on its own is ignored
        if let Some(year) = query.year {
            let (start, end) = period_bounds(year, query.month)?;
            tithe_query = tithe_query.filter(donations::Column::DonationDate.between(start, end));
        }

        let rows = tithe_query
            .order_by_desc(donations::Column::DonationDate)
            .order_by_desc(donations::Column::Id)
            .all(&self.pool)
            .await?;

        let total_cents: i64 = rows.iter().map(|d| d.amount_cents).sum();
        let count = rows.len() as u64;

        Ok(TitheHistoryResponse {
            member: member.into(),
            donations: rows.into_iter().map(Into::into).collect(),
            summary: TitheSummary {
                total_amount: from_cents(total_cents),
                count,
            },
        })
    }

    async fn find_live(&self, id: i64) -> AppResult<members::Model> {
        members::Entity::find_by_id(id)
            .filter(members::Column::DeletedAt.is_null())
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// Member numbers stay unique across soft-deleted rows too, matching the table constraint.
    async fn ensure_number_free(&self, number: &str, except_id: Option<i64>) -> AppResult<()> {
        let mut q = members::Entity::find().filter(members::Column::MemberNumber.eq(number));
        if let Some(id) = except_id {
            q = q.filter(members::Column::Id.ne(id));
        }
        if q.count(&self.pool).await? > 0 {
            return Err(AppError::Conflict("Member number already exists".to_string()));
        }
        Ok(())
    }
}
