use crate::entities::{donation_entity as donations, offering_type_entity as offering_types};
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::services::query_support::contains_ci;
use crate::utils::{optional_text, required_text};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

#[derive(Clone)]
pub struct OfferingTypeService {
    pool: DatabaseConnection,
}

impl OfferingTypeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        query: &OfferingTypeQuery,
    ) -> AppResult<PaginatedResponse<OfferingTypeResponse>> {
        let params = PaginationParams::new(query.page, query.limit, DIRECTORY_PAGE_SIZE);

        let mut base_query = offering_types::Entity::find();
        if let Some(active) = query.active {
            base_query = base_query.filter(offering_types::Column::IsActive.eq(active));
        }
        if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            base_query = base_query.filter(
                Condition::any()
                    .add(contains_ci(offering_types::Column::Name, search))
                    .add(contains_ci(offering_types::Column::Code, search))
                    .add(contains_ci(offering_types::Column::Description, search)),
            );
        }

        let total = base_query.clone().count(&self.pool).await?;

        let rows = base_query
            .order_by_desc(offering_types::Column::CreatedAt)
            .order_by_desc(offering_types::Column::Id)
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

    /// Active types ordered by name, for donation forms.
    pub async fn list_active(&self) -> AppResult<Vec<OfferingTypeResponse>> {
        let rows = offering_types::Entity::find()
            .filter(offering_types::Column::IsActive.eq(true))
            .order_by_asc(offering_types::Column::Name)
            .all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> AppResult<OfferingTypeResponse> {
        Ok(self.find(id).await?.into())
    }

    pub async fn create(
        &self,
        request: CreateOfferingTypeRequest,
    ) -> AppResult<OfferingTypeResponse> {
        let name = required_text(request.name, "name")?;
        let code = required_text(request.code, "code")?.to_uppercase();
        self.ensure_unique(&name, &code, None).await?;

        let now = Utc::now();
        let offering_type = offering_types::ActiveModel {
            name: Set(name),
            code: Set(code),
            description: Set(optional_text(request.description)),
            is_active: Set(request.is_active.unwrap_or(true)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!(
            "Offering type {} ({}) created",
            offering_type.id,
            offering_type.code
        );
        Ok(offering_type.into())
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateOfferingTypeRequest,
    ) -> AppResult<OfferingTypeResponse> {
        let existing = self.find(id).await?;

        let name = request
            .name
            .map(|n| required_text(Some(n), "name"))
            .transpose()?;
        let code = request
            .code
            .map(|c| required_text(Some(c), "code").map(|c| c.to_uppercase()))
            .transpose()?;

        self.ensure_unique(
            name.as_deref().unwrap_or(&existing.name),
            code.as_deref().unwrap_or(&existing.code),
            Some(id),
        )
        .await?;

        let mut am = existing.into_active_model();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(code) = code {
            am.code = Set(code);
        }
        if request.description.is_some() {
            am.description = Set(optional_text(request.description));
        }
        if let Some(is_active) = request.is_active {
            am.is_active = Set(is_active);
        }
        am.updated_at = Set(Utc::now());

        let updated = am.update(&self.pool).await?;
        Ok(updated.into())
    }

    /// Hard delete; refused while any donation still points at the type.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let existing = self.find(id).await?;

        let in_use = donations::Entity::find()
            .filter(donations::Column::OfferingTypeId.eq(id))
            .count(&self.pool)
            .await?;
        if in_use > 0 {
            return Err(AppError::Conflict(
                "Offering type is referenced by existing donations".to_string(),
            ));
        }

        existing.delete(&self.pool).await?;
        log::info!("Offering type {id} deleted");
        Ok(())
    }

    async fn find(&self, id: i64) -> AppResult<offering_types::Model> {
        offering_types::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Offering type not found".to_string()))
    }

    async fn ensure_unique(&self, name: &str, code: &str, except_id: Option<i64>) -> AppResult<()> {
        let mut code_query =
            offering_types::Entity::find().filter(offering_types::Column::Code.eq(code));
        let mut name_query =
            offering_types::Entity::find().filter(offering_types::Column::Name.eq(name));
        if let Some(id) = except_id {
            code_query = code_query.filter(offering_types::Column::Id.ne(id));
            name_query = name_query.filter(offering_types::Column::Id.ne(id));
        }

        if code_query.count(&self.pool).await? > 0 {
            return Err(AppError::Conflict(
                "Offering type code already exists".to_string(),
            ));
        }
        if name_query.count(&self.pool).await? > 0 {
            return Err(AppError::Conflict(
                "Offering type name already exists".to_string(),
            ));
        }
        Ok(())
    }
}
