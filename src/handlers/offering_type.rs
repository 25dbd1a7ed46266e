use crate::middlewares::{ADMIN_ONLY, RequireRole};
use crate::models::*;
use crate::services::OfferingTypeService;
use actix_web::{HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/offering-types",
    tag = "offering-types",
    params(OfferingTypeQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated offering types")
    )
)]
pub async fn list_offering_types(
    offering_type_service: web::Data<OfferingTypeService>,
    query: web::Query<OfferingTypeQuery>,
) -> Result<HttpResponse> {
    let page = offering_type_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Public: the giving form needs this list before anyone logs in.
#[utoipa::path(
    get,
    path = "/offering-types/active",
    tag = "offering-types",
    responses(
        (status = 200, description = "Active offering types ordered by name", body = [OfferingTypeResponse])
    )
)]
pub async fn list_active_offering_types(
    offering_type_service: web::Data<OfferingTypeService>,
) -> Result<HttpResponse> {
    let types = offering_type_service.list_active().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(types)))
}

#[utoipa::path(
    get,
    path = "/offering-types/{id}",
    tag = "offering-types",
    params(("id" = i64, Path, description = "Offering type id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Offering type", body = OfferingTypeResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_offering_type(
    offering_type_service: web::Data<OfferingTypeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let offering_type = offering_type_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(offering_type)))
}

#[utoipa::path(
    post,
    path = "/offering-types",
    tag = "offering-types",
    request_body = CreateOfferingTypeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Offering type created", body = OfferingTypeResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 409, description = "Name or code already used", body = ErrorResponse)
    )
)]
pub async fn create_offering_type(
    offering_type_service: web::Data<OfferingTypeService>,
    request: web::Json<CreateOfferingTypeRequest>,
) -> Result<HttpResponse> {
    let offering_type = offering_type_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        offering_type,
        "Offering type created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/offering-types/{id}",
    tag = "offering-types",
    params(("id" = i64, Path, description = "Offering type id")),
    request_body = UpdateOfferingTypeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Offering type updated", body = OfferingTypeResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Name or code already used", body = ErrorResponse)
    )
)]
pub async fn update_offering_type(
    offering_type_service: web::Data<OfferingTypeService>,
    path: web::Path<i64>,
    request: web::Json<UpdateOfferingTypeRequest>,
) -> Result<HttpResponse> {
    let offering_type = offering_type_service
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        offering_type,
        "Offering type updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/offering-types/{id}",
    tag = "offering-types",
    params(("id" = i64, Path, description = "Offering type id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Offering type deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Donations still reference it", body = ErrorResponse)
    )
)]
pub async fn delete_offering_type(
    offering_type_service: web::Data<OfferingTypeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    offering_type_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message(
        "Offering type deleted successfully",
    )))
}

pub fn offering_type_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/offering-types")
            .route(
                "",
                web::get()
                    .to(list_offering_types)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            )
            .route(
                "",
                web::post()
                    .to(create_offering_type)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            )
            .route("/active", web::get().to(list_active_offering_types))
            .route(
                "/{id}",
                web::get()
                    .to(get_offering_type)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            )
            .route(
                "/{id}",
                web::put()
                    .to(update_offering_type)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_offering_type)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            ),
    );
}
