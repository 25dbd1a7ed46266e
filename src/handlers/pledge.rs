use crate::middlewares::{ADMIN_ONLY, CHURCH_STAFF, RequireRole, current_user};
use crate::models::*;
use crate::services::PledgeService;
use actix_web::{HttpRequest, HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/pledges",
    tag = "pledges",
    params(PledgeQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated pledges, newest first")
    )
)]
pub async fn list_pledges(
    pledge_service: web::Data<PledgeService>,
    query: web::Query<PledgeQuery>,
) -> Result<HttpResponse> {
    let page = pledge_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/pledges/summary",
    tag = "pledges",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Active pledge totals and completed count", body = PledgeSummaryResponse)
    )
)]
pub async fn get_pledge_summary(pledge_service: web::Data<PledgeService>) -> Result<HttpResponse> {
    let summary = pledge_service.summary().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}

#[utoipa::path(
    get,
    path = "/pledges/{id}",
    tag = "pledges",
    params(("id" = i64, Path, description = "Pledge id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pledge with member", body = PledgeResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_pledge(
    pledge_service: web::Data<PledgeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let pledge = pledge_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(pledge)))
}

#[utoipa::path(
    post,
    path = "/pledges",
    tag = "pledges",
    request_body = CreatePledgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Pledge created", body = PledgeResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_pledge(
    pledge_service: web::Data<PledgeService>,
    req: HttpRequest,
    request: web::Json<CreatePledgeRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let pledge = pledge_service.create(user.id, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        pledge,
        "Pledge created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/pledges/{id}",
    tag = "pledges",
    params(("id" = i64, Path, description = "Pledge id")),
    request_body = UpdatePledgeRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pledge updated", body = PledgeResponse),
        (status = 400, description = "Update would break the paid/pledged invariant", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_pledge(
    pledge_service: web::Data<PledgeService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePledgeRequest>,
) -> Result<HttpResponse> {
    let pledge = pledge_service
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        pledge,
        "Pledge updated successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/pledges/{id}/payments",
    tag = "pledges",
    params(("id" = i64, Path, description = "Pledge id")),
    request_body = PledgePaymentRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Payment applied", body = PledgeResponse),
        (status = 400, description = "Non-positive amount or overpayment", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn record_pledge_payment(
    pledge_service: web::Data<PledgeService>,
    path: web::Path<i64>,
    request: web::Json<PledgePaymentRequest>,
) -> Result<HttpResponse> {
    let pledge = pledge_service
        .record_payment(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        pledge,
        "Payment recorded successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/pledges/{id}",
    tag = "pledges",
    params(("id" = i64, Path, description = "Pledge id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Pledge deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_pledge(
    pledge_service: web::Data<PledgeService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    pledge_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Pledge deleted successfully")))
}

pub fn pledge_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pledges")
            .route("", web::get().to(list_pledges))
            .route(
                "",
                web::post()
                    .to(create_pledge)
                    .wrap(RequireRole::new(CHURCH_STAFF)),
            )
            // before /{id} so "summary" is not read as an id
            .route("/summary", web::get().to(get_pledge_summary))
            .route("/{id}", web::get().to(get_pledge))
            .route(
                "/{id}",
                web::put()
                    .to(update_pledge)
                    .wrap(RequireRole::new(CHURCH_STAFF)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_pledge)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            )
            .route(
                "/{id}/payments",
                web::post()
                    .to(record_pledge_payment)
                    .wrap(RequireRole::new(CHURCH_STAFF)),
            ),
    );
}
