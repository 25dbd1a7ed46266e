use crate::middlewares::{FINANCE_STAFF, RequireRole, current_user};
use crate::models::*;
use crate::services::DonationService;
use actix_web::{HttpRequest, HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/donations",
    tag = "donations",
    params(DonationQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated donations, newest first"),
        (status = 401, description = "Missing token", body = ErrorResponse)
    )
)]
pub async fn list_donations(
    donation_service: web::Data<DonationService>,
    query: web::Query<DonationQuery>,
) -> Result<HttpResponse> {
    let page = donation_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/donations/{id}",
    tag = "donations",
    params(("id" = i64, Path, description = "Donation id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Donation with member, recorder and offering type", body = DonationResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_donation(
    donation_service: web::Data<DonationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let donation = donation_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(donation)))
}

#[utoipa::path(
    post,
    path = "/donations",
    tag = "donations",
    request_body = CreateDonationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Donation recorded", body = DonationResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 403, description = "Role not allowed", body = ErrorResponse)
    )
)]
pub async fn create_donation(
    donation_service: web::Data<DonationService>,
    req: HttpRequest,
    request: web::Json<CreateDonationRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let donation = donation_service
        .create(user.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        donation,
        "Donation recorded successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/donations/{id}",
    tag = "donations",
    params(("id" = i64, Path, description = "Donation id")),
    request_body = UpdateDonationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Donation updated", body = DonationResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_donation(
    donation_service: web::Data<DonationService>,
    path: web::Path<i64>,
    request: web::Json<UpdateDonationRequest>,
) -> Result<HttpResponse> {
    let donation = donation_service
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        donation,
        "Donation updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/donations/{id}",
    tag = "donations",
    params(("id" = i64, Path, description = "Donation id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Donation deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_donation(
    donation_service: web::Data<DonationService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    donation_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Donation deleted successfully")))
}

pub fn donation_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/donations")
            .route("", web::get().to(list_donations))
            .route(
                "",
                web::post()
                    .to(create_donation)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route("/{id}", web::get().to(get_donation))
            .route(
                "/{id}",
                web::put()
                    .to(update_donation)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_donation)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            ),
    );
}
