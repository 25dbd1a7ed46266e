use crate::middlewares::{ADMIN_ONLY, CHURCH_STAFF, RequireRole};
use crate::models::*;
use crate::services::MemberService;
use actix_web::{HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/members",
    tag = "members",
    params(MemberQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated members ordered by name")
    )
)]
pub async fn list_members(
    member_service: web::Data<MemberService>,
    query: web::Query<MemberQuery>,
) -> Result<HttpResponse> {
    let page = member_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member with its ten latest donations", body = MemberDetailResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_member(
    member_service: web::Data<MemberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let member = member_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(member)))
}

#[utoipa::path(
    get,
    path = "/members/{id}/tithe-history",
    tag = "members",
    params(
        ("id" = i64, Path, description = "Member id"),
        TitheHistoryQuery
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Tithe donations and their total", body = TitheHistoryResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_tithe_history(
    member_service: web::Data<MemberService>,
    path: web::Path<i64>,
    query: web::Query<TitheHistoryQuery>,
) -> Result<HttpResponse> {
    let history = member_service
        .tithe_history(path.into_inner(), &query)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(history)))
}

#[utoipa::path(
    post,
    path = "/members",
    tag = "members",
    request_body = CreateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Member created", body = MemberResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 409, description = "Member number already used", body = ErrorResponse)
    )
)]
pub async fn create_member(
    member_service: web::Data<MemberService>,
    request: web::Json<CreateMemberRequest>,
) -> Result<HttpResponse> {
    let member = member_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        member,
        "Member created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member id")),
    request_body = UpdateMemberRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member updated", body = MemberResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 409, description = "Member number already used", body = ErrorResponse)
    )
)]
pub async fn update_member(
    member_service: web::Data<MemberService>,
    path: web::Path<i64>,
    request: web::Json<UpdateMemberRequest>,
) -> Result<HttpResponse> {
    let member = member_service
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        member,
        "Member updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/members/{id}",
    tag = "members",
    params(("id" = i64, Path, description = "Member id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_member(
    member_service: web::Data<MemberService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    member_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Member deleted successfully")))
}

pub fn member_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/members")
            .route("", web::get().to(list_members))
            .route(
                "",
                web::post()
                    .to(create_member)
                    .wrap(RequireRole::new(CHURCH_STAFF)),
            )
            .route("/{id}", web::get().to(get_member))
            .route(
                "/{id}",
                web::put()
                    .to(update_member)
                    .wrap(RequireRole::new(CHURCH_STAFF)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_member)
                    .wrap(RequireRole::new(ADMIN_ONLY)),
            )
            .route("/{id}/tithe-history", web::get().to(get_tithe_history)),
    );
}
