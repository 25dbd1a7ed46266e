use crate::middlewares::{CHURCH_STAFF, RequireRole, current_user};
use crate::models::*;
use crate::services::ReportService;
use actix_web::{HttpRequest, HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/reports/dashboard",
    tag = "reports",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Month, all-time and pending figures", body = DashboardResponse)
    )
)]
pub async fn get_dashboard(report_service: web::Data<ReportService>) -> Result<HttpResponse> {
    let dashboard = report_service.dashboard().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(dashboard)))
}

#[utoipa::path(
    post,
    path = "/reports/generate",
    tag = "reports",
    request_body = GenerateReportRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Report stored", body = ReportResponse),
        (status = 400, description = "Missing fields or inverted period", body = ErrorResponse)
    )
)]
pub async fn generate_report(
    report_service: web::Data<ReportService>,
    req: HttpRequest,
    request: web::Json<GenerateReportRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let report = report_service
        .generate(user.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        report,
        "Report generated successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    params(ReportQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated stored reports, newest first")
    )
)]
pub async fn list_reports(
    report_service: web::Data<ReportService>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse> {
    let page = report_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/reports/{id}",
    tag = "reports",
    params(("id" = i64, Path, description = "Report id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Stored report", body = ReportResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_report(
    report_service: web::Data<ReportService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let report = report_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(report)))
}

pub fn report_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("", web::get().to(list_reports))
            .route("/dashboard", web::get().to(get_dashboard))
            .route(
                "/generate",
                web::post()
                    .to(generate_report)
                    .wrap(RequireRole::new(CHURCH_STAFF)),
            )
            .route("/{id}", web::get().to(get_report)),
    );
}
