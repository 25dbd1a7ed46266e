use crate::middlewares::{FINANCE_STAFF, RequireRole, current_user};
use crate::models::*;
use crate::services::BudgetService;
use actix_web::{HttpRequest, HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/budgets",
    tag = "budgets",
    params(BudgetQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated budgets, latest period first")
    )
)]
pub async fn list_budgets(
    budget_service: web::Data<BudgetService>,
    query: web::Query<BudgetQuery>,
) -> Result<HttpResponse> {
    let page = budget_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/budgets/{id}",
    tag = "budgets",
    params(("id" = i64, Path, description = "Budget id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Budget with creator", body = BudgetResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_budget(
    budget_service: web::Data<BudgetService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let budget = budget_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(budget)))
}

#[utoipa::path(
    post,
    path = "/budgets",
    tag = "budgets",
    request_body = CreateBudgetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Budget created", body = BudgetResponse),
        (status = 400, description = "Missing fields or endDate before startDate", body = ErrorResponse)
    )
)]
pub async fn create_budget(
    budget_service: web::Data<BudgetService>,
    req: HttpRequest,
    request: web::Json<CreateBudgetRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let budget = budget_service.create(user.id, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        budget,
        "Budget created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/budgets/{id}",
    tag = "budgets",
    params(("id" = i64, Path, description = "Budget id")),
    request_body = UpdateBudgetRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Budget updated", body = BudgetResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_budget(
    budget_service: web::Data<BudgetService>,
    path: web::Path<i64>,
    request: web::Json<UpdateBudgetRequest>,
) -> Result<HttpResponse> {
    let budget = budget_service
        .update(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        budget,
        "Budget updated successfully",
    )))
}

#[utoipa::path(
    delete,
    path = "/budgets/{id}",
    tag = "budgets",
    params(("id" = i64, Path, description = "Budget id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Budget deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_budget(
    budget_service: web::Data<BudgetService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    budget_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Budget deleted successfully")))
}

pub fn budget_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/budgets")
            .route("", web::get().to(list_budgets))
            .route(
                "",
                web::post()
                    .to(create_budget)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route("/{id}", web::get().to(get_budget))
            .route(
                "/{id}",
                web::put()
                    .to(update_budget)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_budget)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            ),
    );
}
