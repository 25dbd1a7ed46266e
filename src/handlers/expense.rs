use crate::middlewares::{FINANCE_STAFF, RequireRole, current_user};
use crate::models::*;
use crate::services::ExpenseService;
use actix_web::{HttpRequest, HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/expenses",
    tag = "expenses",
    params(ExpenseQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Paginated expenses, newest first")
    )
)]
pub async fn list_expenses(
    expense_service: web::Data<ExpenseService>,
    query: web::Query<ExpenseQuery>,
) -> Result<HttpResponse> {
    let page = expense_service.list(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[utoipa::path(
    get,
    path = "/expenses/{id}",
    tag = "expenses",
    params(("id" = i64, Path, description = "Expense id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Expense with approver", body = ExpenseResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_expense(
    expense_service: web::Data<ExpenseService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let expense = expense_service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(expense)))
}

#[utoipa::path(
    post,
    path = "/expenses",
    tag = "expenses",
    request_body = CreateExpenseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Expense created as pending", body = ExpenseResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse)
    )
)]
pub async fn create_expense(
    expense_service: web::Data<ExpenseService>,
    request: web::Json<CreateExpenseRequest>,
) -> Result<HttpResponse> {
    let expense = expense_service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::success_with_message(
        expense,
        "Expense created successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/expenses/{id}",
    tag = "expenses",
    params(("id" = i64, Path, description = "Expense id")),
    request_body = UpdateExpenseRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Expense updated", body = ExpenseResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    path: web::Path<i64>,
    request: web::Json<UpdateExpenseRequest>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let expense = expense_service
        .update(path.into_inner(), user.id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        expense,
        "Expense updated successfully",
    )))
}

#[utoipa::path(
    put,
    path = "/expenses/{id}/approve",
    tag = "expenses",
    params(("id" = i64, Path, description = "Expense id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Expense approved by the caller", body = ExpenseResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn approve_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let expense = expense_service.approve(path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        expense,
        "Expense approved",
    )))
}

#[utoipa::path(
    put,
    path = "/expenses/{id}/reject",
    tag = "expenses",
    params(("id" = i64, Path, description = "Expense id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Expense rejected by the caller", body = ExpenseResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn reject_expense(
    expense_service: web::Data<ExpenseService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let user = current_user(&req)?;
    let expense = expense_service.reject(path.into_inner(), user.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        expense,
        "Expense rejected",
    )))
}

#[utoipa::path(
    delete,
    path = "/expenses/{id}",
    tag = "expenses",
    params(("id" = i64, Path, description = "Expense id")),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Expense deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_expense(
    expense_service: web::Data<ExpenseService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    expense_service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message("Expense deleted successfully")))
}

pub fn expense_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/expenses")
            .route("", web::get().to(list_expenses))
            .route(
                "",
                web::post()
                    .to(create_expense)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route("/{id}", web::get().to(get_expense))
            .route(
                "/{id}",
                web::put()
                    .to(update_expense)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route(
                "/{id}",
                web::delete()
                    .to(delete_expense)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route(
                "/{id}/approve",
                web::put()
                    .to(approve_expense)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            )
            .route(
                "/{id}/reject",
                web::put()
                    .to(reject_expense)
                    .wrap(RequireRole::new(FINANCE_STAFF)),
            ),
    );
}
