pub mod auth;
pub mod budget;
pub mod donation;
pub mod expense;
pub mod health;
pub mod member;
pub mod offering_type;
pub mod pledge;
pub mod report;

pub use auth::auth_config;
pub use budget::budget_config;
pub use donation::donation_config;
pub use expense::expense_config;
pub use health::health_config;
pub use member::member_config;
pub use offering_type::offering_type_config;
pub use pledge::pledge_config;
pub use report::report_config;

use crate::error::AppError;
use actix_web::{HttpResponse, ResponseError, web};

/// Mounts every resource under `/api`, with extractor failures rendered in
/// the standard error envelope.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_err, _req| AppError::NotFound("Route not found".to_string()).into()),
    )
    .service(
        web::scope("/api")
            .configure(health_config)
            .configure(auth_config)
            .configure(member_config)
            .configure(offering_type_config)
            .configure(donation_config)
            .configure(pledge_config)
            .configure(expense_config)
            .configure(budget_config)
            .configure(report_config),
    );
}

/// Fallback for anything no route matched.
pub async fn not_found() -> HttpResponse {
    AppError::NotFound("Route not found".to_string()).error_response()
}
