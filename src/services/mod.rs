pub mod auth_service;
pub mod budget_service;
pub mod donation_service;
pub mod expense_service;
pub mod member_service;
pub mod offering_type_service;
pub mod pledge_service;
pub mod query_support;
pub mod report_service;

pub use auth_service::*;
pub use budget_service::*;
pub use donation_service::*;
pub use expense_service::*;
pub use member_service::*;
pub use offering_type_service::*;
pub use pledge_service::*;
pub use report_service::*;

use crate::utils::JwtService;
use actix_web::web;
use sea_orm::DatabaseConnection;

/// Registers every service as shared app data.
pub fn register_services(
    pool: DatabaseConnection,
    jwt_service: JwtService,
) -> impl Fn(&mut web::ServiceConfig) + Clone {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(AuthService::new(pool.clone(), jwt_service.clone())))
            .app_data(web::Data::new(MemberService::new(pool.clone())))
            .app_data(web::Data::new(OfferingTypeService::new(pool.clone())))
            .app_data(web::Data::new(DonationService::new(pool.clone())))
            .app_data(web::Data::new(PledgeService::new(pool.clone())))
            .app_data(web::Data::new(ExpenseService::new(pool.clone())))
            .app_data(web::Data::new(BudgetService::new(pool.clone())))
            .app_data(web::Data::new(ReportService::new(pool.clone())));
    }
}
