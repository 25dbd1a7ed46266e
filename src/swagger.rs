use actix_web::{HttpResponse, web};
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

use crate::entities::{
    DonationType, ExpenseStatus, Gender, MaritalStatus, PaymentMethod, PledgeStatus, ReportType,
    UserRole,
};
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health,
        handlers::auth::login,
        handlers::auth::me,
        handlers::auth::logout,
        handlers::member::list_members,
        handlers::member::get_member,
        handlers::member::get_tithe_history,
        handlers::member::create_member,
        handlers::member::update_member,
        handlers::member::delete_member,
        handlers::offering_type::list_offering_types,
        handlers::offering_type::list_active_offering_types,
        handlers::offering_type::get_offering_type,
        handlers::offering_type::create_offering_type,
        handlers::offering_type::update_offering_type,
        handlers::offering_type::delete_offering_type,
        handlers::donation::list_donations,
        handlers::donation::get_donation,
        handlers::donation::create_donation,
        handlers::donation::update_donation,
        handlers::donation::delete_donation,
        handlers::pledge::list_pledges,
        handlers::pledge::get_pledge_summary,
        handlers::pledge::get_pledge,
        handlers::pledge::create_pledge,
        handlers::pledge::update_pledge,
        handlers::pledge::record_pledge_payment,
        handlers::pledge::delete_pledge,
        handlers::expense::list_expenses,
        handlers::expense::get_expense,
        handlers::expense::create_expense,
        handlers::expense::update_expense,
        handlers::expense::approve_expense,
        handlers::expense::reject_expense,
        handlers::expense::delete_expense,
        handlers::budget::list_budgets,
        handlers::budget::get_budget,
        handlers::budget::create_budget,
        handlers::budget::update_budget,
        handlers::budget::delete_budget,
        handlers::report::get_dashboard,
        handlers::report::generate_report,
        handlers::report::list_reports,
        handlers::report::get_report,
    ),
    components(
        schemas(
            UserRole,
            Gender,
            MaritalStatus,
            DonationType,
            PaymentMethod,
            PledgeStatus,
            ExpenseStatus,
            ReportType,
            UserResponse,
            UserSummary,
            LoginRequest,
            LoginResponse,
            MemberResponse,
            MemberSummary,
            MemberDetailResponse,
            CreateMemberRequest,
            UpdateMemberRequest,
            TitheSummary,
            TitheHistoryResponse,
            OfferingTypeResponse,
            OfferingTypeSummary,
            CreateOfferingTypeRequest,
            UpdateOfferingTypeRequest,
            DonationResponse,
            CreateDonationRequest,
            UpdateDonationRequest,
            PledgeResponse,
            CreatePledgeRequest,
            UpdatePledgeRequest,
            PledgePaymentRequest,
            ActivePledgeTotals,
            PledgeSummaryResponse,
            ExpenseResponse,
            CreateExpenseRequest,
            UpdateExpenseRequest,
            BudgetResponse,
            CreateBudgetRequest,
            UpdateBudgetRequest,
            BreakdownEntry,
            DonationTypeBreakdown,
            ExpenseCategoryBreakdown,
            PeriodTotals,
            PendingTotals,
            DashboardResponse,
            ReportData,
            ReportResponse,
            GenerateReportRequest,
            PageMeta,
            ApiError,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health check"),
        (name = "auth", description = "Authentication API"),
        (name = "members", description = "Member directory API"),
        (name = "offering-types", description = "Offering type catalogue API"),
        (name = "donations", description = "Donation records API"),
        (name = "pledges", description = "Pledge and pledge payment API"),
        (name = "expenses", description = "Expense and approval API"),
        (name = "budgets", description = "Budget API"),
        (name = "reports", description = "Dashboard and financial report API"),
    ),
    info(
        title = "Church Finance API",
        version = "1.0.0",
        description = "Church finance REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/api-docs/openapi.json", web::get().to(openapi_json));
}
