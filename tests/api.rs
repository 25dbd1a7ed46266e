use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::{Value, json};

use church_finance::entities::{UserRole, user_entity};
use church_finance::handlers::{api_config, not_found};
use church_finance::middlewares::AuthMiddleware;
use church_finance::services::register_services;
use church_finance::swagger::swagger_config;
use church_finance::utils::{JwtService, is_unique_violation, today};

const PASSWORD: &str = "password";

struct TestUser {
    id: i64,
    token: String,
}

async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).min_connections(1);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

async fn create_user(
    db: &DatabaseConnection,
    jwt: &JwtService,
    role: UserRole,
    email: &str,
) -> TestUser {
    let now = Utc::now();
    let user = user_entity::ActiveModel {
        name: Set(format!("{role} user")),
        email: Set(email.to_string()),
        // low cost keeps the suite fast; verification works for any cost
        password_hash: Set(bcrypt::hash(PASSWORD, 4).unwrap()),
        role: Set(role),
        is_active: Set(true),
        phone: Set(None),
        address: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    let token = jwt.generate_token(user.id, &user.email, role).unwrap();
    TestUser { id: user.id, token }
}

macro_rules! init_app {
    ($db:expr, $jwt:expr) => {
        test::init_service(
            App::new()
                .wrap(AuthMiddleware::new($jwt.clone()))
                .configure(register_services($db.clone(), $jwt.clone()))
                .configure(swagger_config)
                .configure(api_config)
                .default_service(web::to(not_found)),
        )
        .await
    };
}

/// Runs a request and returns status plus JSON body, rendering middleware
/// rejections the way the HTTP layer would.
macro_rules! send {
    ($app:expr, $req:expr) => {{
        match test::try_call_service(&$app, $req.to_request()).await {
            Ok(resp) => {
                let status = resp.status();
                let body: Value = test::read_body_json(resp).await;
                (status, body)
            }
            Err(err) => {
                let resp = err.error_response();
                let status = resp.status();
                let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
                let body: Value = serde_json::from_slice(&bytes).unwrap();
                (status, body)
            }
        }
    }};
}

fn bearer(user: &TestUser) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", user.token))
}

macro_rules! create_member {
    ($app:expr, $user:expr, $number:expr, $name:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/members")
                .insert_header(bearer($user))
                .set_json(json!({ "memberNumber": $number, "fullName": $name }))
        );
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }};
}

#[actix_web::test]
async fn test_login_then_me_returns_user_without_password() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "admin@church.local", "password": PASSWORD }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "admin@church.local");
    assert_eq!(body["data"]["role"], "admin");
    assert!(body["data"].get("passwordHash").is_none());
    assert!(body["data"].get("password").is_none());
}

#[actix_web::test]
async fn test_login_rejects_bad_credentials() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "admin@church.local", "password": "wrong" }))
    );
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid credentials");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": "admin@church.local" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email and password required");
}

#[actix_web::test]
async fn test_expense_is_created_pending_and_approved_by_actor() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/expenses")
            .insert_header(bearer(&admin))
            .set_json(json!({ "category": "utilities", "description": "Power bill", "amount": 150.00 }))
    );
    assert_eq!(status, StatusCode::CREATED);
    let expense = &body["data"];
    assert_eq!(expense["status"], "pending");
    assert!(expense["approvedBy"].is_null());
    assert_eq!(expense["amount"].as_f64(), Some(150.0));
    assert!(
        expense["referenceNumber"]
            .as_str()
            .unwrap()
            .starts_with("EXP-")
    );
    let id = expense["id"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/expenses/{id}/approve"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");
    assert_eq!(body["data"]["approvedBy"].as_i64(), Some(admin.id));
}

#[actix_web::test]
async fn test_dashboard_sums_current_month_donations() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-001", "Grace Hopper");

    let mut references = Vec::new();
    for amount in [100.00, 50.00] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/donations")
                .insert_header(bearer(&admin))
                .set_json(json!({ "memberId": member_id, "amount": amount, "donationType": "tithe" }))
        );
        assert_eq!(status, StatusCode::CREATED);
        let reference = body["data"]["referenceNumber"].as_str().unwrap().to_string();
        assert!(reference.starts_with("DON-"));
        references.push(reference);
    }
    assert_ne!(references[0], references[1]);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/dashboard")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["data"];
    assert_eq!(dashboard["thisMonth"]["donations"].as_f64(), Some(150.0));
    assert_eq!(dashboard["thisMonth"]["net"].as_f64(), Some(150.0));
    assert_eq!(dashboard["allTime"]["donations"].as_f64(), Some(150.0));
    assert_eq!(dashboard["donationsByType"][0]["donationType"], "tithe");
    assert_eq!(dashboard["donationsByType"][0]["count"], 2);
}

#[actix_web::test]
async fn test_offering_type_code_is_uppercased_and_unique() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/offering-types")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Building Fund", "code": "bf" }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["code"], "BF");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/offering-types")
            .insert_header(bearer(&admin))
            .set_json(json!({ "name": "Another Fund", "code": "bf" }))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    // the active list is public
    let (status, body) = send!(
        app,
        test::TestRequest::get().uri("/api/offering-types/active")
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_pledge_completes_after_sequential_payments() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let pastor = create_user(&db, &jwt, UserRole::Pastor, "pastor@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &pastor, "M-100", "Ada Lovelace");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/pledges")
            .insert_header(bearer(&pastor))
            .set_json(json!({ "memberId": member_id, "pledgeType": "building", "amountPledged": 100 }))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "active");
    let id = body["data"]["id"].as_i64().unwrap();
    let payments = format!("/api/pledges/{id}/payments");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&payments)
            .insert_header(bearer(&pastor))
            .set_json(json!({ "amount": 40 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["amountPaid"].as_f64(), Some(40.0));

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&payments)
            .insert_header(bearer(&pastor))
            .set_json(json!({ "amount": 60 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(body["data"]["amountPaid"].as_f64(), Some(100.0));

    // nothing left to pay
    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&payments)
            .insert_header(bearer(&pastor))
            .set_json(json!({ "amount": 1 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/pledges/summary")
            .insert_header(bearer(&pastor))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], 1);
    assert_eq!(body["data"]["active"]["count"], 0);
}

#[actix_web::test]
async fn test_page_past_the_end_keeps_total() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    for (number, name) in [("M-1", "Abel"), ("M-2", "Bethany"), ("M-3", "Caleb")] {
        create_member!(app, &admin, number, name);
    }

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/members?page=1&limit=2")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["fullName"], "Abel");
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["pages"], 2);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/members?page=5&limit=2")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["page"], 5);
}

#[actix_web::test]
async fn test_auth_and_role_failures() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let member = create_user(&db, &jwt, UserRole::Member, "member1@church.local").await;
    let app = init_app!(db, jwt);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/donations"));
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access token required");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/donations")
            .insert_header(("Authorization", "Bearer not-a-token"))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Invalid or expired token");

    // members may read but not write
    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/donations")
            .insert_header(bearer(&member))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/expenses")
            .insert_header(bearer(&member))
            .set_json(json!({ "category": "utilities", "description": "Water", "amount": 10 }))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Insufficient permissions");
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let app = init_app!(db, jwt);

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/nope"));
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route not found");

    let (status, body) = send!(app, test::TestRequest::get().uri("/api/health"));
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");

    let (status, body) = send!(app, test::TestRequest::get().uri("/api-docs/openapi.json"));
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/pledges/{id}/payments").is_some());
}

#[actix_web::test]
async fn test_generating_same_report_twice_stores_two_rows() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-7", "Dorcas");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/donations")
            .insert_header(bearer(&admin))
            .set_json(json!({ "memberId": member_id, "amount": 75.5, "donationDate": "2024-01-10" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let mut ids = Vec::new();
    for _ in 0..2 {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/reports/generate")
                .insert_header(bearer(&admin))
                .set_json(json!({ "reportType": "monthly", "startDate": "2024-01-01", "endDate": "2024-01-31" }))
        );
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["totalDonations"].as_f64(), Some(75.5));
        assert_eq!(body["data"]["netBalance"].as_f64(), Some(75.5));
        assert_eq!(body["data"]["reportName"], "Monthly Report - 2024-01-01");
        ids.push(body["data"]["id"].as_i64().unwrap());
    }
    assert_ne!(ids[0], ids[1]);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 2);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports/generate")
            .insert_header(bearer(&admin))
            .set_json(json!({ "reportType": "custom", "startDate": "2024-02-01", "endDate": "2024-01-01" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_raising_a_completed_pledge_reopens_it() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-200", "Priscilla");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/pledges")
            .insert_header(bearer(&admin))
            .set_json(json!({ "memberId": member_id, "pledgeType": "missions", "amountPledged": 100 }))
    );
    let id = body["data"]["id"].as_i64().unwrap();
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri(&format!("/api/pledges/{id}/payments"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "amount": 100 }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/pledges/{id}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "amountPledged": 200, "status": "active" }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(body["data"]["amountPaid"].as_f64(), Some(100.0));
    assert_eq!(body["data"]["amountPledged"].as_f64(), Some(200.0));

    // without an explicit status the pledge is re-settled the same way
    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/pledges/{id}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "amountPledged": 100 }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "completed");

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/pledges/{id}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "amountPledged": 300 }))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["status"], "active");

    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/pledges/{id}"))
            .insert_header(bearer(&admin))
            .set_json(json!({ "status": "completed" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_failed_payment_leaves_amount_paid_unchanged() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-300", "Aquila");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/pledges")
            .insert_header(bearer(&admin))
            .set_json(json!({ "memberId": member_id, "pledgeType": "building", "amountPledged": 100 }))
    );
    let id = body["data"]["id"].as_i64().unwrap();
    let payments = format!("/api/pledges/{id}/payments");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&payments)
            .insert_header(bearer(&admin))
            .set_json(json!({ "amount": 40 }))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri(&payments)
            .insert_header(bearer(&admin))
            .set_json(json!({ "amount": 61 }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/pledges/{id}"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amountPaid"].as_f64(), Some(40.0));
    assert_eq!(body["data"]["status"], "active");
}

#[actix_web::test]
async fn test_only_approved_expenses_are_netted() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-400", "Lydia");

    let (status, _) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/donations")
            .insert_header(bearer(&admin))
            .set_json(json!({ "memberId": member_id, "amount": 500, "donationType": "offering" }))
    );
    assert_eq!(status, StatusCode::CREATED);

    let mut expense_ids = Vec::new();
    for (description, amount) in [("Sound system", 150), ("Flowers", 40)] {
        let (status, body) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/expenses")
                .insert_header(bearer(&admin))
                .set_json(json!({ "category": "worship", "description": description, "amount": amount }))
        );
        assert_eq!(status, StatusCode::CREATED);
        expense_ids.push(body["data"]["id"].as_i64().unwrap());
    }
    let (status, _) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/expenses/{}/approve", expense_ids[0]))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/dashboard")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["data"];
    assert_eq!(dashboard["thisMonth"]["donations"].as_f64(), Some(500.0));
    assert_eq!(dashboard["thisMonth"]["expenses"].as_f64(), Some(150.0));
    assert_eq!(dashboard["thisMonth"]["net"].as_f64(), Some(350.0));
    assert_eq!(dashboard["pending"]["expenses"].as_f64(), Some(40.0));

    let day = today().to_string();
    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/reports/generate")
            .insert_header(bearer(&admin))
            .set_json(json!({ "reportType": "custom", "startDate": day, "endDate": day }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["totalDonations"].as_f64(), Some(500.0));
    assert_eq!(body["data"]["totalExpenses"].as_f64(), Some(150.0));
    assert_eq!(body["data"]["netBalance"].as_f64(), Some(350.0));
}

#[actix_web::test]
async fn test_rejected_expense_records_actor_and_stays_out_of_totals() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let accountant = create_user(&db, &jwt, UserRole::Accountant, "accountant@church.local").await;
    let app = init_app!(db, jwt);

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/expenses")
            .insert_header(bearer(&accountant))
            .set_json(json!({ "category": "travel", "description": "Retreat bus", "amount": 80 }))
    );
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send!(
        app,
        test::TestRequest::put()
            .uri(&format!("/api/expenses/{id}/reject"))
            .insert_header(bearer(&accountant))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "rejected");
    assert_eq!(body["data"]["approvedBy"].as_i64(), Some(accountant.id));

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/reports/dashboard")
            .insert_header(bearer(&accountant))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["thisMonth"]["expenses"].as_f64(), Some(0.0));
    assert_eq!(body["data"]["pending"]["expenses"].as_f64(), Some(0.0));
}

#[actix_web::test]
async fn test_soft_deleted_records_are_not_found() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-500", "Phoebe");

    let (_, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/expenses")
            .insert_header(bearer(&admin))
            .set_json(json!({ "category": "office", "description": "Paper", "amount": 12.5 }))
    );
    let expense_id = body["data"]["id"].as_i64().unwrap();

    for uri in [
        format!("/api/expenses/{expense_id}"),
        format!("/api/members/{member_id}"),
    ] {
        let (status, _) = send!(
            app,
            test::TestRequest::delete()
                .uri(&uri)
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK, "{uri}");

        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri(&uri)
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["error"]["code"], "NOT_FOUND");

        // a second delete finds nothing either
        let (status, _) = send!(
            app,
            test::TestRequest::delete()
                .uri(&uri)
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/expenses")
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
}

#[actix_web::test]
async fn test_tithe_history_filters_by_year_and_month() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-600", "Barnabas");

    for (amount, kind, date) in [
        (100, "tithe", "2024-01-10"),
        (50, "tithe", "2024-02-05"),
        (30, "offering", "2024-01-15"),
        (20, "tithe", "2023-12-31"),
    ] {
        let (status, _) = send!(
            app,
            test::TestRequest::post()
                .uri("/api/donations")
                .insert_header(bearer(&admin))
                .set_json(json!({ "memberId": member_id, "amount": amount, "donationType": kind, "donationDate": date }))
        );
        assert_eq!(status, StatusCode::CREATED);
    }

    for (query, total, count) in [
        ("?year=2024&month=1", 100.0, 1),
        ("?year=2024", 150.0, 2),
        ("", 170.0, 3),
        // month alone is ignored
        ("?month=2", 170.0, 3),
    ] {
        let (status, body) = send!(
            app,
            test::TestRequest::get()
                .uri(&format!("/api/members/{member_id}/tithe-history{query}"))
                .insert_header(bearer(&admin))
        );
        assert_eq!(status, StatusCode::OK, "{query}");
        assert_eq!(body["data"]["summary"]["totalAmount"].as_f64(), Some(total), "{query}");
        assert_eq!(body["data"]["summary"]["count"], count, "{query}");
        assert_eq!(body["data"]["donations"].as_array().unwrap().len(), count, "{query}");
    }

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/members/{member_id}/tithe-history?year=2024&month=1"))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["donations"][0]["donationDate"], "2024-01-10");
}

#[actix_web::test]
async fn test_budget_period_must_not_run_backwards() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/budgets")
            .insert_header(bearer(&admin))
            .set_json(json!({
                "category": "youth",
                "allocatedAmount": 1200,
                "startDate": "2024-06-30",
                "endDate": "2024-06-01"
            }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "endDate must not be before startDate");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/budgets")
            .insert_header(bearer(&admin))
            .set_json(json!({
                "category": "youth",
                "allocatedAmount": 1200,
                "startDate": "2024-06-01",
                "endDate": "2024-06-01"
            }))
    );
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["allocatedAmount"].as_f64(), Some(1200.0));
}

#[actix_web::test]
async fn test_huge_page_number_returns_empty_page() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    create_member!(app, &admin, "M-1", "Abel");

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri(&format!("/api/members?page={}", u64::MAX))
            .insert_header(bearer(&admin))
    );
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["meta"]["total"], 1);
}

#[actix_web::test]
async fn test_oversized_amount_is_rejected() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    let admin = create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;
    let app = init_app!(db, jwt);
    let member_id = create_member!(app, &admin, "M-700", "Silas");

    let (status, body) = send!(
        app,
        test::TestRequest::post()
            .uri("/api/donations")
            .insert_header(bearer(&admin))
            .set_json(json!({ "memberId": member_id, "amount": "79228162514264337593543950335" }))
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_duplicate_key_is_classified_as_unique_violation() {
    let db = setup_db().await;
    let jwt = JwtService::new("test-secret", 3600);
    create_user(&db, &jwt, UserRole::Admin, "admin@church.local").await;

    let now = Utc::now();
    let err = user_entity::ActiveModel {
        name: Set("Second admin".to_string()),
        email: Set("admin@church.local".to_string()),
        password_hash: Set("x".to_string()),
        role: Set(UserRole::Admin),
        is_active: Set(true),
        phone: Set(None),
        address: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap_err();
    assert!(is_unique_violation(&err), "{err}");
}
