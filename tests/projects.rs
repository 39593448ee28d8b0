use actix_web::{test, web, App};
use chrono::{Duration, Utc};
use crowdfund::auth::TokenService;
use crowdfund::routes;
use pretty_assertions::assert_eq;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn lazy_pool() -> PgPool {
    PgPool::connect_lazy("postgres://localhost/crowdfund_test").expect("valid pool options")
}

fn token_service() -> TokenService {
    TokenService::new("integration-test-secret", "HS256", 60).unwrap()
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(lazy_pool()))
                .app_data(web::Data::new(token_service()))
                .service(web::scope("/api/v1").configure(routes::config)),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_create_project_without_token_is_unauthorized() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .set_json(json!({
            "owner_id": Uuid::new_v4(),
            "title": "Community garden",
            "description": "A shared garden for the neighborhood.",
            "goal_amount": 5000,
            "deadline": Utc::now() + Duration::days(30)
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_contribute_without_token_is_unauthorized() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/contribute", Uuid::new_v4()))
        .set_json(json!({
            "contributor_id": Uuid::new_v4(),
            "amount": 10
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

// Full project and contribution flow against a live database.
// Requires DATABASE_URL to point at a migrated Postgres instance.
#[ignore]
#[actix_rt::test]
async fn test_project_and_contribution_flow() {
    dotenv::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind("owner@example.com")
        .execute(&pool)
        .await;

    let tokens = token_service();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(tokens))
            .service(web::scope("/api/v1").configure(routes::config)),
    )
    .await;

    // Register and login the project owner.
    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "email": "owner@example.com",
            "username": "owner",
            "password": "secretpw"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body = test::read_body(resp).await;
    let owner: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let owner_id = owner["user_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_form(&[("username", "owner"), ("password", "secretpw")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == "access_token")
        .expect("access_token cookie must be set")
        .into_owned();

    // Creating a project for someone else is forbidden.
    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .cookie(cookie.clone())
        .set_json(json!({
            "owner_id": Uuid::new_v4(),
            "title": "Not my project",
            "description": "Owner id does not match the caller.",
            "goal_amount": 100,
            "deadline": Utc::now() + Duration::days(10)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 403);

    // A past deadline is rejected at validation.
    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .cookie(cookie.clone())
        .set_json(json!({
            "owner_id": owner_id,
            "title": "Too late",
            "description": "Deadline already passed at creation.",
            "goal_amount": 100,
            "deadline": Utc::now() - Duration::days(1)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    // Create a valid project.
    let req = test::TestRequest::post()
        .uri("/api/v1/projects")
        .cookie(cookie.clone())
        .set_json(json!({
            "owner_id": owner_id,
            "title": "Community garden",
            "description": "A shared garden for the neighborhood.",
            "goal_amount": 5000,
            "deadline": Utc::now() + Duration::days(30)
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body = test::read_body(resp).await;
    let project: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let project_id = project["project_id"].as_str().unwrap().to_string();

    // Zero-amount contributions are rejected at validation.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/contribute", project_id))
        .cookie(cookie.clone())
        .set_json(json!({
            "contributor_id": owner_id,
            "amount": 0
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    // A valid contribution succeeds.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/contribute", project_id))
        .cookie(cookie.clone())
        .set_json(json!({
            "contributor_id": owner_id,
            "amount": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // Contributing to a project whose deadline has passed is a 400. The API
    // refuses to create such a project, so seed one directly.
    let expired_project_id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO projects (project_id, owner_id, title, description, goal_amount, deadline) \
         VALUES ($1, $2, $3, $4, $5, now() - interval '1 day')",
    )
    .bind(expired_project_id)
    .bind(Uuid::parse_str(&owner_id).unwrap())
    .bind("Closed campaign")
    .bind("Funding window already closed.")
    .bind(1000_i64)
    .execute(&pool)
    .await
    .expect("failed to seed expired project");

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/contribute", expired_project_id))
        .cookie(cookie.clone())
        .set_json(json!({
            "contributor_id": owner_id,
            "amount": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Project deadline has passed.");

    // Contributing to a missing project is a 404.
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/projects/{}/contribute", Uuid::new_v4()))
        .cookie(cookie.clone())
        .set_json(json!({
            "contributor_id": owner_id,
            "amount": 10
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "Project not found");

    // The contribution shows up on the project and for the contributor.
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/projects/{}/contributions", project_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    let contributions: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(contributions.as_array().unwrap().len(), 1);
    assert_eq!(contributions[0]["amount"], 10);

    let req = test::TestRequest::get()
        .uri("/api/v1/users/me/contributions")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body = test::read_body(resp).await;
    let mine: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(mine.as_array().unwrap().len(), 1);
}
