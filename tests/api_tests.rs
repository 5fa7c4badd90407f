use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use rad_portal::config::{Config, SecurityConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;
    // Low Argon2 cost keeps the hashing fast in tests
    config.security = SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };

    let state = rad_portal::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    rad_portal::api::router(state).await
}

async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post(app: &Router, uri: &str, body: Value, cookie: Option<&str>) -> Response {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register_and_login(app: &Router, name: &str, email: &str, password: &str) -> String {
    let response = post(
        app,
        "/register",
        json!({ "name": name, "email": email, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    login(app, email, password).await
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = post(
        app,
        "/login",
        json!({ "email": email, "password": password }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

#[tokio::test]
async fn test_landing_is_public() {
    let app = spawn_app().await;

    let response = get(&app, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"]["authenticated"], false);
}

#[tokio::test]
async fn test_gated_routes_redirect_to_login() {
    let app = spawn_app().await;

    let response = get(&app, "/home", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["redirect"], "/login");
    assert_eq!(body["category"], "danger");

    let response = post(&app, "/home/create", json!({}), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation_and_duplicates() {
    let app = spawn_app().await;

    let response = post(
        &app,
        "/register",
        json!({ "name": "", "email": "", "password": "" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post(
        &app,
        "/register",
        json!({ "name": "Ada", "email": "ada@x.com", "password": "pw1" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Registration successful! Please login.");
    assert_eq!(body["redirect"], "/login");

    let response = post(
        &app,
        "/register",
        json!({ "name": "Bob", "email": "ada@x.com", "password": "pw2" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["category"], "warning");
}

#[tokio::test]
async fn test_login_and_session() {
    let app = spawn_app().await;

    let cookie = register_and_login(&app, "Ada", "ada@x.com", "pw1").await;

    let response = post(
        &app,
        "/login",
        json!({ "email": "ada@x.com", "password": "wrong" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get(&app, "/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let response = get(&app, "/", Some(&cookie)).await;
    let body = body_json(response).await;
    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["user"]["name"], "Ada");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = spawn_app().await;

    let cookie = register_and_login(&app, "Ada", "ada@x.com", "pw1").await;

    let response = get(&app, "/logout", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["redirect"], "/");

    let response = get(&app, "/home", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_opportunity_lifecycle() {
    let app = spawn_app().await;

    let ada = register_and_login(&app, "Ada", "ada@x.com", "pw1").await;
    let bob = register_and_login(&app, "Bob", "bob@x.com", "pw2").await;
    // bootstrap admin seeded at startup
    let admin = login(&app, "admin@example.com", "Admin!").await;

    let fields = json!({
        "title": "T1",
        "description": "Automate the thing.",
        "business_unit": "Operations",
        "predicted_benefits": "Less manual effort.",
        "business_criticality": "High"
    });

    let response = post(&app, "/home/create", fields.clone(), Some(&ada)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["status"], "New");
    assert_eq!(body["redirect"], "/home");

    // duplicate title
    let response = post(&app, "/home/create", fields.clone(), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // non-owner cannot view or submit the edit form
    let response = get(&app, &format!("/home/edit/{id}"), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // owner edit: status field is silently ignored for non-admins
    let mut edit = fields.clone();
    edit["status"] = json!("Qualified");
    let response = post(&app, &format!("/home/edit/{id}"), edit, Some(&ada)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "New");

    // admin edit applies status and scores
    let mut edit = fields.clone();
    edit["status"] = json!("Qualified");
    edit["value_score"] = json!("50");
    let response = post(&app, &format!("/home/edit/{id}"), edit, Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["status"], "Qualified");
    assert_eq!(body["data"]["value_score"], 50);

    // invalid score is rejected in full
    let mut edit = fields.clone();
    edit["value_score"] = json!("101");
    let response = post(&app, &format!("/home/edit/{id}"), edit, Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // deletion is admin only
    let response = post(&app, &format!("/home/delete/{id}"), json!({}), Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["redirect"], "/home");

    let response = post(&app, &format!("/home/delete/{id}"), json!({}), Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(&app, "/home", Some(&ada)).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());

    // deleted records are gone
    let response = get(&app, &format!("/home/edit/{id}"), Some(&ada)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
