mod common;

use auth::Claims;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

const EMAIL: &str = "a@b.com";
const PASSWORD: &str = "Abcdef12";

async fn registered_and_logged_in(app: &TestApp) -> String {
    let body = app.register("Alice", EMAIL, PASSWORD).await;
    let response = app.login(EMAIL, PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
    body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_welcome_lists_routes() {
    let app = TestApp::spawn().await;

    let response = app.get("/").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.contains("/users/register"));
    assert!(text.contains("/users/login"));
}

#[tokio::test]
async fn test_register_success_hides_credential() {
    let app = TestApp::spawn().await;

    let body = app.register("Alice", EMAIL, PASSWORD).await;

    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["email"], EMAIL);
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;
    let registered = app.register("Alice", EMAIL, PASSWORD).await;
    let user_id = registered["data"]["id"].as_str().unwrap();

    let response = app
        .post("/users/register")
        .json(&json!({ "name": "Other", "email": EMAIL, "password": "Zyxwvu98" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already registered"));

    // The first identity keeps its credential and profile
    assert_eq!(
        app.login(EMAIL, "Zyxwvu98").await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(app.login(EMAIL, PASSWORD).await.status(), StatusCode::OK);

    let response = app
        .get(&format!("/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Alice");

    let response = app.get("/users").send().await.expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_weak_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/register")
        .json(&json!({ "name": "Alice", "email": EMAIL, "password": "short" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status_code"], 422);
    assert!(body["data"]["message"].as_str().unwrap().contains("8 characters"));
}

#[tokio::test]
async fn test_register_invalid_email() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/users/register")
        .json(&json!({ "name": "Alice", "email": "not-an-email", "password": PASSWORD }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = TestApp::spawn().await;
    let registered = app.register("Alice", EMAIL, PASSWORD).await;

    let response = app.login(EMAIL, PASSWORD).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("auth_token cookie missing");
    assert!(cookie.http_only());
    assert_eq!(cookie.path(), Some("/"));

    let claims = app.jwt_handler.decode(cookie.value()).unwrap();
    assert_eq!(claims.sub, registered["data"]["id"].as_str().unwrap());
    assert_eq!(claims.email, EMAIL);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "login successful");
    assert_eq!(body["data"]["user"]["email"], EMAIL);
    assert!(body["data"]["expires_at"].is_string());
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Alice", EMAIL, PASSWORD).await;

    let wrong_password = app.login(EMAIL, "wrong123X").await;
    let unknown_email = app.login("nobody@b.com", PASSWORD).await;
    let malformed = app.login("not-an-email", "x").await;
    let missing_password = app
        .post("/users/login")
        .json(&json!({ "email": EMAIL }))
        .send()
        .await
        .expect("Failed to execute request");
    let not_json = app
        .post("/users/login")
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"email\": ")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(malformed.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(missing_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(not_json.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.cookies().next().is_none());

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    let malformed: serde_json::Value = malformed.json().await.unwrap();
    let missing_password: serde_json::Value = missing_password.json().await.unwrap();
    let not_json: serde_json::Value = not_json.json().await.unwrap();
    assert_eq!(wrong_password, unknown_email);
    assert_eq!(wrong_password, malformed);
    assert_eq!(wrong_password, missing_password);
    assert_eq!(wrong_password, not_json);
    assert_eq!(wrong_password["data"]["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_login_email_is_case_sensitive() {
    let app = TestApp::spawn().await;
    app.register("Alice", EMAIL, PASSWORD).await;

    let response = app.login("A@B.com", PASSWORD).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_without_cookie() {
    let app = TestApp::spawn().await;

    let response = app.get("/users").send().await.expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "Unauthorized");
}

#[tokio::test]
async fn test_protected_route_rejections_are_indistinguishable() {
    let app = TestApp::spawn().await;
    let registered = app.register("Alice", EMAIL, PASSWORD).await;
    let user_id = registered["data"]["id"].as_str().unwrap();

    let expired = app
        .jwt_handler
        .encode(&Claims::issued_at(
            user_id,
            EMAIL,
            Duration::hours(1),
            Utc::now() - Duration::hours(2),
        ))
        .unwrap();
    let mut tampered = app
        .jwt_handler
        .encode(&Claims::for_user(user_id, EMAIL, Duration::hours(1)))
        .unwrap();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'Q' } else { 'A' });

    let client = reqwest::Client::new();

    let missing = client
        .get(app.url("/users"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
    let mut bodies = vec![missing.json::<serde_json::Value>().await.unwrap()];

    for token in [expired, tampered, "garbage".to_string()] {
        let response = client
            .get(app.url("/users"))
            .header(reqwest::header::COOKIE, format!("auth_token={}", token))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        bodies.push(response.json::<serde_json::Value>().await.unwrap());
    }

    assert!(bodies.iter().all(|body| body == &bodies[0]));
}

#[tokio::test]
async fn test_valid_token_grants_access() {
    let app = TestApp::spawn().await;
    let registered = app.register("Alice", EMAIL, PASSWORD).await;
    let user_id = registered["data"]["id"].as_str().unwrap();
    let token = app
        .jwt_handler
        .encode(&Claims::for_user(user_id, EMAIL, Duration::hours(1)))
        .unwrap();

    let response = reqwest::Client::new()
        .get(app.url(&format!("/users/{}", user_id)))
        .header(reqwest::header::COOKIE, format!("auth_token={}", token))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["id"], user_id);
}

#[tokio::test]
async fn test_list_and_create_users() {
    let app = TestApp::spawn().await;
    registered_and_logged_in(&app).await;

    let response = app
        .post("/users")
        .json(&json!({ "name": "Bob", "email": "bob@b.com", "password": "Bobpass12" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.get("/users").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|user| user.get("password_hash").is_none()));
}

#[tokio::test]
async fn test_get_user_not_found_and_invalid_id() {
    let app = TestApp::spawn().await;
    registered_and_logged_in(&app).await;

    let missing = app
        .get(&format!("/users/{}", uuid::Uuid::new_v4()))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = app
        .get("/users/not-a-uuid")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_user_name() {
    let app = TestApp::spawn().await;
    let user_id = registered_and_logged_in(&app).await;

    let response = app
        .put(&format!("/users/{}", user_id))
        .json(&json!({ "name": "Alicia" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Alicia");
    assert_eq!(body["data"]["email"], EMAIL);
}

#[tokio::test]
async fn test_update_user_rejects_empty_and_unbound_email_change() {
    let app = TestApp::spawn().await;
    let user_id = registered_and_logged_in(&app).await;

    let empty = app
        .put(&format!("/users/{}", user_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(empty.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let email_only = app
        .put(&format!("/users/{}", user_id))
        .json(&json!({ "email": "new@b.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(email_only.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_email_with_password_rebinds_credential() {
    let app = TestApp::spawn().await;
    let user_id = registered_and_logged_in(&app).await;

    let response = app
        .put(&format!("/users/{}", user_id))
        .json(&json!({ "email": "new@b.com", "password": "Newpass99" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        app.login(EMAIL, PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        app.login("new@b.com", "Newpass99").await.status(),
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_update_email_conflict() {
    let app = TestApp::spawn().await;
    app.register("Bob", "bob@b.com", "Bobpass12").await;
    let user_id = registered_and_logged_in(&app).await;

    let response = app
        .put(&format!("/users/{}", user_id))
        .json(&json!({ "email": "bob@b.com", "password": "Newpass99" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::spawn().await;
    let user_id = registered_and_logged_in(&app).await;

    let response = app
        .delete(&format!("/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["data"]["message"],
        format!("Delete user with ID={} success", user_id)
    );

    let response = app
        .delete(&format!("/users/{}", user_id))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_expires_cookie() {
    let app = TestApp::spawn().await;
    registered_and_logged_in(&app).await;

    let response = app
        .get("/users/logout")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .cookies()
        .find(|c| c.name() == "auth_token")
        .expect("auth_token cookie missing");
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(std::time::Duration::ZERO));
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "logout successful");

    let response = app.get("/users").send().await.expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
