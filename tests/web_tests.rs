//! Web UI tests
//!
//! Drives the router in-process with `tower::ServiceExt::oneshot`, carrying
//! cookies between requests by hand the way a browser would.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use tower::ServiceExt;

use staffdesk::auth::{SessionClaims, TokenSigner};
use staffdesk::config::{AuthConfig, Config, DatabaseConfig, SessionConfig};
use staffdesk::db::{self, EmployeeStore};
use staffdesk::web::{create_router, AppState};
use tempfile::TempDir;

const TEST_SECRET: &str = "web-test-secret-0123456789";

struct TestApp {
    _dir: TempDir,
    router: Router,
    employees: EmployeeStore,
}

async fn test_app() -> TestApp {
    let dir = TempDir::new().unwrap();
    let config = Config {
        database: DatabaseConfig {
            path: dir.path().join("web.db"),
            max_connections: 4,
        },
        session: SessionConfig {
            secret: TEST_SECRET.to_string(),
            ..SessionConfig::default()
        },
        auth: AuthConfig { password_cost: 4 },
        ..Config::default()
    };
    let pool = db::open(&config.database, &config.auth).await.unwrap();
    let state = Arc::new(AppState::new(config, pool.clone()).unwrap());
    TestApp {
        _dir: dir,
        router: create_router(state),
        employees: EmployeeStore::new(pool),
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, cookies: &[String], form: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if !cookies.is_empty() {
            builder = builder.header(COOKIE, cookies.join("; "));
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    async fn get(&self, uri: &str, cookies: &[String]) -> Response {
        self.send(Method::GET, uri, cookies, None).await
    }

    async fn post(&self, uri: &str, cookies: &[String], form: &str) -> Response {
        self.send(Method::POST, uri, cookies, Some(form)).await
    }

    /// Log in as the default account and return the session cookie pair
    async fn login(&self) -> String {
        let response = self
            .post("/login", &[], "username=admin&password=admin123")
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        cookie(&response, "staffdesk_session").expect("login should set a session cookie")
    }
}

/// `name=value` of a cookie set by the response, if it is not a deletion
fn cookie(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter(|v| v.starts_with(&format!("{}=", name)) && !v.contains("Max-Age=0"))
        .map(|v| v.split(';').next().unwrap_or_default().to_string())
        .next()
}

fn clears_cookie(response: &Response, name: &str) -> bool {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.starts_with(&format!("{}=;", name)) && v.contains("Max-Age=0"))
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_root_redirects_to_login() {
    let app = test_app().await;
    let response = app.get("/", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_protected_pages_redirect_without_session() {
    let app = test_app().await;
    for uri in ["/dashboard", "/add", "/edit/1", "/delete/1"] {
        let response = app.get(uri, &[]).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&response), "/login", "{}", uri);
    }
}

#[tokio::test]
async fn test_post_without_session_does_not_write() {
    let app = test_app().await;
    let response = app
        .post(
            "/add",
            &[],
            "name=Ada&email=ada%40example.com&department=Eng&salary=100",
        )
        .await;
    assert_eq!(location(&response), "/login");
    assert_eq!(app.employees.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_forged_session_cookie_redirects() {
    let app = test_app().await;
    let response = app
        .get("/dashboard", &["staffdesk_session=not.a.token".to_string()])
        .await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_page_renders() {
    let app = test_app().await;
    let response = app.get("/login", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains(r#"name="username""#));
    assert!(body.contains(r#"name="password""#));
}

#[tokio::test]
async fn test_bad_credentials_rerender_login() {
    let app = test_app().await;
    let response = app
        .post("/login", &[], "username=admin&password=wrong")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie(&response, "staffdesk_session").is_none());
    let body = body_text(response).await;
    assert!(body.contains("Invalid credentials"));

    let response = app
        .post("/login", &[], "username=ghost&password=admin123")
        .await;
    let body = body_text(response).await;
    assert!(body.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_login_reaches_dashboard() {
    let app = test_app().await;
    let response = app
        .post("/login", &[], "username=admin&password=admin123")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let session = cookie(&response, "staffdesk_session").unwrap();
    let response = app.get("/dashboard", &[session]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Employees"));
    assert!(body.contains("Signed in as admin"));
}

#[tokio::test]
async fn test_add_employee_flow() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app.get("/add", &[session.clone()]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Add Employee"));

    let response = app
        .post(
            "/add",
            &[session.clone()],
            "name=Ada+Lovelace&email=ada%40example.com&department=Engineering&salary=120000",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");
    let flash = cookie(&response, "staffdesk_flash").expect("success flash expected");

    let response = app.get("/dashboard", &[session.clone(), flash]).await;
    assert!(clears_cookie(&response, "staffdesk_flash"));
    let body = body_text(response).await;
    assert!(body.contains("Employee added successfully"));
    assert!(body.contains("Ada Lovelace"));
    assert!(body.contains("ada@example.com"));

    // The flash is shown once; without the cookie it is gone.
    let body = body_text(app.get("/dashboard", &[session]).await).await;
    assert!(!body.contains("Employee added successfully"));
    assert_eq!(app.employees.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_add_missing_field_rerenders_with_warning() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app
        .post(
            "/add",
            &[session],
            "name=Ada&email=&department=Engineering&salary=100",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("All fields are required"));
    assert!(body.contains("flash-warning"));
    assert!(body.contains(r#"value="Ada""#));
    assert_eq!(app.employees.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_non_numeric_salary_rejected() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app
        .post(
            "/add",
            &[session],
            "name=Ada&email=ada%40example.com&department=Engineering&salary=plenty",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Salary must be a valid number"));
    assert_eq!(app.employees.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_duplicate_email_rerenders_with_danger() {
    let app = test_app().await;
    let session = app.login().await;
    let form = "name=Ada&email=ada%40example.com&department=Engineering&salary=100";

    app.post("/add", &[session.clone()], form).await;
    let response = app.post("/add", &[session], form).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Email must be unique"));
    assert!(body.contains("flash-danger"));
    assert_eq!(app.employees.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_edit_employee_flow() {
    let app = test_app().await;
    let session = app.login().await;

    app.post(
        "/add",
        &[session.clone()],
        "name=Ada&email=ada%40example.com&department=Engineering&salary=100",
    )
    .await;
    let id = app.employees.list_all().await.unwrap()[0].id;

    let response = app.get(&format!("/edit/{}", id), &[session.clone()]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Edit Employee"));
    assert!(body.contains(r#"value="ada@example.com""#));

    let response = app
        .post(
            &format!("/edit/{}", id),
            &[session],
            "name=Ada+King&email=ada.king%40example.com&department=Mathematics&salary=200.5",
        )
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/dashboard");

    let employee = app.employees.get(id).await.unwrap();
    assert_eq!(employee.name, "Ada King");
    assert_eq!(employee.email, "ada.king@example.com");
    assert_eq!(employee.department, "Mathematics");
    assert_eq!(employee.salary, 200.5);
}

#[tokio::test]
async fn test_edit_to_taken_email_rerenders() {
    let app = test_app().await;
    let session = app.login().await;

    app.post(
        "/add",
        &[session.clone()],
        "name=Ada&email=ada%40example.com&department=Engineering&salary=100",
    )
    .await;
    app.post(
        "/add",
        &[session.clone()],
        "name=Grace&email=grace%40example.com&department=Research&salary=100",
    )
    .await;
    let before = app.employees.list_all().await.unwrap();
    let grace = before[1].id;

    let response = app
        .post(
            &format!("/edit/{}", grace),
            &[session],
            "name=Grace&email=ada%40example.com&department=Research&salary=100",
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Email must be unique"));
    assert_eq!(app.employees.list_all().await.unwrap(), before);
}

#[tokio::test]
async fn test_edit_unknown_employee_renders_not_found() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app.get("/edit/999", &[session.clone()]).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Employee not found"));

    let response = app
        .post(
            "/edit/999",
            &[session],
            "name=Ada&email=ada%40example.com&department=Engineering&salary=100",
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.employees.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_edit_of_unknown_employee_renders_not_found() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app
        .post("/edit/999", &[session], "name=&email=&department=&salary=")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_text(response).await;
    assert!(body.contains("Employee not found"));
    assert!(!body.contains("All fields are required"));
}

#[tokio::test]
async fn test_guarded_request_refreshes_session_cookie() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app.get("/dashboard", &[session]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let header = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("staffdesk_session="))
        .expect("guarded page should re-issue the session cookie")
        .to_string();
    assert!(header.contains("Max-Age=1800"));
    assert!(header.contains("HttpOnly"));
}

#[tokio::test]
async fn test_active_session_outlives_original_cookie() {
    let app = test_app().await;
    let login_cookie = app.login().await;
    let token = login_cookie.trim_start_matches("staffdesk_session=");

    // Re-sign the login token so it is one second from expiry.
    let signer = TokenSigner::new(TEST_SECRET);
    let claims: SessionClaims = signer.verify(token).unwrap();
    let short = signer
        .sign(&SessionClaims::new(&claims.sub, &claims.sid, chrono::Duration::seconds(1)))
        .unwrap();
    let short_cookie = format!("staffdesk_session={}", short);

    let response = app.get("/dashboard", &[short_cookie.clone()]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let refreshed = cookie(&response, "staffdesk_session").unwrap();

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;

    let response = app.get("/dashboard", &[short_cookie]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = app.get("/dashboard", &[refreshed]).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_redirects_with_info() {
    let app = test_app().await;
    let session = app.login().await;

    app.post(
        "/add",
        &[session.clone()],
        "name=Ada&email=ada%40example.com&department=Engineering&salary=100",
    )
    .await;
    let id = app.employees.list_all().await.unwrap()[0].id;

    for target in [id, id, 12345] {
        let response = app
            .get(&format!("/delete/{}", target), &[session.clone()])
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");

        let flash = cookie(&response, "staffdesk_flash").unwrap();
        let body = body_text(app.get("/dashboard", &[session.clone(), flash]).await).await;
        assert!(body.contains("Employee deleted successfully"));
        assert!(body.contains("flash-info"));
    }

    assert_eq!(app.employees.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = test_app().await;
    let session = app.login().await;

    let response = app.get("/logout", &[session.clone()]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(clears_cookie(&response, "staffdesk_session"));

    let flash = cookie(&response, "staffdesk_flash").unwrap();
    let body = body_text(app.get("/login", &[flash]).await).await;
    assert!(body.contains("Logged out successfully"));

    // The old cookie no longer opens the dashboard.
    let response = app.get("/dashboard", &[session]).await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_logout_without_session_is_harmless() {
    let app = test_app().await;
    let response = app.get("/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_html_in_fields_is_escaped() {
    let app = test_app().await;
    let session = app.login().await;

    app.post(
        "/add",
        &[session.clone()],
        "name=%3Cscript%3Ealert(1)%3C%2Fscript%3E&email=x%40example.com&department=Eng&salary=1",
    )
    .await;

    let body = body_text(app.get("/dashboard", &[session]).await).await;
    assert!(!body.contains("<script>alert(1)"));
    assert!(body.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let response = app.get("/health", &[]).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
