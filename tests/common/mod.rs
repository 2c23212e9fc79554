#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use tower::ServiceExt;

use bbb_admin::api::{create_router, AppState};
use bbb_admin::config::Config;
use bbb_admin::db;
use bbb_admin::session::{CookieStore, SessionData, SessionStore};

pub const COOKIE_NAME: &str = "bbb-session";
pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub db: Pool<Sqlite>,
    pub sessions: CookieStore,
}

pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        session_secret: SECRET.to_string(),
        session_cookie_name: COOKIE_NAME.to_string(),
        db_max_connections: 1,
        db_min_connections: 1,
    }
}

impl TestApp {
    pub async fn new() -> TestApp {
        // One connection keeps the in-memory database alive for the whole test
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        db::migrate(&pool).await.expect("Failed to run migrations");

        let sessions = CookieStore::new(SECRET);
        let state = AppState {
            db: pool.clone(),
            sessions: Arc::new(sessions.clone()),
            config: Arc::new(test_config()),
        };

        TestApp {
            router: create_router(state),
            db: pool,
            sessions,
        }
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, path: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_multipart(&self, path: &str, fields: &[(&str, &str)]) -> Response {
        let boundary = "bbb-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{boundary}--\r\n"));

        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// POST with no Content-Type header at all.
    pub async fn post_untyped(&self, path: &str, body: &str) -> Response {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .body(Body::from(body.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn register(&self, username: &str, password: &str) -> Response {
        self.post_form("/register", &format!("username={username}&password={password}"))
            .await
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.post_form("/login", &format!("username={username}&password={password}"))
            .await
    }

    pub async fn promote(&self, username: &str) {
        sqlx::query("UPDATE users SET is_admin = TRUE WHERE username = ?")
            .bind(username)
            .execute(&self.db)
            .await
            .unwrap();
    }

    pub async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .unwrap()
    }

    /// Cookie header value for a hand-built session.
    pub fn cookie_for(&self, data: &SessionData) -> String {
        format!("{}={}", COOKIE_NAME, self.sessions.save(data).unwrap())
    }
}

/// `name=value` pair from the response's Set-Cookie header.
pub fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing Set-Cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location")
        .to_str()
        .unwrap()
}

pub fn assert_redirect(response: &Response, to: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response), to);
}

pub async fn body_string(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
