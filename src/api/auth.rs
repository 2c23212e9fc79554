use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::form::CredentialsForm;
use crate::api::pages;
use crate::api::state::AppState;
use crate::crypto::{hash_password_blocking, verify_password_blocking};
use crate::db::UserRepository;
use crate::error::AppError;
use crate::session::{cleared_cookie, session_cookie, SessionData};

const INVALID_CREDENTIALS: &str = "invalid credentials";

fn render_error(err: AppError, render: fn(Option<&str>) -> String) -> Response {
    (err.status_code(), Html(render(Some(&err.to_string())))).into_response()
}

/// GET /register
pub async fn show_register() -> Html<String> {
    Html(pages::register_page(None))
}

/// POST /register
pub async fn register(State(state): State<AppState>, form: CredentialsForm) -> Response {
    match create_user(&state, form).await {
        Ok(()) => Redirect::to("/login").into_response(),
        Err(err) => render_error(err, pages::register_page),
    }
}

async fn create_user(state: &AppState, form: CredentialsForm) -> Result<(), AppError> {
    if form.username.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation("fill all fields".to_string()));
    }

    let password_hash = hash_password_blocking(form.password).await?;

    let user = UserRepository::create(&state.db, &form.username, &password_hash)
        .await
        .inspect_err(|e| tracing::warn!("Registration failed for {:?}: {}", form.username, e))?;

    tracing::info!("Registered user {} (id {})", user.username, user.id);
    Ok(())
}

/// GET /login
pub async fn show_login() -> Html<String> {
    Html(pages::login_page(None))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    form: CredentialsForm,
) -> Response {
    match authenticate(&state, form).await {
        Ok(token) => (
            jar.add(session_cookie(&state.config.session_cookie_name, token)),
            Redirect::to("/admin"),
        )
            .into_response(),
        Err(err) => render_error(err, pages::login_page),
    }
}

/// Check the credentials and return a session token for the user.
async fn authenticate(state: &AppState, form: CredentialsForm) -> Result<String, AppError> {
    // Unknown users and wrong passwords get the same answer
    let user = UserRepository::get_by_username(&state.db, &form.username)
        .await?
        .ok_or_else(|| AppError::Auth(INVALID_CREDENTIALS.to_string()))?;

    let valid = verify_password_blocking(form.password, user.password_hash.clone())
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Unusable password hash for user {}: {}", user.id, e);
            false
        });

    if !valid {
        tracing::info!("Failed login for {:?}", form.username);
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let token = state
        .sessions
        .save(&SessionData::authenticated(user.username.as_str(), user.is_admin))?;

    tracing::info!("User {} logged in (admin: {})", user.username, user.is_admin);
    Ok(token)
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let token = state.sessions.clear()?;

    Ok((
        jar.add(cleared_cookie(&state.config.session_cookie_name, token)),
        Redirect::to("/login"),
    ))
}
