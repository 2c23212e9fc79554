use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::state::AppState;
use crate::session::session_token;

/// Username of the administrator making the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

/// Admin gate - anything short of a logged-in admin is sent back to /login
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let session = session_token(&jar, &state.config.session_cookie_name)
        .map(|token| state.sessions.load(token))
        .unwrap_or_default();

    let Some(user) = session.admin_user() else {
        tracing::debug!("Admin view denied for session {:?}", session.user);
        return Redirect::to("/login").into_response();
    };

    request.extensions_mut().insert(CurrentUser(user.to_string()));

    next.run(request).await
}
