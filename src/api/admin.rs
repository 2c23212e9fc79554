use axum::{
    extract::State,
    response::Html,
    Extension,
};

use crate::api::middleware::CurrentUser;
use crate::api::pages;
use crate::api::state::AppState;
use crate::db::UserRepository;
use crate::error::AppError;

/// GET /admin (requires an admin session via middleware)
pub async fn admin_panel(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Html<String>, AppError> {
    let users = UserRepository::list_all(&state.db).await?;

    Ok(Html(pages::admin_page(&user, &users)))
}
