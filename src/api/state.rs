use std::sync::Arc;
use sqlx::{Pool, Sqlite};
use crate::config::Config;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub sessions: Arc<dyn SessionStore>,
    pub config: Arc<Config>,
}
