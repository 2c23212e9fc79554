use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use ::cookie::time::Duration;
use sha2::Sha256;

use super::{SessionData, SessionStore, SESSION_MAX_AGE_SECS};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Session store that keeps the whole session on the client.
///
/// Token layout: `base64url(json) "." base64url(hmac_sha256(key, json))`.
#[derive(Clone)]
pub struct CookieStore {
    key: Vec<u8>,
}

impl CookieStore {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
        }
    }

    fn mac(&self) -> Result<HmacSha256, AppError> {
        HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AppError::Internal(format!("Invalid session key: {}", e)))
    }

    fn verify(&self, token: &str) -> Option<SessionData> {
        let (payload, signature) = token.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac().ok()?;
        mac.update(&payload);
        // Constant-time comparison
        mac.verify_slice(&signature).ok()?;

        serde_json::from_slice(&payload).ok()
    }
}

impl SessionStore for CookieStore {
    fn load(&self, token: &str) -> SessionData {
        self.verify(token).unwrap_or_else(|| {
            tracing::debug!("Rejected session cookie");
            SessionData::default()
        })
    }

    fn save(&self, data: &SessionData) -> Result<String, AppError> {
        let payload = serde_json::to_vec(data)
            .map_err(|e| AppError::Internal(format!("Session encoding failed: {}", e)))?;

        let mut mac = self.mac()?;
        mac.update(&payload);
        let signature = mac.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(&payload),
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }
}

/// Session token stored under `name` in the request's cookie jar.
pub fn session_token<'a>(jar: &'a CookieJar, name: &str) -> Option<&'a str> {
    jar.get(name).map(|cookie| cookie.value())
}

fn build_cookie(name: &str, token: String, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(max_age)
        .build()
}

pub fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    build_cookie(name, token, Duration::seconds(SESSION_MAX_AGE_SECS))
}

/// Carries the empty-session token and expires immediately.
pub fn cleared_cookie(name: &str, token: String) -> Cookie<'static> {
    build_cookie(name, token, Duration::ZERO)
}
