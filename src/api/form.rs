use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;

/// Username and password from a form post.
///
/// Accepts urlencoded and multipart bodies. Missing fields, and bodies of any
/// other content type, read as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl CredentialsForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = CredentialsForm::default();

        while let Some(field) = multipart.next_field().await.map_err(IntoResponse::into_response)? {
            let name = field.name().map(str::to_owned);
            let value = field.text().await.map_err(IntoResponse::into_response)?;
            match name.as_deref() {
                Some("username") => form.username = value,
                Some("password") => form.password = value,
                _ => {}
            }
        }

        Ok(form)
    }
}

#[async_trait]
impl<S> FromRequest<S> for CredentialsForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<CredentialsForm>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(form)
        } else {
            Ok(CredentialsForm::default())
        }
    }
}
