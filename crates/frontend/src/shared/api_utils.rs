//! API utilities for frontend-backend communication
//!
//! Every tenant-scoped call goes through the helpers below so that the bearer
//! header, error body extraction and 401/403 detection live in one place.

use contracts::shared::api_error::{extract_error_message, is_session_rejection};
use contracts::system::auth::Session;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Get the base URL for API requests
///
/// Taken from `VINOPS_API_BASE` at build time, `http://localhost:8080` otherwise.
pub fn api_base() -> &'static str {
    option_env!("VINOPS_API_BASE")
        .map(|base| base.trim_end_matches('/'))
        .filter(|base| !base.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust
/// # use vinops_frontend::shared::api_utils::api_url;
/// let url = api_url("/api/auth/login");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 401/403: the token is gone or no longer accepted.
    #[error("la sesión ha caducado")]
    Unauthorized,
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("error de red: {0}")]
    Network(String),
    #[error("respuesta no válida: {0}")]
    Decode(String),
    #[error("no hay sesión activa")]
    NoSession,
}

impl ApiError {
    pub fn is_session_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NoSession)
    }

    /// Inline text for the user. Backend text wins; `fallback` covers the rest.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Backend { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Unauthorized | ApiError::NoSession => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    /// Build the error for a non-2xx response from its status and body text.
    pub fn from_status(status: u16, body: &str) -> Self {
        if is_session_rejection(status) {
            return ApiError::Unauthorized;
        }
        let message = extract_error_message(body).unwrap_or_else(|| format!("HTTP {}", status));
        ApiError::Backend { status, message }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Post,
    Put,
    Patch,
}

fn builder(verb: Verb, url: &str) -> RequestBuilder {
    match verb {
        Verb::Post => Request::post(url),
        Verb::Put => Request::put(url),
        Verb::Patch => Request::patch(url),
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &body);
    log::warn!("API {} -> {}: {}", response.url(), status, err);
    Err(err)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET `path` (relative to the API base) as the signed-in user.
pub async fn get_json<T: DeserializeOwned>(session: &Session, path: &str) -> Result<T, ApiError> {
    let response = Request::get(&api_url(path))
        .header("Authorization", &session.bearer())
        .send()
        .await?;
    decode(check(response).await?).await
}

/// Send `body` as JSON and decode the JSON answer.
pub async fn send_json<B, T>(session: &Session, verb: Verb, path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = builder(verb, &api_url(path))
        .header("Authorization", &session.bearer())
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await?;
    decode(check(response).await?).await
}

/// Send `body` as JSON and ignore whatever comes back.
pub async fn send_json_no_content<B: Serialize>(
    session: &Session,
    verb: Verb,
    path: &str,
    body: &B,
) -> Result<(), ApiError> {
    let response = builder(verb, &api_url(path))
        .header("Authorization", &session.bearer())
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await?;
    check(response).await.map(|_| ())
}

/// Body-less POST (state transitions).
pub async fn post_empty(session: &Session, path: &str) -> Result<(), ApiError> {
    let response = Request::post(&api_url(path))
        .header("Authorization", &session.bearer())
        .send()
        .await?;
    check(response).await.map(|_| ())
}

pub async fn delete(session: &Session, path: &str) -> Result<(), ApiError> {
    let response = Request::delete(&api_url(path))
        .header("Authorization", &session.bearer())
        .send()
        .await?;
    check(response).await.map(|_| ())
}

/// Unauthenticated JSON POST (login, public registration).
pub async fn post_public<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = Request::post(&api_url(path))
        .json(body)
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .send()
        .await?;
    decode(check(response).await?).await
}

/// GET against a third-party service (absolute URL, no credentials).
pub async fn get_external<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let response = Request::get(url).send().await?;
    decode(check(response).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(ApiError::from_status(401, ""), ApiError::Unauthorized);
        assert_eq!(ApiError::from_status(403, "{\"message\":\"x\"}"), ApiError::Unauthorized);
        assert_eq!(
            ApiError::from_status(409, r#"{"message":"Lote con stock"}"#),
            ApiError::Backend {
                status: 409,
                message: "Lote con stock".to_string()
            }
        );
        assert_eq!(
            ApiError::from_status(500, ""),
            ApiError::Backend {
                status: 500,
                message: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn test_user_message() {
        let backend = ApiError::Backend {
            status: 400,
            message: "CIF duplicado".to_string(),
        };
        assert_eq!(backend.user_message("No se pudo guardar"), "CIF duplicado");
        let network = ApiError::Network("offline".to_string());
        assert_eq!(network.user_message("No se pudo guardar"), "No se pudo guardar");
        assert!(ApiError::Unauthorized.is_session_error());
        assert!(!network.is_session_error());
    }

    #[test]
    fn test_api_url_joins_base() {
        assert!(api_url("/api/auth/login").ends_with("/api/auth/login"));
        assert!(!api_base().ends_with('/'));
    }
}
