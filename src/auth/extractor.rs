//! Actix-web extractors for session and admin-key authentication.
//!
//! # Security
//! - Admin keys from headers are wrapped in `SecretString` immediately
//! - Secret values are never logged or exposed in debug output
//! - Constant-time comparison is used for the admin key

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};
use uuid::Uuid;

use super::{AdminKey, SessionKeys};
use crate::config::ADMIN_KEY_HEADER;
use crate::error::ErrorResponse;

/// Extract a secret header value, wrapping it in SecretString.
/// Returns None if the header is missing or invalid UTF-8.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl AuthError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a valid session token (`Authorization: Bearer`).
///
/// Carries identity only. Handlers reload the profile to learn the current
/// role, so a demotion takes effect without waiting for the token to expire.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    pub user_id: Uuid,
    pub username: String,
}

fn authenticate_session(req: &HttpRequest) -> Result<SessionAuth, AuthError> {
    let keys = req
        .app_data::<web::Data<SessionKeys>>()
        .ok_or_else(|| AuthError::new("Internal configuration error"))?;

    let token = bearer_token(req)
        .ok_or_else(|| AuthError::new("Missing session token. Provide Authorization: Bearer."))?;

    let claims = keys.verify(token).map_err(AuthError::new)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AuthError::new("Invalid session token subject"))?;

    Ok(SessionAuth {
        user_id,
        username: claims.username,
    })
}

impl FromRequest for SessionAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_session(req))
    }
}

/// Either the bootstrap admin key (`X-Admin-Key`) or a user session.
///
/// The admin key is checked first; a wrong admin key is rejected outright
/// rather than falling through to the session.
#[derive(Debug, Clone)]
pub enum AdminOrSession {
    Admin,
    Session(SessionAuth),
}

impl FromRequest for AdminOrSession {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(provided) = extract_secret_header(req, ADMIN_KEY_HEADER) {
            let verified = req
                .app_data::<web::Data<AdminKey>>()
                .map(|key| key.verify(provided.expose_secret()))
                .unwrap_or(false);
            return ready(if verified {
                Ok(AdminOrSession::Admin)
            } else {
                Err(AuthError::new("Invalid admin key"))
            });
        }

        ready(authenticate_session(req).map(AdminOrSession::Session))
    }
}
