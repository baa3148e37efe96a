//! Cookie-based session tokens.
//!
//! `POST /jwt` signs an HS256 token for the caller and stores it in an
//! HTTP-only `token` cookie. Gated handlers take an [`AuthUser`], which
//! verifies that cookie before the handler body runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::AppState;

/// Name of the session cookie.
pub const TOKEN_COOKIE: &str = "token";

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Email the caller logged in with.
    pub email: String,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Signing material plus the token lifetime.
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Sign a token for `email` that expires after the configured lifetime.
    pub fn issue(&self, email: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Check signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims)
    }
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(token: &str, ttl_secs: i64, production: bool) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; Max-Age={}; {}",
        TOKEN_COOKIE,
        token,
        ttl_secs,
        cookie_policy(production)
    )
}

/// `Set-Cookie` value that expires the session cookie immediately.
pub fn clear_cookie(production: bool) -> String {
    format!(
        "{}=; HttpOnly; Path=/; Max-Age=0; {}",
        TOKEN_COOKIE,
        cookie_policy(production)
    )
}

fn cookie_policy(production: bool) -> &'static str {
    // The hosted frontend lives on another site, which needs SameSite=None
    if production {
        "SameSite=None; Secure"
    } else {
        "SameSite=Strict"
    }
}

/// Pull a cookie value out of the `Cookie` request headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

/// Caller identity decoded from a valid session cookie.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = read_cookie(&parts.headers, TOKEN_COOKIE) else {
            tracing::debug!("Rejected request without session cookie");
            return Err(AppError::unauthorized());
        };

        let claims = state.keys.verify(token).map_err(|e| {
            tracing::debug!("Rejected session token: {}", e);
            AppError::unauthorized()
        })?;

        Ok(AuthUser {
            email: claims.email,
        })
    }
}
