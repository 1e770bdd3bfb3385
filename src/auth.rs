use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json, Router,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::ErrorResponse;

/// Claim structure for JWT tokens issued by the upstream identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user ID as a stringified integer
    pub sub: String,
    /// Issued at time
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

/// Authenticated caller identity, verified from the bearer token.
///
/// Handlers take this as an extractor and thread the user ID explicitly
/// into every service call; nothing downstream re-checks the token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

/// Verifies bearer tokens. Token issuance lives in the upstream identity
/// service; this side only holds the shared secret.
#[derive(Clone)]
pub struct AuthVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl AuthVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let user_id = data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::InvalidToken("subject is not a valid user id".to_string()))?;

        Ok(AuthenticatedUser { user_id })
    }
}

/// Authentication middleware that validates the bearer token and attaches
/// the verified caller to the request.
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let verifier = match request.extensions().get::<Arc<AuthVerifier>>() {
        Some(verifier) => verifier.clone(),
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication verifier not available",
            )
                .into_response();
        }
    };

    match extract_user_from_headers(request.headers(), &verifier) {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

fn extract_user_from_headers(
    headers: &HeaderMap,
    verifier: &AuthVerifier,
) -> Result<AuthenticatedUser, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::MissingToken)?;

    verifier.verify(token)
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid authentication token: {0}")]
    InvalidToken(String),
}

impl AuthError {
    fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = StatusCode::UNAUTHORIZED;
        let body = ErrorResponse::new(status, self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

/// Extension methods for Router to gate routes behind authentication.
pub trait AuthRouterExt {
    fn with_auth(self) -> Self;
}

impl<S> AuthRouterExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_auth(self) -> Self {
        self.layer(axum::middleware::from_fn(auth_middleware))
    }
}

/// Injects the verifier into request extensions so `auth_middleware` can
/// reach it regardless of router state type.
pub async fn verifier_middleware(
    State(verifier): State<Arc<AuthVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(verifier);
    next.run(request).await
}
