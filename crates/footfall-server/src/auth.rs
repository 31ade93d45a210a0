//! Admin authentication.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::{ApiError, AppState, config::AuthMode};

/// The caller an admin request is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    /// Stable identifier of the caller.
    pub id: String,
    /// Contact address, when known.
    pub email: Option<String>,
}

impl Principal {
    /// The fixed principal used in [`AuthMode::Demo`].
    #[must_use]
    pub fn demo() -> Self {
        Self {
            id: "demo_admin".to_string(),
            email: Some("admin@footfall.local".to_string()),
        }
    }

    /// Principal for a caller authenticated by bearer token.
    ///
    /// Only a short prefix of the token is kept so it can appear in logs.
    fn from_token(index: usize, token: &str) -> Self {
        let prefix: String = token.chars().take(4).collect();
        Self {
            id: format!("token-{index}:{prefix}…"),
            email: None,
        }
    }
}

impl AuthMode {
    /// Resolves the principal for a request carrying `headers`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] in token mode when the header is
    /// missing, malformed, or carries an unknown token.
    ///
    /// Token bytes are compared in constant time.
    pub fn authorize(&self, headers: &HeaderMap) -> Result<Principal, ApiError> {
        let tokens = match self {
            Self::Demo => return Ok(Principal::demo()),
            Self::Token { tokens } => tokens,
        };

        let header = headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?
            .to_str()
            .map_err(|_| ApiError::Unauthorized("Malformed authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".to_string()))?;

        tokens
            .iter()
            .position(|known| bool::from(known.as_bytes().ct_eq(token.as_bytes())))
            .map(|index| Principal::from_token(index, token))
            .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))
    }
}

/// Middleware guarding admin routes.
///
/// On success the resolved [`Principal`] is stored as a request extension.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = state.auth().authorize(request.headers())?;
    debug!(principal = %principal.id, path = %request.uri().path(), "admin request");
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
