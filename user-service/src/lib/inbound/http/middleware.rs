use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;

use super::cookies::AUTH_COOKIE;
use super::handlers::ApiError;
use super::handlers::UNAUTHORIZED_MESSAGE;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Identity resolved by the auth gate for the current request.
///
/// Only the gate constructs it; handlers behind the gate read it from the
/// request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user_id: UserId,
}

impl AuthenticatedUser {
    pub(crate) fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Middleware that validates the `auth_token` cookie and adds the identity to
/// request extensions.
///
/// Missing, malformed, tampered and expired tokens all produce the same 401.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let jar = CookieJar::from_headers(req.headers());

    let token = match jar.get(AUTH_COOKIE).map(|cookie| cookie.value()) {
        Some(token) if !token.is_empty() => token,
        _ => {
            tracing::debug!("Rejected request without auth token");
            return Err(unauthorized());
        }
    };

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        unauthorized()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::error!("Failed to parse user ID from token: {}", e);
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedUser::new(user_id));

    Ok(next.run(req).await)
}

fn unauthorized() -> ApiError {
    ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
}
