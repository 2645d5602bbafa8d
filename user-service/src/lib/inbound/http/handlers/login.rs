use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use super::INVALID_CREDENTIALS_MESSAGE;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::cookies::session_cookie;
use crate::inbound::http::router::AppState;

/// Verify credentials and hand the token to the client as an HttpOnly cookie.
///
/// An unreadable body gets the same 401 as a wrong password.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(status = %rejection.status(), "Login rejected: unreadable body");
        ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
    })?;

    let session = state
        .user_service
        .login(LoginCommand::new(body.email, body.password))
        .await?;

    let jar = jar.add(session_cookie(session.token, &state.cookie));

    Ok((
        jar,
        ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                message: "login successful".to_string(),
                user: (&session.user).into(),
                expires_at: session.expires_at,
            },
        ),
    ))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub message: String,
    pub user: UserResponseData,
    pub expires_at: DateTime<Utc>,
}
