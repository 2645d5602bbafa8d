use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;

use super::register::RegisterUserRequest;
use super::ApiError;
use super::ApiSuccess;
use super::UserResponseData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Create a user on behalf of an authenticated caller.
pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, ApiError> {
    let user = state
        .user_service
        .create_user(body.try_into_command()?)
        .await?;

    tracing::info!(actor = %actor.user_id(), user_id = %user.id, "User created via API");

    Ok(ApiSuccess::new(StatusCode::CREATED, (&user).into()))
}
