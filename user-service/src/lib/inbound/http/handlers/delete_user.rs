use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state.user_service.delete_user(&user_id).await?;

    tracing::info!(actor = %actor.user_id(), user_id = %user_id, "User deleted via API");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageData::new(format!("Delete user with ID={} success", user_id)),
    ))
}
