use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;

use super::ApiSuccess;
use super::MessageData;
use crate::inbound::http::cookies::expired_session_cookie;
use crate::inbound::http::router::AppState;

/// Tell the client to discard its token. Tokens are stateless, nothing is
/// invalidated server-side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, ApiSuccess<MessageData>) {
    (
        jar.add(expired_session_cookie(&state.cookie)),
        ApiSuccess::new(StatusCode::OK, MessageData::new("logout successful")),
    )
}
