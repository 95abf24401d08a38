//! `POST /api/v1/light` — room light command.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use roomhub_app::ports::WebEventSink;
use roomhub_domain::room::RoomId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for setting a room light.
#[derive(Debug, Deserialize)]
pub struct LightCommand {
    pub room_id: u8,
    pub light_value: u32,
}

/// Enqueue the light actuation and its mirrored web notification — the same
/// path the switch poller takes.
pub async fn set<S>(
    State(state): State<AppState<S>>,
    Json(cmd): Json<LightCommand>,
) -> Result<StatusCode, ApiError>
where
    S: WebEventSink + Send + Sync + 'static,
{
    state
        .commands
        .set_room_light(RoomId(cmd.room_id), cmd.light_value)?;
    Ok(StatusCode::NO_CONTENT)
}
