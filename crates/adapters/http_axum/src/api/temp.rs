//! `POST /api/v1/temp` — room temperature setpoint command.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use roomhub_app::ports::WebEventSink;
use roomhub_domain::room::RoomId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for setting a room's desired temperature.
#[derive(Debug, Deserialize)]
pub struct TempCommand {
    pub room_id: u8,
    pub desire_temp_value: i32,
}

/// Store the setpoint; the thermostat poller reacts on its next tick.
pub async fn set<S>(
    State(state): State<AppState<S>>,
    Json(cmd): Json<TempCommand>,
) -> Result<StatusCode, ApiError>
where
    S: WebEventSink + Send + Sync + 'static,
{
    state
        .commands
        .set_desired_temperature(RoomId(cmd.room_id), cmd.desire_temp_value)?;
    Ok(StatusCode::NO_CONTENT)
}
