//! `POST /api/v1/led` — system-status LED command.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use roomhub_app::ports::WebEventSink;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for setting a status LED.
#[derive(Debug, Deserialize)]
pub struct LedCommand {
    pub led_num: u8,
    pub led_val: i64,
}

/// Route the LED write through the actuation queue.
pub async fn set<S>(
    State(state): State<AppState<S>>,
    Json(cmd): Json<LedCommand>,
) -> Result<StatusCode, ApiError>
where
    S: WebEventSink + Send + Sync + 'static,
{
    state
        .commands
        .set_status_led(cmd.led_num, cmd.led_val != 0)?;
    Ok(StatusCode::NO_CONTENT)
}
