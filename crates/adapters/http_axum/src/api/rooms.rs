//! `GET /api/v1/rooms` — per-room snapshot.

use axum::Json;
use axum::extract::State;

use roomhub_app::ports::WebEventSink;
use roomhub_domain::room::RoomSnapshot;

use crate::state::AppState;

/// List every room's identity and last-known values, in id order.
pub async fn list<S>(State(state): State<AppState<S>>) -> Json<Vec<RoomSnapshot>>
where
    S: WebEventSink + Send + Sync + 'static,
{
    Json(state.commands.room_snapshots())
}
