//! JSON REST handlers under `/api/v1`.

use axum::Router;
use axum::routing::{get, post};

use roomhub_app::ports::WebEventSink;

use crate::state::AppState;

pub mod led;
pub mod light;
pub mod rooms;
pub mod temp;
pub mod ws;

/// Assemble the `/api/v1` routes.
pub fn routes<S>() -> Router<AppState<S>>
where
    S: WebEventSink + Send + Sync + 'static,
{
    Router::new()
        .route("/led", post(led::set::<S>))
        .route("/light", post(light::set::<S>))
        .route("/temp", post(temp::set::<S>))
        .route("/rooms", get(rooms::list::<S>))
}
