//! Axum router assembly.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use roomhub_app::ports::WebEventSink;

use crate::state::AppState;

/// Command payloads are a handful of integer fields; anything bigger than
/// this is rejected before buffering.
const MAX_COMMAND_BYTES: usize = 1024;

/// Build the top-level axum [`Router`].
///
/// Mounts the JSON API under `/api/v1`, the WebSocket upgrade at `/ws`, and
/// serves the static UI bundle from `static_dir` for everything else.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<S>(state: AppState<S>, static_dir: &str) -> Router
where
    S: WebEventSink + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(crate::api::ws::upgrade::<S>))
        .nest("/api/v1", crate::api::routes())
        .layer(DefaultBodyLimit::max(MAX_COMMAND_BYTES))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use roomhub_app::commands::CommandService;
    use roomhub_app::ports::WebEventSink;
    use roomhub_app::queue::{QueueReceiver, channel};
    use roomhub_app::registry::{RoomRegistry, StatusLeds};
    use roomhub_domain::event::Event;
    use roomhub_domain::room::{InputPin, OutputPin, PwmChannel, Room, RoomId};
    use roomhub_domain::web_event::{WebEvent, WebEventKind};

    use crate::clients::ClientSet;

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<WebEvent>>,
    }

    impl WebEventSink for RecordingSink {
        fn notify(&self, event: WebEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn test_app() -> (Router, QueueReceiver<Event>, Arc<RecordingSink>) {
        let rooms = vec![
            Room::builder()
                .id(RoomId(0))
                .name("Living Room")
                .light_switch(InputPin(4))
                .binary_output(OutputPin(3))
                .build()
                .unwrap(),
            Room::builder()
                .id(RoomId(1))
                .name("Kitchen")
                .light_switch(InputPin(5))
                .dimmable_output(PwmChannel {
                    channel: 0,
                    period: 20_000,
                })
                .build()
                .unwrap(),
        ];
        let leds = StatusLeds {
            power: OutputPin(0),
            info: OutputPin(1),
            error: OutputPin(2),
        };
        let registry = Arc::new(RoomRegistry::new(rooms, leds).unwrap());

        let sink = Arc::new(RecordingSink::default());
        let (tx, rx) = channel();
        let commands = CommandService::new(registry, tx, Arc::clone(&sink));
        let state = AppState::new(commands, ClientSet::new());

        (build(state, "static"), rx, sink)
    }

    fn post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let (app, _rx, _sink) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_list_rooms() {
        let (app, _rx, _sink) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/rooms")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_enqueue_event_pair_for_light_command() {
        let (app, mut rx, sink) = test_app();

        let response = app
            .oneshot(post("/api/v1/light", r#"{"room_id":1,"light_value":77}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            rx.try_recv(),
            Some(Event::SetDimmable {
                channel: PwmChannel {
                    channel: 0,
                    period: 20_000,
                },
                level: 77,
            })
        );
        assert_eq!(rx.try_recv(), None);
        assert_eq!(
            *sink.events.lock().unwrap(),
            vec![WebEvent::new(RoomId(1), WebEventKind::LightLevel, 77)]
        );
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_room() {
        let (app, mut rx, _sink) = test_app();

        let response = app
            .oneshot(post("/api/v1/light", r#"{"room_id":9,"light_value":77}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test]
    async fn should_reject_command_with_missing_field() {
        let (app, mut rx, sink) = test_app();

        let response = app
            .oneshot(post("/api/v1/light", r#"{"room_id":1}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert_eq!(rx.try_recv(), None);
        assert!(sink.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_malformed_json() {
        let (app, mut rx, _sink) = test_app();

        let response = app
            .oneshot(post("/api/v1/light", "{not json"))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test]
    async fn should_route_led_command_through_the_queue() {
        let (app, mut rx, _sink) = test_app();

        let response = app
            .oneshot(post("/api/v1/led", r#"{"led_num":2,"led_val":1}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            rx.try_recv(),
            Some(Event::SetBinary {
                pin: OutputPin(2),
                on: true,
            })
        );
    }

    #[tokio::test]
    async fn should_store_setpoint_without_actuation() {
        let (app, mut rx, sink) = test_app();

        let response = app
            .oneshot(post(
                "/api/v1/temp",
                r#"{"room_id":0,"desire_temp_value":23}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(rx.try_recv(), None);
        assert_eq!(
            *sink.events.lock().unwrap(),
            vec![WebEvent::new(RoomId(0), WebEventKind::DesiredTemperature, 23)]
        );
    }

    #[tokio::test]
    async fn should_reject_oversized_payload() {
        let (app, mut rx, _sink) = test_app();

        let padding = " ".repeat(MAX_COMMAND_BYTES * 2);
        let body = format!(r#"{{"room_id":1,"light_value":77{padding}}}"#);
        let response = app.oneshot(post("/api/v1/light", &body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test]
    async fn should_reject_plain_get_on_websocket_route() {
        let (app, _rx, _sink) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
            .await
            .unwrap();

        // No upgrade headers — the handshake must be refused.
        assert!(response.status().is_client_error());
    }
}
