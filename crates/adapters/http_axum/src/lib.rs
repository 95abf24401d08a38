//! # roomhub-adapter-http-axum
//!
//! HTTP adapter using axum.
//!
//! ## Responsibilities
//! - Serve the REST control surface under `/api/v1` (LED, light, and
//!   setpoint commands plus the rooms snapshot)
//! - Upgrade `/ws` connections and push one JSON frame per state change
//! - Run the **web notifier**: the single consumer of the web notification
//!   queue, fanning serialized frames out to every connected client
//! - Implement the core's [`WebEventSink`](roomhub_app::ports::WebEventSink)
//!   port by feeding that queue
//! - Serve the static UI bundle
//!
//! ## Dependency rule
//! Depends on `roomhub-domain` and `roomhub-app`. The application core never
//! learns how notifications are transported — it only sees the sink port.

pub mod api;
pub mod clients;
pub mod error;
pub mod notifier;
pub mod router;
pub mod sink;
pub mod state;
