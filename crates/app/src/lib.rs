//! # roomhub-app
//!
//! Application layer — the event-driven actuation pipeline and **port
//! definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - [`ports::SwitchInput`] — digital input sampling
//!   - [`ports::ActuatorOutput`] — digital and PWM output writes
//!   - [`ports::ClimateSensor`] — combined temperature/humidity reads
//!   - [`ports::WebEventSink`] — state-change notification delivery
//! - Provide the **in-process queues** connecting producers to consumers
//! - Run the **polling state machines** (switch edges, thermostat hysteresis)
//! - Run the **actuation executor**, the single consumer of the event queue
//! - Expose the **command ingestion** path shared by every user-triggered
//!   actuation
//!
//! ## Dependency rule
//! Depends on `roomhub-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod commands;
pub mod executor;
pub mod heartbeat;
pub mod ports;
pub mod queue;
pub mod registry;
pub mod switch_poller;
pub mod thermostat;
