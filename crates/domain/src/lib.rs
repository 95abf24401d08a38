//! # roomhub-domain
//!
//! Pure domain model for the roomhub home automation controller.
//!
//! ## Responsibilities
//! - Define **Rooms** (per-room wiring plus last-known values)
//! - Define **Events** (one-shot actuation commands aimed at an output)
//! - Define **WebEvents** (state-change notifications destined for UI clients)
//! - Typed handles for pins, PWM channels, and sensors
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod event;
pub mod room;
pub mod web_event;
