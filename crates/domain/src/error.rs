//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`RoomHubError`]
//! via `#[from]`; adapters map the result onto their own surface (HTTP status
//! codes, log lines).

/// Top-level error returned by roomhub operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomHubError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced room or output does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A hardware collaborator failed.
    #[error("device error")]
    Device(#[from] DeviceError),

    /// An event could not be enqueued because the consumer is gone.
    #[error("queue closed")]
    QueueClosed(#[from] QueueClosed),
}

/// Violation of a domain invariant during construction or mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A room name must not be empty.
    #[error("name must not be empty")]
    EmptyName,
    /// A room needs either a dimmable or a binary light output.
    #[error("room has no light output configured")]
    MissingLightOutput,
    /// A room must not have both a dimmable and a binary light output.
    #[error("room has both a dimmable and a binary light output")]
    LightOutputConflict,
    /// A room needs a switch input for its light.
    #[error("room has no light switch configured")]
    MissingLightSwitch,
    /// The hysteresis band must have a positive width.
    #[error("deadband must be positive")]
    NonPositiveDeadband,
    /// The dimmable duty percentage is bounded by the PWM period.
    #[error("light percentage must be between 0 and 100")]
    LightPercentOutOfRange,
    /// The registry requires at least one room.
    #[error("room table must not be empty")]
    EmptyRoomTable,
    /// Room ids double as registry indexes and must be contiguous.
    #[error("room id {found} does not match its table index {expected}")]
    RoomIdMismatch { expected: u8, found: u8 },
}

/// A lookup by id failed.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A hardware collaborator failed.
///
/// [`NotReady`](DeviceError::NotReady) is only reported during startup and is
/// fatal to the whole process; the other variants are steady-state failures
/// that are logged and locally contained.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("device {device} is not ready")]
    NotReady { device: String },
    #[error("reading {device} failed")]
    ReadFailed { device: String },
    #[error("writing {device} failed")]
    WriteFailed { device: String },
}

/// Enqueue failed because the consumer has shut down.
///
/// The record is dropped; producers log and continue, matching the
/// degrade-one-operation contract for allocation failures in the original
/// design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("queue is closed")]
pub struct QueueClosed;
