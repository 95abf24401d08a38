//! # roomhub-adapter-virtual
//!
//! Virtual hardware adapter — an in-memory board implementing the hardware
//! ports for demo runs and tests. Switches and sensors can be driven from
//! test code; outputs can be inspected to observe actuations.

mod board;

pub use board::VirtualBoard;
