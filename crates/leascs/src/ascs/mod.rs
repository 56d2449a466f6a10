//! Audio Stream Control Service (ASCS) server core
//!
//! This module implements the server side of the ASCS control plane: the
//! per-endpoint ASE state machine, the control point dispatcher, and the
//! wire codec for the configuration records carried by control point
//! writes and state notifications. The GATT attribute table, the ATT
//! transport, and the link-layer CIG/CIS setup live outside; they talk
//! to this module through byte buffers, announcement methods, and the
//! emitted event queue.

pub mod codec;
pub mod constants;
pub mod error;
pub mod events;
pub mod server;
pub mod state_machine;
pub mod types;
mod tests;

// Re-export the public API
pub use self::constants::*;
pub use self::error::{AscsError, AscsErrorCode, AscsResult, RejectReason};
pub use self::events::AscsEvent;
pub use self::server::AscsServer;
pub use self::state_machine::{transition, ClientOperation, DrivingEvent};
pub use self::types::*;
