//! Application events emitted by the ASCS server
//!
//! The server pushes typed events into an internal queue; the
//! surrounding service layer drains them with
//! [`AscsServer::poll_event`](super::server::AscsServer::poll_event) and
//! forwards them to its transport. This keeps the state machine
//! independent of any delivery mechanism.

use super::types::{
    AseState, CodecConfiguration, ConnectionHandle, ControlPointResponse, QosConfiguration,
};
use crate::le_audio::Metadata;

/// Event emitted towards the application layer
#[derive(Debug, Clone, PartialEq)]
pub enum AscsEvent {
    /// A Config Codec operation was accepted
    CodecConfigurationChanged {
        con_handle: ConnectionHandle,
        ase_id: u8,
        state: AseState,
        codec_configuration: CodecConfiguration,
    },
    /// A Config QoS operation was accepted
    QosConfigurationChanged {
        con_handle: ConnectionHandle,
        ase_id: u8,
        state: AseState,
        qos_configuration: QosConfiguration,
    },
    /// Metadata was stored or replaced by Enable / Update Metadata
    MetadataChanged {
        con_handle: ConnectionHandle,
        ase_id: u8,
        state: AseState,
        metadata: Metadata,
    },
    /// One control point operation completed, accepted or rejected
    ControlPointOperationResponse {
        con_handle: ConnectionHandle,
        response: ControlPointResponse,
    },
    /// The ASE entered a different state
    StreamendpointStateChanged {
        con_handle: ConnectionHandle,
        ase_id: u8,
        state: AseState,
    },
}
