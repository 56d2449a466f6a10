//! ASE state machine
//!
//! One transition function consumes every kind of driving event
//! (client control point operations, link layer completions, and client
//! disconnection), so the (state, event) space stays exhaustive and
//! centrally testable. A rejected event leaves the record untouched.

use super::error::{AscsError, AscsResult, RejectReason};
use super::types::{
    AseRecord, AseState, ClientCodecConfigurationRequest, CodecConfiguration, Opcode,
    QosConfiguration,
};
use crate::le_audio::{Framing, Metadata, PhyMask, Role, TargetLatency, TargetPhy};

/// A client-written control point operation with its parsed payload
#[derive(Debug, Clone, PartialEq)]
pub enum ClientOperation {
    ConfigCodec(ClientCodecConfigurationRequest),
    ConfigQos(QosConfiguration),
    Enable(Metadata),
    ReceiverStartReady,
    Disable,
    ReceiverStopReady,
    UpdateMetadata(Metadata),
    Release,
}

impl ClientOperation {
    pub fn opcode(&self) -> Opcode {
        match self {
            ClientOperation::ConfigCodec(_) => Opcode::ConfigCodec,
            ClientOperation::ConfigQos(_) => Opcode::ConfigQos,
            ClientOperation::Enable(_) => Opcode::Enable,
            ClientOperation::ReceiverStartReady => Opcode::ReceiverStartReady,
            ClientOperation::Disable => Opcode::Disable,
            ClientOperation::ReceiverStopReady => Opcode::ReceiverStopReady,
            ClientOperation::UpdateMetadata(_) => Opcode::UpdateMetadata,
            ClientOperation::Release => Opcode::Release,
        }
    }
}

/// Everything that can drive an ASE record forward
#[derive(Debug, Clone, PartialEq)]
pub enum DrivingEvent {
    /// Control point write from the client
    Client(ClientOperation),
    /// The link layer established the CIS for a source ASE in Enabling
    CisEstablished,
    /// The server completed a release; the ASE returns to Idle
    Released,
    /// The owning client disconnected
    ClientDisconnected,
}

/// Apply one driving event to one ASE record.
///
/// `cis_known` reports whether the CIG/CIS referenced by a Config QoS
/// payload has already been created by the link layer manager; it is
/// ignored for every other event.
pub fn transition(record: &mut AseRecord, event: DrivingEvent, cis_known: bool) -> AscsResult<()> {
    match event {
        DrivingEvent::Client(operation) => client_transition(record, operation, cis_known),
        DrivingEvent::CisEstablished => {
            if record.state != AseState::Enabling || record.role != Role::Source {
                return Err(AscsError::InvalidAseStateMachineTransition);
            }
            record.state = AseState::Streaming;
            Ok(())
        }
        DrivingEvent::Released => {
            if record.state != AseState::Releasing {
                return Err(AscsError::InvalidAseStateMachineTransition);
            }
            record.clear_configuration();
            Ok(())
        }
        DrivingEvent::ClientDisconnected => {
            record.clear_configuration();
            record.value_change_initiated_by_client = false;
            record.value_changed_pending_notification = false;
            Ok(())
        }
    }
}

fn client_transition(
    record: &mut AseRecord,
    operation: ClientOperation,
    cis_known: bool,
) -> AscsResult<()> {
    match operation {
        ClientOperation::ConfigCodec(request) => {
            match record.state {
                AseState::Idle | AseState::CodecConfigured | AseState::QosConfigured => {}
                _ => return Err(AscsError::InvalidAseStateMachineTransition),
            }
            record.codec_configuration = accept_codec_configuration(&request);
            record.state = AseState::CodecConfigured;
            Ok(())
        }
        ClientOperation::ConfigQos(qos) => {
            match record.state {
                AseState::CodecConfigured | AseState::QosConfigured => {}
                _ => return Err(AscsError::InvalidAseStateMachineTransition),
            }
            if !cis_known {
                return Err(AscsError::RejectedConfigurationParameterValue(
                    RejectReason::InvalidAseCisMapping,
                ));
            }
            record.qos_configuration = qos;
            record.state = AseState::QosConfigured;
            Ok(())
        }
        ClientOperation::Enable(metadata) => {
            if record.state != AseState::QosConfigured {
                return Err(AscsError::InvalidAseStateMachineTransition);
            }
            record.metadata = metadata;
            record.state = AseState::Enabling;
            Ok(())
        }
        ClientOperation::ReceiverStartReady => {
            if record.state != AseState::Enabling {
                return Err(AscsError::InvalidAseStateMachineTransition);
            }
            // Source ASEs reach Streaming autonomously on CIS establishment
            if record.role != Role::Sink {
                return Err(AscsError::InvalidAseDirection);
            }
            record.state = AseState::Streaming;
            Ok(())
        }
        ClientOperation::Disable => {
            match record.state {
                AseState::Enabling | AseState::Streaming => {}
                _ => return Err(AscsError::InvalidAseStateMachineTransition),
            }
            // A source ASE has no Disabling phase
            record.state = match record.role {
                Role::Sink => AseState::Disabling,
                Role::Source => AseState::QosConfigured,
            };
            Ok(())
        }
        ClientOperation::ReceiverStopReady => {
            if record.state != AseState::Disabling {
                return Err(AscsError::InvalidAseStateMachineTransition);
            }
            record.state = AseState::QosConfigured;
            Ok(())
        }
        ClientOperation::UpdateMetadata(metadata) => {
            match record.state {
                AseState::Enabling | AseState::Streaming => {}
                _ => return Err(AscsError::InvalidAseStateMachineTransition),
            }
            record.metadata = metadata;
            Ok(())
        }
        ClientOperation::Release => {
            if record.state == AseState::Idle {
                return Err(AscsError::InvalidAseStateMachineTransition);
            }
            // The CIS association is dropped here; stored configuration is
            // cleared once the server completes the release
            record.state = AseState::Releasing;
            Ok(())
        }
    }
}

/// Derive the server's accepted codec configuration from a client
/// request. The client's codec id and specific configuration are taken
/// as offered; the preference fields follow the requested latency class
/// and PHY, with RFU values treated as no preference.
fn accept_codec_configuration(request: &ClientCodecConfigurationRequest) -> CodecConfiguration {
    let preferred_phy = match request.target_phy {
        TargetPhy::Le1M => PhyMask(PhyMask::LE_1M),
        TargetPhy::Le2M => PhyMask(PhyMask::LE_2M),
        TargetPhy::LeCoded => PhyMask(PhyMask::LE_CODED),
        TargetPhy::Rfu(_) => PhyMask(PhyMask::LE_1M | PhyMask::LE_2M),
    };
    let (preferred_retransmission_number, max_transport_latency_ms) = match request.target_latency {
        TargetLatency::Low => (2, 10),
        TargetLatency::Balanced | TargetLatency::Rfu(_) => (5, 25),
        TargetLatency::HighReliability => (13, 100),
    };
    CodecConfiguration {
        framing: Framing::Unframed,
        preferred_phy,
        preferred_retransmission_number,
        max_transport_latency_ms,
        presentation_delay_min_us: 0,
        presentation_delay_max_us: 40_000,
        preferred_presentation_delay_min_us: 0,
        preferred_presentation_delay_max_us: 0,
        codec_id: request.codec_id,
        specific_codec_configuration: request.specific_codec_configuration,
    }
}
