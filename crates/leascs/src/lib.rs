//! leascs - LE Audio Audio Stream Control Service for Rust
//!
//! This library implements the server-side protocol core of the Audio
//! Stream Control Service (ASCS) used by Bluetooth LE Audio: the Audio
//! Stream Endpoint (ASE) state machine, the control point dispatcher,
//! and the TLV wire codec for codec, QoS, and metadata configuration.
//! It is transport-agnostic: the surrounding stack feeds it control
//! point writes as byte buffers and drains response payloads,
//! notifications, and typed application events.

pub mod ascs;
pub mod le_audio;

// Re-export common types for convenience
pub use ascs::{
    AscsError, AscsErrorCode, AscsEvent, AscsResult, AscsServer, AseRecord, AseState,
    ClientCodecConfigurationRequest, CodecConfiguration, ConnectionHandle, ControlPointResponse,
    Opcode, QosConfiguration, RejectReason, SpecificCodecConfiguration,
    SpecificCodecConfigurationMask,
};
pub use le_audio::{
    AudioContextMask, AudioLocation, CodecId, CodingFormat, FrameDuration, Framing, Metadata,
    MetadataError, Phy, PhyMask, Role, SamplingFrequency, TargetLatency, TargetPhy,
};
