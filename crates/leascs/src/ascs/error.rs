//! Error handling for the ASCS server core

use super::constants::*;
use crate::le_audio::MetadataError;
use thiserror::Error;

/// ASE control point response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AscsErrorCode {
    Success,
    UnsupportedOpcode,
    InvalidLength,
    InvalidAseId,
    InvalidAseStateMachineTransition,
    InvalidAseDirection,
    UnsupportedAudioCapabilities,
    UnsupportedConfigurationParameterValue,
    RejectedConfigurationParameterValue,
    InvalidConfigurationParameterValue,
    UnsupportedMetadata,
    RejectedMetadata,
    InvalidMetadata,
    InsufficientResources,
    UnspecifiedError,
    /// Unknown response code
    Unknown(u8),
}

impl From<u8> for AscsErrorCode {
    fn from(code: u8) -> Self {
        match code {
            ASCS_ERROR_CODE_SUCCESS => AscsErrorCode::Success,
            ASCS_ERROR_CODE_UNSUPPORTED_OPCODE => AscsErrorCode::UnsupportedOpcode,
            ASCS_ERROR_CODE_INVALID_LENGTH => AscsErrorCode::InvalidLength,
            ASCS_ERROR_CODE_INVALID_ASE_ID => AscsErrorCode::InvalidAseId,
            ASCS_ERROR_CODE_INVALID_ASE_STATE_MACHINE_TRANSITION => {
                AscsErrorCode::InvalidAseStateMachineTransition
            }
            ASCS_ERROR_CODE_INVALID_ASE_DIRECTION => AscsErrorCode::InvalidAseDirection,
            ASCS_ERROR_CODE_UNSUPPORTED_AUDIO_CAPABILITIES => {
                AscsErrorCode::UnsupportedAudioCapabilities
            }
            ASCS_ERROR_CODE_UNSUPPORTED_CONFIGURATION_PARAMETER_VALUE => {
                AscsErrorCode::UnsupportedConfigurationParameterValue
            }
            ASCS_ERROR_CODE_REJECTED_CONFIGURATION_PARAMETER_VALUE => {
                AscsErrorCode::RejectedConfigurationParameterValue
            }
            ASCS_ERROR_CODE_INVALID_CONFIGURATION_PARAMETER_VALUE => {
                AscsErrorCode::InvalidConfigurationParameterValue
            }
            ASCS_ERROR_CODE_UNSUPPORTED_METADATA => AscsErrorCode::UnsupportedMetadata,
            ASCS_ERROR_CODE_REJECTED_METADATA => AscsErrorCode::RejectedMetadata,
            ASCS_ERROR_CODE_INVALID_METADATA => AscsErrorCode::InvalidMetadata,
            ASCS_ERROR_CODE_INSUFFICIENT_RESOURCES => AscsErrorCode::InsufficientResources,
            ASCS_ERROR_CODE_UNSPECIFIED_ERROR => AscsErrorCode::UnspecifiedError,
            _ => AscsErrorCode::Unknown(code),
        }
    }
}

impl From<AscsErrorCode> for u8 {
    fn from(code: AscsErrorCode) -> u8 {
        match code {
            AscsErrorCode::Success => ASCS_ERROR_CODE_SUCCESS,
            AscsErrorCode::UnsupportedOpcode => ASCS_ERROR_CODE_UNSUPPORTED_OPCODE,
            AscsErrorCode::InvalidLength => ASCS_ERROR_CODE_INVALID_LENGTH,
            AscsErrorCode::InvalidAseId => ASCS_ERROR_CODE_INVALID_ASE_ID,
            AscsErrorCode::InvalidAseStateMachineTransition => {
                ASCS_ERROR_CODE_INVALID_ASE_STATE_MACHINE_TRANSITION
            }
            AscsErrorCode::InvalidAseDirection => ASCS_ERROR_CODE_INVALID_ASE_DIRECTION,
            AscsErrorCode::UnsupportedAudioCapabilities => {
                ASCS_ERROR_CODE_UNSUPPORTED_AUDIO_CAPABILITIES
            }
            AscsErrorCode::UnsupportedConfigurationParameterValue => {
                ASCS_ERROR_CODE_UNSUPPORTED_CONFIGURATION_PARAMETER_VALUE
            }
            AscsErrorCode::RejectedConfigurationParameterValue => {
                ASCS_ERROR_CODE_REJECTED_CONFIGURATION_PARAMETER_VALUE
            }
            AscsErrorCode::InvalidConfigurationParameterValue => {
                ASCS_ERROR_CODE_INVALID_CONFIGURATION_PARAMETER_VALUE
            }
            AscsErrorCode::UnsupportedMetadata => ASCS_ERROR_CODE_UNSUPPORTED_METADATA,
            AscsErrorCode::RejectedMetadata => ASCS_ERROR_CODE_REJECTED_METADATA,
            AscsErrorCode::InvalidMetadata => ASCS_ERROR_CODE_INVALID_METADATA,
            AscsErrorCode::InsufficientResources => ASCS_ERROR_CODE_INSUFFICIENT_RESOURCES,
            AscsErrorCode::UnspecifiedError => ASCS_ERROR_CODE_UNSPECIFIED_ERROR,
            AscsErrorCode::Unknown(code) => code,
        }
    }
}

/// Reason qualifying a rejected configuration parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    CodecId,
    SpecificCodecConfiguration,
    SduInterval,
    Framing,
    Phy,
    MaximumSduSize,
    RetransmissionNumber,
    MaxTransportLatency,
    PresentationDelay,
    InvalidAseCisMapping,
}

impl RejectReason {
    pub fn to_u8(self) -> u8 {
        match self {
            RejectReason::CodecId => ASCS_REJECT_REASON_CODEC_ID,
            RejectReason::SpecificCodecConfiguration => {
                ASCS_REJECT_REASON_CODEC_SPECIFIC_CONFIGURATION
            }
            RejectReason::SduInterval => ASCS_REJECT_REASON_SDU_INTERVAL,
            RejectReason::Framing => ASCS_REJECT_REASON_FRAMING,
            RejectReason::Phy => ASCS_REJECT_REASON_PHY,
            RejectReason::MaximumSduSize => ASCS_REJECT_REASON_MAXIMUM_SDU_SIZE,
            RejectReason::RetransmissionNumber => ASCS_REJECT_REASON_RETRANSMISSION_NUMBER,
            RejectReason::MaxTransportLatency => ASCS_REJECT_REASON_MAX_TRANSPORT_LATENCY,
            RejectReason::PresentationDelay => ASCS_REJECT_REASON_PRESENTATION_DELAY,
            RejectReason::InvalidAseCisMapping => ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            ASCS_REJECT_REASON_CODEC_ID => Some(RejectReason::CodecId),
            ASCS_REJECT_REASON_CODEC_SPECIFIC_CONFIGURATION => {
                Some(RejectReason::SpecificCodecConfiguration)
            }
            ASCS_REJECT_REASON_SDU_INTERVAL => Some(RejectReason::SduInterval),
            ASCS_REJECT_REASON_FRAMING => Some(RejectReason::Framing),
            ASCS_REJECT_REASON_PHY => Some(RejectReason::Phy),
            ASCS_REJECT_REASON_MAXIMUM_SDU_SIZE => Some(RejectReason::MaximumSduSize),
            ASCS_REJECT_REASON_RETRANSMISSION_NUMBER => Some(RejectReason::RetransmissionNumber),
            ASCS_REJECT_REASON_MAX_TRANSPORT_LATENCY => Some(RejectReason::MaxTransportLatency),
            ASCS_REJECT_REASON_PRESENTATION_DELAY => Some(RejectReason::PresentationDelay),
            ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING => Some(RejectReason::InvalidAseCisMapping),
            _ => None,
        }
    }
}

/// ASCS error type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AscsError {
    /// Truncated or malformed TLV framing
    #[error("invalid length")]
    InvalidLength,

    #[error("unsupported opcode {0:#04x}")]
    UnsupportedOpcode(u8),

    #[error("unknown ASE id {0}")]
    InvalidAseId(u8),

    #[error("operation not valid in the current ASE state")]
    InvalidAseStateMachineTransition,

    #[error("operation not valid for the ASE direction")]
    InvalidAseDirection,

    #[error("unsupported audio capabilities")]
    UnsupportedAudioCapabilities,

    #[error("unsupported configuration parameter: {0:?}")]
    UnsupportedConfigurationParameterValue(RejectReason),

    #[error("rejected configuration parameter: {0:?}")]
    RejectedConfigurationParameterValue(RejectReason),

    #[error("invalid configuration parameter: {0:?}")]
    InvalidConfigurationParameterValue(RejectReason),

    #[error("unsupported metadata type {0:#04x}")]
    UnsupportedMetadata(u8),

    #[error("rejected metadata type {0:#04x}")]
    RejectedMetadata(u8),

    #[error("invalid metadata type {0:#04x}")]
    InvalidMetadata(u8),

    #[error("insufficient resources")]
    InsufficientResources,

    #[error("unspecified error")]
    Unspecified,

    /// Serialization-side error, never sent on the wire
    #[error("destination buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// Transport-level error: the connection handle is not bound to a client slot
    #[error("unknown connection handle {0:#06x}")]
    UnknownConnection(u16),

    /// Transport-level error: the connection handle is already bound
    #[error("connection handle {0:#06x} already connected")]
    AlreadyConnected(u16),
}

impl AscsError {
    /// Response code byte for a control point operation response
    pub fn response_code(&self) -> AscsErrorCode {
        match self {
            AscsError::InvalidLength => AscsErrorCode::InvalidLength,
            AscsError::UnsupportedOpcode(_) => AscsErrorCode::UnsupportedOpcode,
            AscsError::InvalidAseId(_) => AscsErrorCode::InvalidAseId,
            AscsError::InvalidAseStateMachineTransition => {
                AscsErrorCode::InvalidAseStateMachineTransition
            }
            AscsError::InvalidAseDirection => AscsErrorCode::InvalidAseDirection,
            AscsError::UnsupportedAudioCapabilities => AscsErrorCode::UnsupportedAudioCapabilities,
            AscsError::UnsupportedConfigurationParameterValue(_) => {
                AscsErrorCode::UnsupportedConfigurationParameterValue
            }
            AscsError::RejectedConfigurationParameterValue(_) => {
                AscsErrorCode::RejectedConfigurationParameterValue
            }
            AscsError::InvalidConfigurationParameterValue(_) => {
                AscsErrorCode::InvalidConfigurationParameterValue
            }
            AscsError::UnsupportedMetadata(_) => AscsErrorCode::UnsupportedMetadata,
            AscsError::RejectedMetadata(_) => AscsErrorCode::RejectedMetadata,
            AscsError::InvalidMetadata(_) => AscsErrorCode::InvalidMetadata,
            AscsError::InsufficientResources => AscsErrorCode::InsufficientResources,
            AscsError::Unspecified
            | AscsError::BufferTooSmall { .. }
            | AscsError::UnknownConnection(_)
            | AscsError::AlreadyConnected(_) => AscsErrorCode::UnspecifiedError,
        }
    }

    /// Reason byte for a control point operation response.
    ///
    /// Configuration parameter errors carry the reject reason, metadata
    /// errors carry the offending metadata type, everything else zero.
    pub fn reason(&self) -> u8 {
        match self {
            AscsError::UnsupportedConfigurationParameterValue(reason)
            | AscsError::RejectedConfigurationParameterValue(reason)
            | AscsError::InvalidConfigurationParameterValue(reason) => reason.to_u8(),
            AscsError::UnsupportedMetadata(metadata_type)
            | AscsError::RejectedMetadata(metadata_type)
            | AscsError::InvalidMetadata(metadata_type) => *metadata_type,
            _ => 0,
        }
    }
}

impl From<MetadataError> for AscsError {
    fn from(error: MetadataError) -> Self {
        match error {
            MetadataError::Invalid(metadata_type) => AscsError::InvalidMetadata(metadata_type),
            MetadataError::Unsupported(metadata_type) => {
                AscsError::UnsupportedMetadata(metadata_type)
            }
            MetadataError::BufferTooSmall { needed, available } => {
                AscsError::BufferTooSmall { needed, available }
            }
        }
    }
}

// Cursor reads only fail on short buffers; fold them into the framing error.
impl From<std::io::Error> for AscsError {
    fn from(_: std::io::Error) -> Self {
        AscsError::InvalidLength
    }
}

/// ASCS result type
pub type AscsResult<T> = Result<T, AscsError>;
