//! Type definitions for the ASCS server core

use super::constants::*;
use crate::le_audio::{
    AudioLocation, CodecId, Framing, FrameDuration, Metadata, Phy, PhyMask, Role,
    SamplingFrequency, TargetLatency, TargetPhy,
};

/// HCI connection handle identifying a connected client
pub type ConnectionHandle = u16;

/// ASE state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AseState {
    #[default]
    Idle,
    CodecConfigured,
    QosConfigured,
    Enabling,
    Streaming,
    Disabling,
    Releasing,
}

impl AseState {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            ASCS_STATE_IDLE => Some(AseState::Idle),
            ASCS_STATE_CODEC_CONFIGURED => Some(AseState::CodecConfigured),
            ASCS_STATE_QOS_CONFIGURED => Some(AseState::QosConfigured),
            ASCS_STATE_ENABLING => Some(AseState::Enabling),
            ASCS_STATE_STREAMING => Some(AseState::Streaming),
            ASCS_STATE_DISABLING => Some(AseState::Disabling),
            ASCS_STATE_RELEASING => Some(AseState::Releasing),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            AseState::Idle => ASCS_STATE_IDLE,
            AseState::CodecConfigured => ASCS_STATE_CODEC_CONFIGURED,
            AseState::QosConfigured => ASCS_STATE_QOS_CONFIGURED,
            AseState::Enabling => ASCS_STATE_ENABLING,
            AseState::Streaming => ASCS_STATE_STREAMING,
            AseState::Disabling => ASCS_STATE_DISABLING,
            AseState::Releasing => ASCS_STATE_RELEASING,
        }
    }
}

/// Client-writable ASE control point opcodes.
///
/// The on-wire Released value (0x09) is server-driven and deliberately
/// not part of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    ConfigCodec,
    ConfigQos,
    Enable,
    ReceiverStartReady,
    Disable,
    ReceiverStopReady,
    UpdateMetadata,
    Release,
}

impl Opcode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            ASCS_OPCODE_CONFIG_CODEC => Some(Opcode::ConfigCodec),
            ASCS_OPCODE_CONFIG_QOS => Some(Opcode::ConfigQos),
            ASCS_OPCODE_ENABLE => Some(Opcode::Enable),
            ASCS_OPCODE_RECEIVER_START_READY => Some(Opcode::ReceiverStartReady),
            ASCS_OPCODE_DISABLE => Some(Opcode::Disable),
            ASCS_OPCODE_RECEIVER_STOP_READY => Some(Opcode::ReceiverStopReady),
            ASCS_OPCODE_UPDATE_METADATA => Some(Opcode::UpdateMetadata),
            ASCS_OPCODE_RELEASE => Some(Opcode::Release),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Opcode::ConfigCodec => ASCS_OPCODE_CONFIG_CODEC,
            Opcode::ConfigQos => ASCS_OPCODE_CONFIG_QOS,
            Opcode::Enable => ASCS_OPCODE_ENABLE,
            Opcode::ReceiverStartReady => ASCS_OPCODE_RECEIVER_START_READY,
            Opcode::Disable => ASCS_OPCODE_DISABLE,
            Opcode::ReceiverStopReady => ASCS_OPCODE_RECEIVER_STOP_READY,
            Opcode::UpdateMetadata => ASCS_OPCODE_UPDATE_METADATA,
            Opcode::Release => ASCS_OPCODE_RELEASE,
        }
    }
}

/// Presence mask over the specific codec configuration LTV types,
/// bit `1 << (type - 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificCodecConfigurationMask(pub u8);

impl SpecificCodecConfigurationMask {
    pub const SAMPLING_FREQUENCY: u8 = 1 << (ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY - 1);
    pub const FRAME_DURATION: u8 = 1 << (ASCS_CODEC_CONFIGURATION_TYPE_FRAME_DURATION - 1);
    pub const AUDIO_CHANNEL_ALLOCATION: u8 =
        1 << (ASCS_CODEC_CONFIGURATION_TYPE_AUDIO_CHANNEL_ALLOCATION - 1);
    pub const OCTETS_PER_CODEC_FRAME: u8 =
        1 << (ASCS_CODEC_CONFIGURATION_TYPE_OCTETS_PER_CODEC_FRAME - 1);
    pub const CODEC_FRAME_BLOCKS_PER_SDU: u8 =
        1 << (ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU - 1);

    /// Mask covering every defined LTV type
    pub fn all() -> Self {
        Self(
            Self::SAMPLING_FREQUENCY
                | Self::FRAME_DURATION
                | Self::AUDIO_CHANNEL_ALLOCATION
                | Self::OCTETS_PER_CODEC_FRAME
                | Self::CODEC_FRAME_BLOCKS_PER_SDU,
        )
    }

    /// True if the bit for the given LTV type is set
    pub fn contains_type(&self, ltv_type: u8) -> bool {
        debug_assert!((1..=5).contains(&ltv_type));
        (self.0 & (1 << (ltv_type - 1))) != 0
    }
}

/// The codec's inner configuration block.
///
/// The original presence bitmask is replaced by optional fields: a field
/// is serialized exactly when it is `Some`, so presence and value cannot
/// be represented inconsistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecificCodecConfiguration {
    pub sampling_frequency: Option<SamplingFrequency>,
    pub frame_duration: Option<FrameDuration>,
    pub audio_channel_allocation: Option<AudioLocation>,
    pub octets_per_codec_frame: Option<u16>,
    pub codec_frame_blocks_per_sdu: Option<u8>,
}

impl SpecificCodecConfiguration {
    /// Presence mask derived from the optional fields
    pub fn mask(&self) -> SpecificCodecConfigurationMask {
        let mut mask = 0u8;
        if self.sampling_frequency.is_some() {
            mask |= SpecificCodecConfigurationMask::SAMPLING_FREQUENCY;
        }
        if self.frame_duration.is_some() {
            mask |= SpecificCodecConfigurationMask::FRAME_DURATION;
        }
        if self.audio_channel_allocation.is_some() {
            mask |= SpecificCodecConfigurationMask::AUDIO_CHANNEL_ALLOCATION;
        }
        if self.octets_per_codec_frame.is_some() {
            mask |= SpecificCodecConfigurationMask::OCTETS_PER_CODEC_FRAME;
        }
        if self.codec_frame_blocks_per_sdu.is_some() {
            mask |= SpecificCodecConfigurationMask::CODEC_FRAME_BLOCKS_PER_SDU;
        }
        SpecificCodecConfigurationMask(mask)
    }
}

/// Server-held codec configuration, the accepted state after a
/// Config Codec operation completed negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfiguration {
    pub framing: Framing,
    pub preferred_phy: PhyMask,
    pub preferred_retransmission_number: u8,
    /// 5..=4000 ms
    pub max_transport_latency_ms: u16,
    /// 24-bit microseconds
    pub presentation_delay_min_us: u32,
    /// 24-bit microseconds
    pub presentation_delay_max_us: u32,
    /// 24-bit microseconds, 0 = no preference
    pub preferred_presentation_delay_min_us: u32,
    /// 24-bit microseconds, 0 = no preference
    pub preferred_presentation_delay_max_us: u32,
    pub codec_id: CodecId,
    pub specific_codec_configuration: SpecificCodecConfiguration,
}

impl Default for CodecConfiguration {
    fn default() -> Self {
        Self {
            framing: Framing::Unframed,
            preferred_phy: PhyMask::default(),
            preferred_retransmission_number: 0,
            max_transport_latency_ms: ASCS_MAX_TRANSPORT_LATENCY_MS_MIN,
            presentation_delay_min_us: 0,
            presentation_delay_max_us: 0,
            preferred_presentation_delay_min_us: 0,
            preferred_presentation_delay_max_us: 0,
            codec_id: CodecId::default(),
            specific_codec_configuration: SpecificCodecConfiguration::default(),
        }
    }
}

/// Client-proposed codec configuration, before server negotiation.
///
/// Distinct from [`CodecConfiguration`]: it carries client preference,
/// and the server's accepted values may differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientCodecConfigurationRequest {
    pub target_latency: TargetLatency,
    pub target_phy: TargetPhy,
    pub codec_id: CodecId,
    pub specific_codec_configuration: SpecificCodecConfiguration,
}

/// QoS parameters for one CIS within a CIG
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QosConfiguration {
    pub cig_id: u8,
    pub cis_id: u8,
    /// 20-bit microseconds, 0xFF..=0xFFFFF
    pub sdu_interval_us: u32,
    pub framing: Framing,
    pub phy: Phy,
    /// <= 0xFFF
    pub max_sdu_size: u16,
    pub retransmission_number: u8,
    /// 5..=4000 ms
    pub max_transport_latency_ms: u16,
    /// 24-bit microseconds
    pub presentation_delay_us: u32,
}

impl Default for QosConfiguration {
    fn default() -> Self {
        Self {
            cig_id: 0,
            cis_id: 0,
            sdu_interval_us: ASCS_SDU_INTERVAL_US_MIN,
            framing: Framing::Unframed,
            phy: Phy::Le1M,
            max_sdu_size: 0,
            retransmission_number: 0,
            max_transport_latency_ms: ASCS_MAX_TRANSPORT_LATENCY_MS_MIN,
            presentation_delay_us: 0,
        }
    }
}

/// One endpoint's persistent state for one client slot.
///
/// Only the configuration records relevant to the current state are
/// meaningful; the others keep their reset values.
#[derive(Debug, Clone, PartialEq)]
pub struct AseRecord {
    pub ase_id: u8,
    pub role: Role,
    pub state: AseState,
    pub codec_configuration: CodecConfiguration,
    pub qos_configuration: QosConfiguration,
    pub metadata: Metadata,
    /// Whether the client (as opposed to the server) drove the most
    /// recent value change; used by higher layers for notification vs.
    /// indication semantics
    pub value_change_initiated_by_client: bool,
    /// At most one notification is pending per record; further changes
    /// coalesce into it
    pub value_changed_pending_notification: bool,
    /// Client configuration descriptor: state-change notifications on/off
    pub notifications_enabled: bool,
}

impl AseRecord {
    pub fn new(ase_id: u8, role: Role) -> Self {
        Self {
            ase_id,
            role,
            state: AseState::Idle,
            codec_configuration: CodecConfiguration::default(),
            qos_configuration: QosConfiguration::default(),
            metadata: Metadata::default(),
            value_change_initiated_by_client: false,
            value_changed_pending_notification: false,
            notifications_enabled: false,
        }
    }

    /// Back to Idle with all stored configuration cleared. The client
    /// configuration descriptor is left alone; disconnection handling
    /// clears it separately.
    pub(crate) fn clear_configuration(&mut self) {
        self.state = AseState::Idle;
        self.codec_configuration = CodecConfiguration::default();
        self.qos_configuration = QosConfiguration::default();
        self.metadata = Metadata::default();
    }
}

/// Result of one control point operation, ephemeral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlPointResponse {
    pub ase_id: u8,
    pub response_code: super::error::AscsErrorCode,
    pub reason: u8,
}

impl ControlPointResponse {
    pub fn success(ase_id: u8) -> Self {
        Self {
            ase_id,
            response_code: super::error::AscsErrorCode::Success,
            reason: 0,
        }
    }

    pub fn from_error(ase_id: u8, error: &super::error::AscsError) -> Self {
        Self {
            ase_id,
            response_code: error.response_code(),
            reason: error.reason(),
        }
    }
}
