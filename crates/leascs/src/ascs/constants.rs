//! ASCS protocol constants

/// Maximum number of stream endpoints the server exposes
pub const ASCS_STREAMENDPOINTS_MAX_NUM: usize = 5;
/// Maximum number of simultaneously connected clients
pub const ASCS_CLIENTS_MAX_NUM: usize = 5;

// ASE control point response codes
pub const ASCS_ERROR_CODE_SUCCESS: u8 = 0x00;
pub const ASCS_ERROR_CODE_UNSUPPORTED_OPCODE: u8 = 0x01;
pub const ASCS_ERROR_CODE_INVALID_LENGTH: u8 = 0x02;
pub const ASCS_ERROR_CODE_INVALID_ASE_ID: u8 = 0x03;
pub const ASCS_ERROR_CODE_INVALID_ASE_STATE_MACHINE_TRANSITION: u8 = 0x04;
pub const ASCS_ERROR_CODE_INVALID_ASE_DIRECTION: u8 = 0x05;
pub const ASCS_ERROR_CODE_UNSUPPORTED_AUDIO_CAPABILITIES: u8 = 0x06;
pub const ASCS_ERROR_CODE_UNSUPPORTED_CONFIGURATION_PARAMETER_VALUE: u8 = 0x07;
pub const ASCS_ERROR_CODE_REJECTED_CONFIGURATION_PARAMETER_VALUE: u8 = 0x08;
pub const ASCS_ERROR_CODE_INVALID_CONFIGURATION_PARAMETER_VALUE: u8 = 0x09;
pub const ASCS_ERROR_CODE_UNSUPPORTED_METADATA: u8 = 0x0A;
pub const ASCS_ERROR_CODE_REJECTED_METADATA: u8 = 0x0B;
pub const ASCS_ERROR_CODE_INVALID_METADATA: u8 = 0x0C;
pub const ASCS_ERROR_CODE_INSUFFICIENT_RESOURCES: u8 = 0x0D;
pub const ASCS_ERROR_CODE_UNSPECIFIED_ERROR: u8 = 0x0E;

// Reject reasons qualifying configuration parameter response codes
pub const ASCS_REJECT_REASON_CODEC_ID: u8 = 0x01;
pub const ASCS_REJECT_REASON_CODEC_SPECIFIC_CONFIGURATION: u8 = 0x02;
pub const ASCS_REJECT_REASON_SDU_INTERVAL: u8 = 0x03;
pub const ASCS_REJECT_REASON_FRAMING: u8 = 0x04;
pub const ASCS_REJECT_REASON_PHY: u8 = 0x05;
pub const ASCS_REJECT_REASON_MAXIMUM_SDU_SIZE: u8 = 0x06;
pub const ASCS_REJECT_REASON_RETRANSMISSION_NUMBER: u8 = 0x07;
pub const ASCS_REJECT_REASON_MAX_TRANSPORT_LATENCY: u8 = 0x08;
pub const ASCS_REJECT_REASON_PRESENTATION_DELAY: u8 = 0x09;
pub const ASCS_REJECT_REASON_INVALID_ASE_CIS_MAPPING: u8 = 0x0A;

// ASE control point opcodes
pub const ASCS_OPCODE_CONFIG_CODEC: u8 = 0x01;
pub const ASCS_OPCODE_CONFIG_QOS: u8 = 0x02;
pub const ASCS_OPCODE_ENABLE: u8 = 0x03;
pub const ASCS_OPCODE_RECEIVER_START_READY: u8 = 0x04;
pub const ASCS_OPCODE_DISABLE: u8 = 0x05;
pub const ASCS_OPCODE_RECEIVER_STOP_READY: u8 = 0x06;
pub const ASCS_OPCODE_UPDATE_METADATA: u8 = 0x07;
pub const ASCS_OPCODE_RELEASE: u8 = 0x08;
// 0x09 is the on-wire Released value; only the server drives it, a
// client writing it is rejected as an unsupported opcode.
pub const ASCS_OPCODE_RELEASED: u8 = 0x09;

// ASE states
pub const ASCS_STATE_IDLE: u8 = 0x00;
pub const ASCS_STATE_CODEC_CONFIGURED: u8 = 0x01;
pub const ASCS_STATE_QOS_CONFIGURED: u8 = 0x02;
pub const ASCS_STATE_ENABLING: u8 = 0x03;
pub const ASCS_STATE_STREAMING: u8 = 0x04;
pub const ASCS_STATE_DISABLING: u8 = 0x05;
pub const ASCS_STATE_RELEASING: u8 = 0x06;

// Codec specific configuration LTV types
pub const ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY: u8 = 0x01;
pub const ASCS_CODEC_CONFIGURATION_TYPE_FRAME_DURATION: u8 = 0x02;
pub const ASCS_CODEC_CONFIGURATION_TYPE_AUDIO_CHANNEL_ALLOCATION: u8 = 0x03;
pub const ASCS_CODEC_CONFIGURATION_TYPE_OCTETS_PER_CODEC_FRAME: u8 = 0x04;
pub const ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU: u8 = 0x05;

// Validation ranges
pub const ASCS_SDU_INTERVAL_US_MIN: u32 = 0x0000FF;
pub const ASCS_SDU_INTERVAL_US_MAX: u32 = 0x0FFFFF;
pub const ASCS_MAX_SDU_SIZE_MAX: u16 = 0x0FFF;
pub const ASCS_MAX_TRANSPORT_LATENCY_MS_MIN: u16 = 0x0005;
pub const ASCS_MAX_TRANSPORT_LATENCY_MS_MAX: u16 = 0x0FA0;
pub const ASCS_PRESENTATION_DELAY_US_MAX: u32 = 0x00FF_FFFF;

// Fixed wire sizes
/// QoS configuration, all fields fixed-layout
pub const ASCS_QOS_CONFIGURATION_SIZE: usize = 15;
/// Codec configuration up to and including the specific-configuration length byte
pub const ASCS_CODEC_CONFIGURATION_FIXED_SIZE: usize = 23;
/// Client codec configuration request up to and including the specific-configuration length byte
pub const ASCS_CODEC_CONFIGURATION_REQUEST_FIXED_SIZE: usize = 8;
/// Control point operation response: ase id, response code, reason
pub const ASCS_CONTROL_POINT_RESPONSE_SIZE: usize = 3;
