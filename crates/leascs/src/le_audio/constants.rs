//! Generic Audio constants shared by the LE Audio services

// Audio Location bitmap (Generic Audio assigned numbers)
pub const LE_AUDIO_LOCATION_NOT_ALLOWED: u32 = 0x0000_0000;
pub const LE_AUDIO_LOCATION_FRONT_LEFT: u32 = 0x0000_0001;
pub const LE_AUDIO_LOCATION_FRONT_RIGHT: u32 = 0x0000_0002;
pub const LE_AUDIO_LOCATION_FRONT_CENTER: u32 = 0x0000_0004;
pub const LE_AUDIO_LOCATION_LOW_FREQUENCY_EFFECTS1: u32 = 0x0000_0008;
pub const LE_AUDIO_LOCATION_BACK_LEFT: u32 = 0x0000_0010;
pub const LE_AUDIO_LOCATION_BACK_RIGHT: u32 = 0x0000_0020;
pub const LE_AUDIO_LOCATION_FRONT_LEFT_OF_CENTER: u32 = 0x0000_0040;
pub const LE_AUDIO_LOCATION_FRONT_RIGHT_OF_CENTER: u32 = 0x0000_0080;
pub const LE_AUDIO_LOCATION_BACK_CENTER: u32 = 0x0000_0100;
pub const LE_AUDIO_LOCATION_LOW_FREQUENCY_EFFECTS2: u32 = 0x0000_0200;
pub const LE_AUDIO_LOCATION_SIDE_LEFT: u32 = 0x0000_0400;
pub const LE_AUDIO_LOCATION_SIDE_RIGHT: u32 = 0x0000_0800;
pub const LE_AUDIO_LOCATION_TOP_FRONT_LEFT: u32 = 0x0000_1000;
pub const LE_AUDIO_LOCATION_TOP_FRONT_RIGHT: u32 = 0x0000_2000;
pub const LE_AUDIO_LOCATION_TOP_FRONT_CENTER: u32 = 0x0000_4000;
pub const LE_AUDIO_LOCATION_TOP_CENTER: u32 = 0x0000_8000;
pub const LE_AUDIO_LOCATION_TOP_BACK_LEFT: u32 = 0x0001_0000;
pub const LE_AUDIO_LOCATION_TOP_BACK_RIGHT: u32 = 0x0002_0000;
pub const LE_AUDIO_LOCATION_TOP_SIDE_LEFT: u32 = 0x0004_0000;
pub const LE_AUDIO_LOCATION_TOP_SIDE_RIGHT: u32 = 0x0008_0000;
pub const LE_AUDIO_LOCATION_TOP_BACK_CENTER: u32 = 0x0010_0000;
pub const LE_AUDIO_LOCATION_BOTTOM_FRONT_CENTER: u32 = 0x0020_0000;
pub const LE_AUDIO_LOCATION_BOTTOM_FRONT_LEFT: u32 = 0x0040_0000;
pub const LE_AUDIO_LOCATION_BOTTOM_FRONT_RIGHT: u32 = 0x0080_0000;
pub const LE_AUDIO_LOCATION_FRONT_LEFT_WIDE: u32 = 0x0100_0000;
pub const LE_AUDIO_LOCATION_FRONT_RIGHT_WIDE: u32 = 0x0200_0000;
pub const LE_AUDIO_LOCATION_LEFT_SURROUND: u32 = 0x0400_0000;
pub const LE_AUDIO_LOCATION_RIGHT_SURROUND: u32 = 0x0800_0000;

// Audio Context bitmap (Generic Audio assigned numbers)
pub const LE_AUDIO_CONTEXT_PROHIBITED: u16 = 0x0000;
pub const LE_AUDIO_CONTEXT_UNSPECIFIED: u16 = 0x0001;
pub const LE_AUDIO_CONTEXT_CONVERSATIONAL: u16 = 0x0002;
pub const LE_AUDIO_CONTEXT_MEDIA: u16 = 0x0004;
pub const LE_AUDIO_CONTEXT_GAME: u16 = 0x0008;
pub const LE_AUDIO_CONTEXT_INSTRUCTIONAL: u16 = 0x0010;
pub const LE_AUDIO_CONTEXT_VOICE_ASSISTANTS: u16 = 0x0020;
pub const LE_AUDIO_CONTEXT_LIVE: u16 = 0x0040;
pub const LE_AUDIO_CONTEXT_SOUND_EFFECTS: u16 = 0x0080;
pub const LE_AUDIO_CONTEXT_NOTIFICATIONS: u16 = 0x0100;
pub const LE_AUDIO_CONTEXT_RINGTONE: u16 = 0x0200;
pub const LE_AUDIO_CONTEXT_ALERTS: u16 = 0x0400;
pub const LE_AUDIO_CONTEXT_EMERGENCY_ALARM: u16 = 0x0800;

// Metadata LTV type values
pub const LE_AUDIO_METADATA_TYPE_PREFERRED_AUDIO_CONTEXTS: u8 = 0x01;
pub const LE_AUDIO_METADATA_TYPE_STREAMING_AUDIO_CONTEXTS: u8 = 0x02;
pub const LE_AUDIO_METADATA_TYPE_PROGRAM_INFO: u8 = 0x03;
pub const LE_AUDIO_METADATA_TYPE_LANGUAGE: u8 = 0x04;
pub const LE_AUDIO_METADATA_TYPE_CCID_LIST: u8 = 0x05;
pub const LE_AUDIO_METADATA_TYPE_PARENTAL_RATING: u8 = 0x06;
pub const LE_AUDIO_METADATA_TYPE_PROGRAM_INFO_URI: u8 = 0x07;
pub const LE_AUDIO_METADATA_TYPE_EXTENDED_METADATA: u8 = 0xFE;
pub const LE_AUDIO_METADATA_TYPE_VENDOR_SPECIFIC_METADATA: u8 = 0xFF;

// Upper bounds for the variable-length metadata values
pub const LE_AUDIO_PROGRAM_INFO_MAX_LENGTH: usize = 40;
pub const LE_AUDIO_PROGRAM_INFO_URI_MAX_LENGTH: usize = 40;
pub const LE_AUDIO_CCID_LIST_MAX_NUM: usize = 5;
pub const LE_AUDIO_EXTENDED_METADATA_MAX_LENGTH: usize = 40;
pub const LE_AUDIO_VENDOR_SPECIFIC_METADATA_MAX_LENGTH: usize = 40;

// Parental rating values; 0x05..0x0F map to "recommended for age (value + 3) and up"
pub const LE_AUDIO_PARENTAL_RATING_NO_RATING: u8 = 0x00;
pub const LE_AUDIO_PARENTAL_RATING_ANY_AGE: u8 = 0x01;

// HCI audio coding formats (Bluetooth assigned numbers)
pub const HCI_AUDIO_CODING_FORMAT_U_LAW: u8 = 0x00;
pub const HCI_AUDIO_CODING_FORMAT_A_LAW: u8 = 0x01;
pub const HCI_AUDIO_CODING_FORMAT_CVSD: u8 = 0x02;
pub const HCI_AUDIO_CODING_FORMAT_TRANSPARENT: u8 = 0x03;
pub const HCI_AUDIO_CODING_FORMAT_LINEAR_PCM: u8 = 0x04;
pub const HCI_AUDIO_CODING_FORMAT_MSBC: u8 = 0x05;
pub const HCI_AUDIO_CODING_FORMAT_LC3: u8 = 0x06;
pub const HCI_AUDIO_CODING_FORMAT_G729A: u8 = 0x07;
pub const HCI_AUDIO_CODING_FORMAT_VENDOR_SPECIFIC: u8 = 0xFF;

// Codec sampling frequency indices
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_8000_HZ: u8 = 0x01;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_11025_HZ: u8 = 0x02;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_16000_HZ: u8 = 0x03;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_22050_HZ: u8 = 0x04;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_24000_HZ: u8 = 0x05;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_32000_HZ: u8 = 0x06;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_44100_HZ: u8 = 0x07;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_48000_HZ: u8 = 0x08;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_88200_HZ: u8 = 0x09;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_96000_HZ: u8 = 0x0A;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_176400_HZ: u8 = 0x0B;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_192000_HZ: u8 = 0x0C;
pub const LE_AUDIO_SAMPLING_FREQUENCY_INDEX_384000_HZ: u8 = 0x0D;

// Codec frame duration indices
pub const LE_AUDIO_FRAME_DURATION_INDEX_7500_US: u8 = 0x00;
pub const LE_AUDIO_FRAME_DURATION_INDEX_10000_US: u8 = 0x01;

// PHY bitmap (server preference fields)
pub const LE_AUDIO_PHY_MASK_1M: u8 = 0x01;
pub const LE_AUDIO_PHY_MASK_2M: u8 = 0x02;
pub const LE_AUDIO_PHY_MASK_CODED: u8 = 0x04;

// PHY values (client/QoS fields)
pub const LE_AUDIO_PHY_1M: u8 = 0x01;
pub const LE_AUDIO_PHY_2M: u8 = 0x02;
pub const LE_AUDIO_PHY_CODED: u8 = 0x03;

// ISOAL framing
pub const LE_AUDIO_UNFRAMED_ISOAL_PDUS: u8 = 0x00;
pub const LE_AUDIO_FRAMED_ISOAL_PDUS: u8 = 0x01;

// Client target latency values
pub const LE_AUDIO_TARGET_LATENCY_LOW: u8 = 0x01;
pub const LE_AUDIO_TARGET_LATENCY_BALANCED: u8 = 0x02;
pub const LE_AUDIO_TARGET_LATENCY_HIGH_RELIABILITY: u8 = 0x03;

// Client target PHY values
pub const LE_AUDIO_TARGET_PHY_1M: u8 = 0x01;
pub const LE_AUDIO_TARGET_PHY_2M: u8 = 0x02;
pub const LE_AUDIO_TARGET_PHY_CODED: u8 = 0x03;
