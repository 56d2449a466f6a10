//! Type definitions for the Generic Audio layer

use super::constants::*;
use bitflags::bitflags;

bitflags! {
    /// Audio Location bitmap, one bit per canonical speaker position
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AudioLocation: u32 {
        const FRONT_LEFT = LE_AUDIO_LOCATION_FRONT_LEFT;
        const FRONT_RIGHT = LE_AUDIO_LOCATION_FRONT_RIGHT;
        const FRONT_CENTER = LE_AUDIO_LOCATION_FRONT_CENTER;
        const LOW_FREQUENCY_EFFECTS1 = LE_AUDIO_LOCATION_LOW_FREQUENCY_EFFECTS1;
        const BACK_LEFT = LE_AUDIO_LOCATION_BACK_LEFT;
        const BACK_RIGHT = LE_AUDIO_LOCATION_BACK_RIGHT;
        const FRONT_LEFT_OF_CENTER = LE_AUDIO_LOCATION_FRONT_LEFT_OF_CENTER;
        const FRONT_RIGHT_OF_CENTER = LE_AUDIO_LOCATION_FRONT_RIGHT_OF_CENTER;
        const BACK_CENTER = LE_AUDIO_LOCATION_BACK_CENTER;
        const LOW_FREQUENCY_EFFECTS2 = LE_AUDIO_LOCATION_LOW_FREQUENCY_EFFECTS2;
        const SIDE_LEFT = LE_AUDIO_LOCATION_SIDE_LEFT;
        const SIDE_RIGHT = LE_AUDIO_LOCATION_SIDE_RIGHT;
        const TOP_FRONT_LEFT = LE_AUDIO_LOCATION_TOP_FRONT_LEFT;
        const TOP_FRONT_RIGHT = LE_AUDIO_LOCATION_TOP_FRONT_RIGHT;
        const TOP_FRONT_CENTER = LE_AUDIO_LOCATION_TOP_FRONT_CENTER;
        const TOP_CENTER = LE_AUDIO_LOCATION_TOP_CENTER;
        const TOP_BACK_LEFT = LE_AUDIO_LOCATION_TOP_BACK_LEFT;
        const TOP_BACK_RIGHT = LE_AUDIO_LOCATION_TOP_BACK_RIGHT;
        const TOP_SIDE_LEFT = LE_AUDIO_LOCATION_TOP_SIDE_LEFT;
        const TOP_SIDE_RIGHT = LE_AUDIO_LOCATION_TOP_SIDE_RIGHT;
        const TOP_BACK_CENTER = LE_AUDIO_LOCATION_TOP_BACK_CENTER;
        const BOTTOM_FRONT_CENTER = LE_AUDIO_LOCATION_BOTTOM_FRONT_CENTER;
        const BOTTOM_FRONT_LEFT = LE_AUDIO_LOCATION_BOTTOM_FRONT_LEFT;
        const BOTTOM_FRONT_RIGHT = LE_AUDIO_LOCATION_BOTTOM_FRONT_RIGHT;
        const FRONT_LEFT_WIDE = LE_AUDIO_LOCATION_FRONT_LEFT_WIDE;
        const FRONT_RIGHT_WIDE = LE_AUDIO_LOCATION_FRONT_RIGHT_WIDE;
        const LEFT_SURROUND = LE_AUDIO_LOCATION_LEFT_SURROUND;
        const RIGHT_SURROUND = LE_AUDIO_LOCATION_RIGHT_SURROUND;

        // RFU bits are carried through untouched
        const _ = !0;
    }
}

bitflags! {
    /// Audio Context bitmap, used by the metadata context fields
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AudioContextMask: u16 {
        const UNSPECIFIED = LE_AUDIO_CONTEXT_UNSPECIFIED;
        const CONVERSATIONAL = LE_AUDIO_CONTEXT_CONVERSATIONAL;
        const MEDIA = LE_AUDIO_CONTEXT_MEDIA;
        const GAME = LE_AUDIO_CONTEXT_GAME;
        const INSTRUCTIONAL = LE_AUDIO_CONTEXT_INSTRUCTIONAL;
        const VOICE_ASSISTANTS = LE_AUDIO_CONTEXT_VOICE_ASSISTANTS;
        const LIVE = LE_AUDIO_CONTEXT_LIVE;
        const SOUND_EFFECTS = LE_AUDIO_CONTEXT_SOUND_EFFECTS;
        const NOTIFICATIONS = LE_AUDIO_CONTEXT_NOTIFICATIONS;
        const RINGTONE = LE_AUDIO_CONTEXT_RINGTONE;
        const ALERTS = LE_AUDIO_CONTEXT_ALERTS;
        const EMERGENCY_ALARM = LE_AUDIO_CONTEXT_EMERGENCY_ALARM;

        const _ = !0;
    }
}

/// Direction of an audio stream endpoint, seen from the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Server receives audio (client is the audio source)
    Sink,
    /// Server sends audio (client is the audio sink)
    Source,
}

/// Codec sampling frequency, carried on the wire as an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingFrequency {
    Hz8000,
    Hz11025,
    Hz16000,
    Hz22050,
    Hz24000,
    Hz32000,
    Hz44100,
    Hz48000,
    Hz88200,
    Hz96000,
    Hz176400,
    Hz192000,
    Hz384000,
}

impl SamplingFrequency {
    /// Convert from the wire index
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_8000_HZ => Some(SamplingFrequency::Hz8000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_11025_HZ => Some(SamplingFrequency::Hz11025),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_16000_HZ => Some(SamplingFrequency::Hz16000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_22050_HZ => Some(SamplingFrequency::Hz22050),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_24000_HZ => Some(SamplingFrequency::Hz24000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_32000_HZ => Some(SamplingFrequency::Hz32000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_44100_HZ => Some(SamplingFrequency::Hz44100),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_48000_HZ => Some(SamplingFrequency::Hz48000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_88200_HZ => Some(SamplingFrequency::Hz88200),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_96000_HZ => Some(SamplingFrequency::Hz96000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_176400_HZ => Some(SamplingFrequency::Hz176400),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_192000_HZ => Some(SamplingFrequency::Hz192000),
            LE_AUDIO_SAMPLING_FREQUENCY_INDEX_384000_HZ => Some(SamplingFrequency::Hz384000),
            _ => None,
        }
    }

    /// Convert to the wire index
    pub fn to_u8(self) -> u8 {
        match self {
            SamplingFrequency::Hz8000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_8000_HZ,
            SamplingFrequency::Hz11025 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_11025_HZ,
            SamplingFrequency::Hz16000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_16000_HZ,
            SamplingFrequency::Hz22050 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_22050_HZ,
            SamplingFrequency::Hz24000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_24000_HZ,
            SamplingFrequency::Hz32000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_32000_HZ,
            SamplingFrequency::Hz44100 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_44100_HZ,
            SamplingFrequency::Hz48000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_48000_HZ,
            SamplingFrequency::Hz88200 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_88200_HZ,
            SamplingFrequency::Hz96000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_96000_HZ,
            SamplingFrequency::Hz176400 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_176400_HZ,
            SamplingFrequency::Hz192000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_192000_HZ,
            SamplingFrequency::Hz384000 => LE_AUDIO_SAMPLING_FREQUENCY_INDEX_384000_HZ,
        }
    }

    /// Sampling frequency in Hz
    pub fn hz(self) -> u32 {
        match self {
            SamplingFrequency::Hz8000 => 8_000,
            SamplingFrequency::Hz11025 => 11_025,
            SamplingFrequency::Hz16000 => 16_000,
            SamplingFrequency::Hz22050 => 22_050,
            SamplingFrequency::Hz24000 => 24_000,
            SamplingFrequency::Hz32000 => 32_000,
            SamplingFrequency::Hz44100 => 44_100,
            SamplingFrequency::Hz48000 => 48_000,
            SamplingFrequency::Hz88200 => 88_200,
            SamplingFrequency::Hz96000 => 96_000,
            SamplingFrequency::Hz176400 => 176_400,
            SamplingFrequency::Hz192000 => 192_000,
            SamplingFrequency::Hz384000 => 384_000,
        }
    }
}

/// Codec frame duration, carried on the wire as an index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDuration {
    /// 7.5 ms frames
    Us7500,
    /// 10 ms frames
    Us10000,
}

impl FrameDuration {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            LE_AUDIO_FRAME_DURATION_INDEX_7500_US => Some(FrameDuration::Us7500),
            LE_AUDIO_FRAME_DURATION_INDEX_10000_US => Some(FrameDuration::Us10000),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            FrameDuration::Us7500 => LE_AUDIO_FRAME_DURATION_INDEX_7500_US,
            FrameDuration::Us10000 => LE_AUDIO_FRAME_DURATION_INDEX_10000_US,
        }
    }
}

/// HCI audio coding format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodingFormat {
    ULaw,
    ALaw,
    Cvsd,
    Transparent,
    LinearPcm,
    Msbc,
    Lc3,
    G729a,
    VendorSpecific,
}

impl CodingFormat {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            HCI_AUDIO_CODING_FORMAT_U_LAW => Some(CodingFormat::ULaw),
            HCI_AUDIO_CODING_FORMAT_A_LAW => Some(CodingFormat::ALaw),
            HCI_AUDIO_CODING_FORMAT_CVSD => Some(CodingFormat::Cvsd),
            HCI_AUDIO_CODING_FORMAT_TRANSPARENT => Some(CodingFormat::Transparent),
            HCI_AUDIO_CODING_FORMAT_LINEAR_PCM => Some(CodingFormat::LinearPcm),
            HCI_AUDIO_CODING_FORMAT_MSBC => Some(CodingFormat::Msbc),
            HCI_AUDIO_CODING_FORMAT_LC3 => Some(CodingFormat::Lc3),
            HCI_AUDIO_CODING_FORMAT_G729A => Some(CodingFormat::G729a),
            HCI_AUDIO_CODING_FORMAT_VENDOR_SPECIFIC => Some(CodingFormat::VendorSpecific),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            CodingFormat::ULaw => HCI_AUDIO_CODING_FORMAT_U_LAW,
            CodingFormat::ALaw => HCI_AUDIO_CODING_FORMAT_A_LAW,
            CodingFormat::Cvsd => HCI_AUDIO_CODING_FORMAT_CVSD,
            CodingFormat::Transparent => HCI_AUDIO_CODING_FORMAT_TRANSPARENT,
            CodingFormat::LinearPcm => HCI_AUDIO_CODING_FORMAT_LINEAR_PCM,
            CodingFormat::Msbc => HCI_AUDIO_CODING_FORMAT_MSBC,
            CodingFormat::Lc3 => HCI_AUDIO_CODING_FORMAT_LC3,
            CodingFormat::G729a => HCI_AUDIO_CODING_FORMAT_G729A,
            CodingFormat::VendorSpecific => HCI_AUDIO_CODING_FORMAT_VENDOR_SPECIFIC,
        }
    }
}

/// Codec identifier: the triple uniquely identifies a codec.
///
/// `company_id` and `vendor_codec_id` are only meaningful for
/// `CodingFormat::VendorSpecific` and are zero otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecId {
    pub coding_format: CodingFormat,
    pub company_id: u16,
    pub vendor_codec_id: u16,
}

impl CodecId {
    /// LC3, the mandated LE Audio codec
    pub fn lc3() -> Self {
        Self {
            coding_format: CodingFormat::Lc3,
            company_id: 0,
            vendor_codec_id: 0,
        }
    }
}

impl Default for CodecId {
    fn default() -> Self {
        Self::lc3()
    }
}

/// PHY value as used in client requests and QoS configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phy {
    Le1M,
    Le2M,
    LeCoded,
}

impl Phy {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            LE_AUDIO_PHY_1M => Some(Phy::Le1M),
            LE_AUDIO_PHY_2M => Some(Phy::Le2M),
            LE_AUDIO_PHY_CODED => Some(Phy::LeCoded),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Phy::Le1M => LE_AUDIO_PHY_1M,
            Phy::Le2M => LE_AUDIO_PHY_2M,
            Phy::LeCoded => LE_AUDIO_PHY_CODED,
        }
    }
}

/// PHY preference bitmap as used in server-held codec configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhyMask(pub u8);

impl PhyMask {
    pub const LE_1M: u8 = LE_AUDIO_PHY_MASK_1M;
    pub const LE_2M: u8 = LE_AUDIO_PHY_MASK_2M;
    pub const LE_CODED: u8 = LE_AUDIO_PHY_MASK_CODED;

    pub fn supports_1m(&self) -> bool {
        (self.0 & Self::LE_1M) != 0
    }

    pub fn supports_2m(&self) -> bool {
        (self.0 & Self::LE_2M) != 0
    }

    pub fn supports_coded(&self) -> bool {
        (self.0 & Self::LE_CODED) != 0
    }
}

/// ISOAL framing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    #[default]
    Unframed,
    Framed,
}

impl Framing {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            LE_AUDIO_UNFRAMED_ISOAL_PDUS => Some(Framing::Unframed),
            LE_AUDIO_FRAMED_ISOAL_PDUS => Some(Framing::Framed),
            _ => None,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Framing::Unframed => LE_AUDIO_UNFRAMED_ISOAL_PDUS,
            Framing::Framed => LE_AUDIO_FRAMED_ISOAL_PDUS,
        }
    }
}

/// Client latency preference from a codec configuration request.
///
/// RFU values are carried through and treated as "no preference" during
/// negotiation; there is no reject reason assigned to this field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetLatency {
    Low,
    Balanced,
    HighReliability,
    Rfu(u8),
}

impl TargetLatency {
    pub fn from_u8(value: u8) -> Self {
        match value {
            LE_AUDIO_TARGET_LATENCY_LOW => TargetLatency::Low,
            LE_AUDIO_TARGET_LATENCY_BALANCED => TargetLatency::Balanced,
            LE_AUDIO_TARGET_LATENCY_HIGH_RELIABILITY => TargetLatency::HighReliability,
            other => TargetLatency::Rfu(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            TargetLatency::Low => LE_AUDIO_TARGET_LATENCY_LOW,
            TargetLatency::Balanced => LE_AUDIO_TARGET_LATENCY_BALANCED,
            TargetLatency::HighReliability => LE_AUDIO_TARGET_LATENCY_HIGH_RELIABILITY,
            TargetLatency::Rfu(other) => other,
        }
    }
}

/// Client PHY preference from a codec configuration request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPhy {
    Le1M,
    Le2M,
    LeCoded,
    Rfu(u8),
}

impl TargetPhy {
    pub fn from_u8(value: u8) -> Self {
        match value {
            LE_AUDIO_TARGET_PHY_1M => TargetPhy::Le1M,
            LE_AUDIO_TARGET_PHY_2M => TargetPhy::Le2M,
            LE_AUDIO_TARGET_PHY_CODED => TargetPhy::LeCoded,
            other => TargetPhy::Rfu(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            TargetPhy::Le1M => LE_AUDIO_TARGET_PHY_1M,
            TargetPhy::Le2M => LE_AUDIO_TARGET_PHY_2M,
            TargetPhy::LeCoded => LE_AUDIO_TARGET_PHY_CODED,
            TargetPhy::Rfu(other) => other,
        }
    }
}
