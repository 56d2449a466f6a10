//! Wire codec for the ASCS configuration records
//!
//! Parsing never reads past the supplied buffer and never trusts an
//! internal length field that would cause an over-read. Serialization
//! mirrors parsing: a serialized record parses back equal to its input,
//! and nothing is written when the destination capacity is insufficient.
//!
//! The codec specific configuration travels as LTV entries
//! (`length(1) | type(1) | value(length - 1)`, the declared length counts
//! the type byte); the remaining records use fixed little-endian layouts.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::constants::*;
use super::error::{AscsError, AscsErrorCode, AscsResult, RejectReason};
use super::types::*;
use crate::le_audio::{
    AudioLocation, CodecId, CodingFormat, Framing, FrameDuration, Phy, PhyMask, SamplingFrequency,
    TargetLatency, TargetPhy,
};

/// Fixed value length for a known codec configuration LTV type
fn expected_value_length(ltv_type: u8) -> Option<usize> {
    match ltv_type {
        ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY => Some(1),
        ASCS_CODEC_CONFIGURATION_TYPE_FRAME_DURATION => Some(1),
        ASCS_CODEC_CONFIGURATION_TYPE_AUDIO_CHANNEL_ALLOCATION => Some(4),
        ASCS_CODEC_CONFIGURATION_TYPE_OCTETS_PER_CODEC_FRAME => Some(2),
        ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU => Some(1),
        _ => None,
    }
}

impl SpecificCodecConfiguration {
    /// Parse a complete LTV sequence.
    ///
    /// A declared entry length that disagrees with the fixed length
    /// expected for its type is a framing error. Unrecognized types are
    /// skipped but their declared bytes are still consumed.
    pub fn parse(data: &[u8]) -> AscsResult<Self> {
        let mut config = SpecificCodecConfiguration::default();
        let mut offset = 0usize;

        while offset < data.len() {
            let entry_length = data[offset] as usize;
            if entry_length == 0 || offset + 1 + entry_length > data.len() {
                return Err(AscsError::InvalidLength);
            }
            let ltv_type = data[offset + 1];
            let value = &data[offset + 2..offset + 1 + entry_length];

            if let Some(expected) = expected_value_length(ltv_type) {
                if value.len() != expected {
                    return Err(AscsError::InvalidLength);
                }
                config.apply_entry(ltv_type, value)?;
            }
            offset += 1 + entry_length;
        }

        Ok(config)
    }

    fn apply_entry(&mut self, ltv_type: u8, value: &[u8]) -> AscsResult<()> {
        match ltv_type {
            ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY => {
                let frequency = SamplingFrequency::from_u8(value[0]).ok_or(
                    AscsError::UnsupportedConfigurationParameterValue(
                        RejectReason::SpecificCodecConfiguration,
                    ),
                )?;
                self.sampling_frequency = Some(frequency);
            }
            ASCS_CODEC_CONFIGURATION_TYPE_FRAME_DURATION => {
                let duration = FrameDuration::from_u8(value[0]).ok_or(
                    AscsError::UnsupportedConfigurationParameterValue(
                        RejectReason::SpecificCodecConfiguration,
                    ),
                )?;
                self.frame_duration = Some(duration);
            }
            ASCS_CODEC_CONFIGURATION_TYPE_AUDIO_CHANNEL_ALLOCATION => {
                let mask = u32::from_le_bytes([value[0], value[1], value[2], value[3]]);
                self.audio_channel_allocation = Some(AudioLocation::from_bits_retain(mask));
            }
            ASCS_CODEC_CONFIGURATION_TYPE_OCTETS_PER_CODEC_FRAME => {
                self.octets_per_codec_frame = Some(u16::from_le_bytes([value[0], value[1]]));
            }
            ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU => {
                self.codec_frame_blocks_per_sdu = Some(value[0]);
            }
            _ => unreachable!("filtered by expected_value_length"),
        }
        Ok(())
    }

    /// Number of bytes a masked serialization would occupy
    pub fn serialized_length_with_mask(&self, mask: SpecificCodecConfigurationMask) -> usize {
        let present = self.mask();
        let mut length = 0usize;
        for ltv_type in ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY
            ..=ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU
        {
            if mask.contains_type(ltv_type) && present.contains_type(ltv_type) {
                // Cannot fail for defined types
                length += 2 + expected_value_length(ltv_type).unwrap_or(0);
            }
        }
        length
    }

    pub fn serialized_length(&self) -> usize {
        self.serialized_length_with_mask(self.mask())
    }

    /// Serialize the entries that are both present and selected by the
    /// mask, in ascending type order.
    pub fn serialize_with_mask(
        &self,
        mask: SpecificCodecConfigurationMask,
        buffer: &mut [u8],
    ) -> AscsResult<usize> {
        let needed = self.serialized_length_with_mask(mask);
        if buffer.len() < needed {
            return Err(AscsError::BufferTooSmall {
                needed,
                available: buffer.len(),
            });
        }

        let mut offset = 0usize;
        if mask.contains_type(ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY) {
            if let Some(frequency) = self.sampling_frequency {
                offset += write_ltv(
                    &mut buffer[offset..],
                    ASCS_CODEC_CONFIGURATION_TYPE_SAMPLING_FREQUENCY,
                    &[frequency.to_u8()],
                );
            }
        }
        if mask.contains_type(ASCS_CODEC_CONFIGURATION_TYPE_FRAME_DURATION) {
            if let Some(duration) = self.frame_duration {
                offset += write_ltv(
                    &mut buffer[offset..],
                    ASCS_CODEC_CONFIGURATION_TYPE_FRAME_DURATION,
                    &[duration.to_u8()],
                );
            }
        }
        if mask.contains_type(ASCS_CODEC_CONFIGURATION_TYPE_AUDIO_CHANNEL_ALLOCATION) {
            if let Some(allocation) = self.audio_channel_allocation {
                offset += write_ltv(
                    &mut buffer[offset..],
                    ASCS_CODEC_CONFIGURATION_TYPE_AUDIO_CHANNEL_ALLOCATION,
                    &allocation.bits().to_le_bytes(),
                );
            }
        }
        if mask.contains_type(ASCS_CODEC_CONFIGURATION_TYPE_OCTETS_PER_CODEC_FRAME) {
            if let Some(octets) = self.octets_per_codec_frame {
                offset += write_ltv(
                    &mut buffer[offset..],
                    ASCS_CODEC_CONFIGURATION_TYPE_OCTETS_PER_CODEC_FRAME,
                    &octets.to_le_bytes(),
                );
            }
        }
        if mask.contains_type(ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU) {
            if let Some(blocks) = self.codec_frame_blocks_per_sdu {
                offset += write_ltv(
                    &mut buffer[offset..],
                    ASCS_CODEC_CONFIGURATION_TYPE_CODEC_FRAME_BLOCKS_PER_SDU,
                    &[blocks],
                );
            }
        }

        Ok(offset)
    }

    /// Serialize all present entries
    pub fn serialize_into(&self, buffer: &mut [u8]) -> AscsResult<usize> {
        self.serialize_with_mask(self.mask(), buffer)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; self.serialized_length()];
        let written = self.serialize_into(&mut buffer).unwrap_or(0);
        buffer.truncate(written);
        buffer
    }
}

fn write_ltv(buffer: &mut [u8], ltv_type: u8, value: &[u8]) -> usize {
    buffer[0] = (value.len() + 1) as u8;
    buffer[1] = ltv_type;
    buffer[2..2 + value.len()].copy_from_slice(value);
    2 + value.len()
}

fn parse_codec_id(cursor: &mut Cursor<&[u8]>) -> AscsResult<CodecId> {
    let coding_format = CodingFormat::from_u8(cursor.read_u8()?).ok_or(
        AscsError::UnsupportedConfigurationParameterValue(RejectReason::CodecId),
    )?;
    let company_id = cursor.read_u16::<LittleEndian>()?;
    let vendor_codec_id = cursor.read_u16::<LittleEndian>()?;
    Ok(CodecId {
        coding_format,
        company_id,
        vendor_codec_id,
    })
}

fn write_codec_id(bytes: &mut Vec<u8>, codec_id: &CodecId) {
    bytes.push(codec_id.coding_format.to_u8());
    bytes.extend_from_slice(&codec_id.company_id.to_le_bytes());
    bytes.extend_from_slice(&codec_id.vendor_codec_id.to_le_bytes());
}

fn check_presentation_delay(value_us: u32) -> AscsResult<u32> {
    if value_us > ASCS_PRESENTATION_DELAY_US_MAX {
        return Err(AscsError::InvalidConfigurationParameterValue(
            RejectReason::PresentationDelay,
        ));
    }
    Ok(value_us)
}

fn check_max_transport_latency(value_ms: u16) -> AscsResult<u16> {
    if !(ASCS_MAX_TRANSPORT_LATENCY_MS_MIN..=ASCS_MAX_TRANSPORT_LATENCY_MS_MAX).contains(&value_ms)
    {
        return Err(AscsError::InvalidConfigurationParameterValue(
            RejectReason::MaxTransportLatency,
        ));
    }
    Ok(value_ms)
}

impl CodecConfiguration {
    /// Parse the fixed-layout fields followed by the codec specific
    /// configuration LTVs. Returns the record and the number of bytes
    /// consumed.
    pub fn parse(data: &[u8]) -> AscsResult<(Self, usize)> {
        if data.len() < ASCS_CODEC_CONFIGURATION_FIXED_SIZE {
            return Err(AscsError::InvalidLength);
        }
        let mut cursor = Cursor::new(data);

        let framing = Framing::from_u8(cursor.read_u8()?).ok_or(
            AscsError::InvalidConfigurationParameterValue(RejectReason::Framing),
        )?;
        let preferred_phy = PhyMask(cursor.read_u8()?);
        let preferred_retransmission_number = cursor.read_u8()?;
        let max_transport_latency_ms =
            check_max_transport_latency(cursor.read_u16::<LittleEndian>()?)?;
        let presentation_delay_min_us = cursor.read_u24::<LittleEndian>()?;
        let presentation_delay_max_us = cursor.read_u24::<LittleEndian>()?;
        if presentation_delay_min_us > presentation_delay_max_us {
            return Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::PresentationDelay,
            ));
        }
        let preferred_presentation_delay_min_us = cursor.read_u24::<LittleEndian>()?;
        let preferred_presentation_delay_max_us = cursor.read_u24::<LittleEndian>()?;
        // Zero means no preference; only compare when both ends are given
        if preferred_presentation_delay_min_us != 0
            && preferred_presentation_delay_max_us != 0
            && preferred_presentation_delay_min_us > preferred_presentation_delay_max_us
        {
            return Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::PresentationDelay,
            ));
        }
        let codec_id = parse_codec_id(&mut cursor)?;

        let specific_length = cursor.read_u8()? as usize;
        let ltv_start = ASCS_CODEC_CONFIGURATION_FIXED_SIZE;
        if data.len() < ltv_start + specific_length {
            return Err(AscsError::InvalidLength);
        }
        let specific_codec_configuration =
            SpecificCodecConfiguration::parse(&data[ltv_start..ltv_start + specific_length])?;

        Ok((
            Self {
                framing,
                preferred_phy,
                preferred_retransmission_number,
                max_transport_latency_ms,
                presentation_delay_min_us,
                presentation_delay_max_us,
                preferred_presentation_delay_min_us,
                preferred_presentation_delay_max_us,
                codec_id,
                specific_codec_configuration,
            },
            ltv_start + specific_length,
        ))
    }

    pub fn to_bytes(&self) -> AscsResult<Vec<u8>> {
        check_max_transport_latency(self.max_transport_latency_ms)?;
        check_presentation_delay(self.presentation_delay_min_us)?;
        check_presentation_delay(self.presentation_delay_max_us)?;
        check_presentation_delay(self.preferred_presentation_delay_min_us)?;
        check_presentation_delay(self.preferred_presentation_delay_max_us)?;

        let specific = self.specific_codec_configuration.to_bytes();
        let mut bytes =
            Vec::with_capacity(ASCS_CODEC_CONFIGURATION_FIXED_SIZE + specific.len());
        bytes.push(self.framing.to_u8());
        bytes.push(self.preferred_phy.0);
        bytes.push(self.preferred_retransmission_number);
        bytes.extend_from_slice(&self.max_transport_latency_ms.to_le_bytes());
        bytes.write_u24::<LittleEndian>(self.presentation_delay_min_us)?;
        bytes.write_u24::<LittleEndian>(self.presentation_delay_max_us)?;
        bytes.write_u24::<LittleEndian>(self.preferred_presentation_delay_min_us)?;
        bytes.write_u24::<LittleEndian>(self.preferred_presentation_delay_max_us)?;
        write_codec_id(&mut bytes, &self.codec_id);
        bytes.push(specific.len() as u8);
        bytes.extend_from_slice(&specific);
        Ok(bytes)
    }

    /// Serialize into `buffer`, returning the number of bytes written
    pub fn serialize_into(&self, buffer: &mut [u8]) -> AscsResult<usize> {
        let bytes = self.to_bytes()?;
        if buffer.len() < bytes.len() {
            return Err(AscsError::BufferTooSmall {
                needed: bytes.len(),
                available: buffer.len(),
            });
        }
        buffer[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

impl ClientCodecConfigurationRequest {
    /// Parse a Config Codec operation payload. Returns the record and
    /// the number of bytes consumed.
    pub fn parse(data: &[u8]) -> AscsResult<(Self, usize)> {
        if data.len() < ASCS_CODEC_CONFIGURATION_REQUEST_FIXED_SIZE {
            return Err(AscsError::InvalidLength);
        }
        let mut cursor = Cursor::new(data);

        let target_latency = TargetLatency::from_u8(cursor.read_u8()?);
        let target_phy = TargetPhy::from_u8(cursor.read_u8()?);
        let codec_id = parse_codec_id(&mut cursor)?;

        let specific_length = cursor.read_u8()? as usize;
        let ltv_start = ASCS_CODEC_CONFIGURATION_REQUEST_FIXED_SIZE;
        if data.len() < ltv_start + specific_length {
            return Err(AscsError::InvalidLength);
        }
        let specific_codec_configuration =
            SpecificCodecConfiguration::parse(&data[ltv_start..ltv_start + specific_length])?;

        Ok((
            Self {
                target_latency,
                target_phy,
                codec_id,
                specific_codec_configuration,
            },
            ltv_start + specific_length,
        ))
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let specific = self.specific_codec_configuration.to_bytes();
        let mut bytes =
            Vec::with_capacity(ASCS_CODEC_CONFIGURATION_REQUEST_FIXED_SIZE + specific.len());
        bytes.push(self.target_latency.to_u8());
        bytes.push(self.target_phy.to_u8());
        write_codec_id(&mut bytes, &self.codec_id);
        bytes.push(specific.len() as u8);
        bytes.extend_from_slice(&specific);
        bytes
    }

    pub fn serialize_into(&self, buffer: &mut [u8]) -> AscsResult<usize> {
        let bytes = self.to_bytes();
        if buffer.len() < bytes.len() {
            return Err(AscsError::BufferTooSmall {
                needed: bytes.len(),
                available: buffer.len(),
            });
        }
        buffer[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

impl QosConfiguration {
    /// Parse a Config QoS operation payload (15 fixed bytes)
    pub fn parse(data: &[u8]) -> AscsResult<Self> {
        if data.len() < ASCS_QOS_CONFIGURATION_SIZE {
            return Err(AscsError::InvalidLength);
        }
        let mut cursor = Cursor::new(data);

        let cig_id = cursor.read_u8()?;
        let cis_id = cursor.read_u8()?;
        let sdu_interval_us = cursor.read_u24::<LittleEndian>()?;
        if !(ASCS_SDU_INTERVAL_US_MIN..=ASCS_SDU_INTERVAL_US_MAX).contains(&sdu_interval_us) {
            return Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::SduInterval,
            ));
        }
        let framing = Framing::from_u8(cursor.read_u8()?).ok_or(
            AscsError::InvalidConfigurationParameterValue(RejectReason::Framing),
        )?;
        let phy = Phy::from_u8(cursor.read_u8()?).ok_or(
            AscsError::InvalidConfigurationParameterValue(RejectReason::Phy),
        )?;
        let max_sdu_size = cursor.read_u16::<LittleEndian>()?;
        if max_sdu_size > ASCS_MAX_SDU_SIZE_MAX {
            return Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::MaximumSduSize,
            ));
        }
        let retransmission_number = cursor.read_u8()?;
        let max_transport_latency_ms =
            check_max_transport_latency(cursor.read_u16::<LittleEndian>()?)?;
        let presentation_delay_us = cursor.read_u24::<LittleEndian>()?;

        Ok(Self {
            cig_id,
            cis_id,
            sdu_interval_us,
            framing,
            phy,
            max_sdu_size,
            retransmission_number,
            max_transport_latency_ms,
            presentation_delay_us,
        })
    }

    pub fn to_bytes(&self) -> AscsResult<Vec<u8>> {
        check_max_transport_latency(self.max_transport_latency_ms)?;
        check_presentation_delay(self.presentation_delay_us)?;
        if self.sdu_interval_us > ASCS_SDU_INTERVAL_US_MAX {
            return Err(AscsError::InvalidConfigurationParameterValue(
                RejectReason::SduInterval,
            ));
        }

        let mut bytes = Vec::with_capacity(ASCS_QOS_CONFIGURATION_SIZE);
        bytes.push(self.cig_id);
        bytes.push(self.cis_id);
        bytes.write_u24::<LittleEndian>(self.sdu_interval_us)?;
        bytes.push(self.framing.to_u8());
        bytes.push(self.phy.to_u8());
        bytes.extend_from_slice(&self.max_sdu_size.to_le_bytes());
        bytes.push(self.retransmission_number);
        bytes.extend_from_slice(&self.max_transport_latency_ms.to_le_bytes());
        bytes.write_u24::<LittleEndian>(self.presentation_delay_us)?;
        Ok(bytes)
    }

    pub fn serialize_into(&self, buffer: &mut [u8]) -> AscsResult<usize> {
        let bytes = self.to_bytes()?;
        if buffer.len() < bytes.len() {
            return Err(AscsError::BufferTooSmall {
                needed: bytes.len(),
                available: buffer.len(),
            });
        }
        buffer[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }
}

impl ControlPointResponse {
    pub fn parse(data: &[u8]) -> AscsResult<Self> {
        if data.len() < ASCS_CONTROL_POINT_RESPONSE_SIZE {
            return Err(AscsError::InvalidLength);
        }
        Ok(Self {
            ase_id: data[0],
            response_code: AscsErrorCode::from(data[1]),
            reason: data[2],
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        vec![self.ase_id, u8::from(self.response_code), self.reason]
    }
}

impl AseRecord {
    /// The ASE characteristic value: `state` followed by the
    /// configuration fields relevant to it. This is the payload of a
    /// state-change notification.
    pub fn characteristic_value(&self) -> AscsResult<Vec<u8>> {
        let mut bytes = vec![self.state.to_u8()];
        match self.state {
            AseState::Idle | AseState::Releasing => {}
            AseState::CodecConfigured => {
                bytes.extend_from_slice(&self.codec_configuration.to_bytes()?);
            }
            AseState::QosConfigured => {
                bytes.extend_from_slice(&self.qos_configuration.to_bytes()?);
            }
            AseState::Enabling | AseState::Streaming | AseState::Disabling => {
                let metadata = self.metadata.to_bytes();
                bytes.push(self.qos_configuration.cig_id);
                bytes.push(self.qos_configuration.cis_id);
                bytes.push(metadata.len() as u8);
                bytes.extend_from_slice(&metadata);
            }
        }
        Ok(bytes)
    }
}
