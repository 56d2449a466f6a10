//! LE Audio metadata record and its LTV codec
//!
//! Metadata travels as a sequence of LTV entries, each
//! `length(1) | type(1) | value(length - 1)`; the declared length counts
//! the type byte. The record keeps every defined metadata type as an
//! optional field so that "present" and "value" cannot disagree.

use super::constants::*;
use super::types::AudioContextMask;
use thiserror::Error;

/// Metadata codec errors. The offending metadata type doubles as the
/// reject reason in control point responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("metadata entry of type {0:#04x} is truncated or has a bad length")]
    Invalid(u8),

    #[error("metadata type {0:#04x} is not supported")]
    Unsupported(u8),

    #[error("destination buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Extended metadata entry (type 0xFE)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedMetadata {
    pub metadata_type: u16,
    pub value: Vec<u8>,
}

/// Vendor-specific metadata entry (type 0xFF)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSpecificMetadata {
    pub company_id: u16,
    pub value: Vec<u8>,
}

/// LE Audio metadata, as carried by Enable and Update Metadata operations
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    pub preferred_audio_contexts: Option<AudioContextMask>,
    pub streaming_audio_contexts: Option<AudioContextMask>,
    pub program_info: Option<Vec<u8>>,
    /// ISO 639-3 language code, lower case
    pub language: Option<[u8; 3]>,
    pub ccid_list: Option<Vec<u8>>,
    pub parental_rating: Option<u8>,
    pub program_info_uri: Option<Vec<u8>>,
    pub extended: Option<ExtendedMetadata>,
    pub vendor_specific: Option<VendorSpecificMetadata>,
}

impl Metadata {
    /// True if no metadata type is present
    pub fn is_empty(&self) -> bool {
        *self == Metadata::default()
    }

    /// Parse a complete metadata LTV sequence.
    ///
    /// Never reads past `data`; a declared entry length extending past the
    /// buffer is an error, not a short read.
    pub fn parse(data: &[u8]) -> Result<Self, MetadataError> {
        let mut metadata = Metadata::default();
        let mut offset = 0usize;

        while offset < data.len() {
            let entry_length = data[offset] as usize;
            if entry_length == 0 {
                return Err(MetadataError::Invalid(0));
            }
            if offset + 1 + entry_length > data.len() {
                // The type byte may itself be past the end
                let metadata_type = data.get(offset + 1).copied().unwrap_or(0);
                return Err(MetadataError::Invalid(metadata_type));
            }
            let metadata_type = data[offset + 1];
            let value = &data[offset + 2..offset + 1 + entry_length];
            Self::apply_entry(&mut metadata, metadata_type, value)?;
            offset += 1 + entry_length;
        }

        Ok(metadata)
    }

    fn apply_entry(
        metadata: &mut Metadata,
        metadata_type: u8,
        value: &[u8],
    ) -> Result<(), MetadataError> {
        match metadata_type {
            LE_AUDIO_METADATA_TYPE_PREFERRED_AUDIO_CONTEXTS => {
                let mask = fixed_u16(metadata_type, value)?;
                metadata.preferred_audio_contexts = Some(AudioContextMask::from_bits_retain(mask));
            }
            LE_AUDIO_METADATA_TYPE_STREAMING_AUDIO_CONTEXTS => {
                let mask = fixed_u16(metadata_type, value)?;
                metadata.streaming_audio_contexts = Some(AudioContextMask::from_bits_retain(mask));
            }
            LE_AUDIO_METADATA_TYPE_PROGRAM_INFO => {
                if value.len() > LE_AUDIO_PROGRAM_INFO_MAX_LENGTH {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.program_info = Some(value.to_vec());
            }
            LE_AUDIO_METADATA_TYPE_LANGUAGE => {
                if value.len() != 3 {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.language = Some([value[0], value[1], value[2]]);
            }
            LE_AUDIO_METADATA_TYPE_CCID_LIST => {
                if value.len() > LE_AUDIO_CCID_LIST_MAX_NUM {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.ccid_list = Some(value.to_vec());
            }
            LE_AUDIO_METADATA_TYPE_PARENTAL_RATING => {
                if value.len() != 1 {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.parental_rating = Some(value[0]);
            }
            LE_AUDIO_METADATA_TYPE_PROGRAM_INFO_URI => {
                if value.len() > LE_AUDIO_PROGRAM_INFO_URI_MAX_LENGTH {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.program_info_uri = Some(value.to_vec());
            }
            LE_AUDIO_METADATA_TYPE_EXTENDED_METADATA => {
                if value.len() < 2 || value.len() - 2 > LE_AUDIO_EXTENDED_METADATA_MAX_LENGTH {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.extended = Some(ExtendedMetadata {
                    metadata_type: u16::from_le_bytes([value[0], value[1]]),
                    value: value[2..].to_vec(),
                });
            }
            LE_AUDIO_METADATA_TYPE_VENDOR_SPECIFIC_METADATA => {
                if value.len() < 2 || value.len() - 2 > LE_AUDIO_VENDOR_SPECIFIC_METADATA_MAX_LENGTH
                {
                    return Err(MetadataError::Invalid(metadata_type));
                }
                metadata.vendor_specific = Some(VendorSpecificMetadata {
                    company_id: u16::from_le_bytes([value[0], value[1]]),
                    value: value[2..].to_vec(),
                });
            }
            rfu => return Err(MetadataError::Unsupported(rfu)),
        }
        Ok(())
    }

    /// Number of bytes `serialize_into` would write
    pub fn serialized_length(&self) -> usize {
        let mut length = 0usize;
        if self.preferred_audio_contexts.is_some() {
            length += 2 + 2;
        }
        if self.streaming_audio_contexts.is_some() {
            length += 2 + 2;
        }
        if let Some(info) = &self.program_info {
            length += 2 + info.len();
        }
        if self.language.is_some() {
            length += 2 + 3;
        }
        if let Some(ccids) = &self.ccid_list {
            length += 2 + ccids.len();
        }
        if self.parental_rating.is_some() {
            length += 2 + 1;
        }
        if let Some(uri) = &self.program_info_uri {
            length += 2 + uri.len();
        }
        if let Some(extended) = &self.extended {
            length += 2 + 2 + extended.value.len();
        }
        if let Some(vendor) = &self.vendor_specific {
            length += 2 + 2 + vendor.value.len();
        }
        length
    }

    /// Serialize all present entries in ascending type order, the
    /// extended and vendor-specific entries last.
    ///
    /// Returns the number of bytes written; nothing is written when the
    /// destination is too small.
    pub fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, MetadataError> {
        let needed = self.serialized_length();
        if buffer.len() < needed {
            return Err(MetadataError::BufferTooSmall {
                needed,
                available: buffer.len(),
            });
        }

        let mut offset = 0usize;
        if let Some(contexts) = self.preferred_audio_contexts {
            offset += write_entry(
                &mut buffer[offset..],
                LE_AUDIO_METADATA_TYPE_PREFERRED_AUDIO_CONTEXTS,
                &contexts.bits().to_le_bytes(),
            );
        }
        if let Some(contexts) = self.streaming_audio_contexts {
            offset += write_entry(
                &mut buffer[offset..],
                LE_AUDIO_METADATA_TYPE_STREAMING_AUDIO_CONTEXTS,
                &contexts.bits().to_le_bytes(),
            );
        }
        if let Some(info) = &self.program_info {
            offset += write_entry(&mut buffer[offset..], LE_AUDIO_METADATA_TYPE_PROGRAM_INFO, info);
        }
        if let Some(language) = &self.language {
            offset += write_entry(&mut buffer[offset..], LE_AUDIO_METADATA_TYPE_LANGUAGE, language);
        }
        if let Some(ccids) = &self.ccid_list {
            offset += write_entry(&mut buffer[offset..], LE_AUDIO_METADATA_TYPE_CCID_LIST, ccids);
        }
        if let Some(rating) = self.parental_rating {
            offset += write_entry(
                &mut buffer[offset..],
                LE_AUDIO_METADATA_TYPE_PARENTAL_RATING,
                &[rating],
            );
        }
        if let Some(uri) = &self.program_info_uri {
            offset += write_entry(
                &mut buffer[offset..],
                LE_AUDIO_METADATA_TYPE_PROGRAM_INFO_URI,
                uri,
            );
        }
        if let Some(extended) = &self.extended {
            let mut value = Vec::with_capacity(2 + extended.value.len());
            value.extend_from_slice(&extended.metadata_type.to_le_bytes());
            value.extend_from_slice(&extended.value);
            offset += write_entry(
                &mut buffer[offset..],
                LE_AUDIO_METADATA_TYPE_EXTENDED_METADATA,
                &value,
            );
        }
        if let Some(vendor) = &self.vendor_specific {
            let mut value = Vec::with_capacity(2 + vendor.value.len());
            value.extend_from_slice(&vendor.company_id.to_le_bytes());
            value.extend_from_slice(&vendor.value);
            offset += write_entry(
                &mut buffer[offset..],
                LE_AUDIO_METADATA_TYPE_VENDOR_SPECIFIC_METADATA,
                &value,
            );
        }

        Ok(offset)
    }

    /// Serialize to a freshly allocated buffer
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; self.serialized_length()];
        // Capacity matches by construction
        let written = self.serialize_into(&mut buffer).unwrap_or(0);
        buffer.truncate(written);
        buffer
    }
}

fn fixed_u16(metadata_type: u8, value: &[u8]) -> Result<u16, MetadataError> {
    if value.len() != 2 {
        return Err(MetadataError::Invalid(metadata_type));
    }
    Ok(u16::from_le_bytes([value[0], value[1]]))
}

fn write_entry(buffer: &mut [u8], metadata_type: u8, value: &[u8]) -> usize {
    buffer[0] = (value.len() + 1) as u8;
    buffer[1] = metadata_type;
    buffer[2..2 + value.len()].copy_from_slice(value);
    2 + value.len()
}
