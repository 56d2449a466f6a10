//! Generic Audio layer shared by the LE Audio services
//!
//! This module holds the definitions that are common to the LE Audio
//! GATT services (ASCS, PACS, BASS): the audio location and audio context
//! bitmaps, the codec identifier, codec parameter indices, and the
//! metadata record with its LTV codec.

pub mod constants;
pub mod metadata;
pub mod types;

// Re-export the public API
pub use self::constants::*;
pub use self::metadata::{ExtendedMetadata, Metadata, MetadataError, VendorSpecificMetadata};
pub use self::types::*;
