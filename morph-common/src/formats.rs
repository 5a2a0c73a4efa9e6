//! MorphSet binary format (.morphset)
//!
//! POD format - no magic bytes, little-endian throughout.
//!
//! # Layout
//! ```text
//! 0x00: target_count u32
//! then per target:
//!   name_len      u16
//!   section_count u16
//!   delta_count   u32
//!   name bytes    (name_len, UTF-8)
//!   section ids   (section_count * u16)
//!   deltas        (delta_count * 28 bytes:
//!                  source_idx u32, position_delta f32x3, normal_delta f32x3)
//! ```
//!
//! Deltas are stored sorted ascending by source_idx, as produced by the
//! converter.

/// File extension for morph set files.
pub const MORPH_SET_EXT: &str = "morphset";

/// Size of one serialized delta record in bytes.
pub const DELTA_RECORD_SIZE: usize = 28;

/// MorphSet header (4 bytes).
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct MorphSetHeader {
    pub target_count: u32,
}

impl MorphSetHeader {
    pub const SIZE: usize = 4;

    pub fn new(target_count: u32) -> Self {
        Self { target_count }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        self.target_count.to_le_bytes()
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            target_count: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
        })
    }
}

/// Per-target record header (8 bytes), preceding the variable-length body.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct MorphTargetRecordHeader {
    pub name_len: u16,
    pub section_count: u16,
    pub delta_count: u32,
}

impl MorphTargetRecordHeader {
    pub const SIZE: usize = 8;

    pub fn new(name_len: u16, section_count: u16, delta_count: u32) -> Self {
        Self {
            name_len,
            section_count,
            delta_count,
        }
    }

    /// Write record header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.name_len.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.section_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.delta_count.to_le_bytes());
        bytes
    }

    /// Read record header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            name_len: u16::from_le_bytes([bytes[0], bytes[1]]),
            section_count: u16::from_le_bytes([bytes[2], bytes[3]]),
            delta_count: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        })
    }

    /// Total size of the variable-length body following this header.
    pub fn body_size(&self) -> usize {
        self.name_len as usize
            + self.section_count as usize * 2
            + self.delta_count as usize * DELTA_RECORD_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = MorphSetHeader::new(42);
        let bytes = header.to_bytes();
        let parsed = MorphSetHeader::from_bytes(&bytes).unwrap();
        assert_eq!(parsed.target_count, 42);
    }

    #[test]
    fn test_header_too_short() {
        assert!(MorphSetHeader::from_bytes(&[1, 2]).is_none());
    }

    #[test]
    fn test_record_header_roundtrip() {
        let header = MorphTargetRecordHeader::new(5, 2, 100);
        let parsed = MorphTargetRecordHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed.name_len, 5);
        assert_eq!(parsed.section_count, 2);
        assert_eq!(parsed.delta_count, 100);
        assert_eq!(parsed.body_size(), 5 + 4 + 100 * DELTA_RECORD_SIZE);
    }
}
