use serde::{Serialize, Serializer};
use std::fmt;

/// Bytes taken by the `size` + `type` header of every box.
pub const HEADER_SIZE: u32 = 8;

/// A four-character box type tag.
///
/// The bytes are kept as-is; nothing guarantees they are printable ASCII.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn as_str_lossy(&self) -> String {
        self.0
            .iter()
            .map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}
impl fmt::Display for FourCC {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_lossy())
    }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    pub size: u32, // total size including the 8 header bytes
    pub typ: FourCC,
}

impl BoxHeader {
    pub fn payload_len(&self) -> u32 {
        self.size.saturating_sub(HEADER_SIZE)
    }
}

/// One box as read from a byte source. Owns its payload.
#[derive(Debug, Clone)]
pub struct Mp4Box {
    pub header: BoxHeader,
    pub payload: Vec<u8>,
    /// Offset of the header start: top-level boxes count from the start of
    /// the input, children from their parent's offset plus earlier siblings.
    pub offset: i64,
    pub depth: usize,
}

impl Mp4Box {
    pub fn event(&self) -> BoxEvent {
        BoxEvent {
            typ: self.header.typ,
            size: self.header.size,
            depth: self.depth,
            offset: self.offset,
        }
    }
}

/// What the walker reports for every box it visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoxEvent {
    #[serde(rename = "type")]
    pub typ: FourCC,
    pub size: u32,
    pub depth: usize,
    pub offset: i64,
}
