use crate::boxes::{BoxHeader, FourCC, HEADER_SIZE, Mp4Box};
use byteorder::{BigEndian, ByteOrder};
use std::io::Read;

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("truncated header: got {available} of 8 bytes")]
    TruncatedHeader { available: usize },
    #[error("size below minimum header size: {size}")]
    SizeBelowMinimum { size: u32 },
    #[error("truncated payload: expected {expected} bytes, got {available}")]
    TruncatedPayload { expected: u32, available: usize },
    #[error("box at offset {offset}: {source}")]
    At {
        offset: i64,
        #[source]
        source: Box<ParseError>,
    },
}

impl ParseError {
    /// Attach the offset of the box being read. Already-located errors are
    /// left alone so the innermost offset wins.
    pub fn at(self, offset: i64) -> Self {
        match self {
            ParseError::At { .. } => self,
            other => ParseError::At {
                offset,
                source: Box::new(other),
            },
        }
    }

    /// The error without any location wrapper.
    pub fn kind(&self) -> &ParseError {
        match self {
            ParseError::At { source, .. } => source.kind(),
            other => other,
        }
    }

    pub fn offset(&self) -> Option<i64> {
        match self {
            ParseError::At { offset, .. } => Some(*offset),
            _ => None,
        }
    }

    /// Structural violation, as opposed to the source itself failing.
    pub fn is_format(&self) -> bool {
        !matches!(self.kind(), ParseError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Result of one read attempt. Running out of boxes is not an error.
#[derive(Debug)]
pub enum ReadOutcome {
    Box(Mp4Box),
    EndOfStream,
}

/// Read one header and its full payload from `r`.
///
/// The returned box has `offset == 0` and `depth == 0`; placing it in the
/// tree is the walker's job.
pub fn read_box<R: Read>(r: &mut R) -> Result<ReadOutcome> {
    let mut hdr = Vec::with_capacity(HEADER_SIZE as usize);
    r.by_ref().take(HEADER_SIZE as u64).read_to_end(&mut hdr)?;
    match hdr.len() {
        0 => return Ok(ReadOutcome::EndOfStream),
        n if n < HEADER_SIZE as usize => {
            return Err(ParseError::TruncatedHeader { available: n });
        }
        _ => {}
    }

    let size = BigEndian::read_u32(&hdr[0..4]);
    let typ = FourCC([hdr[4], hdr[5], hdr[6], hdr[7]]);
    if size < HEADER_SIZE {
        return Err(ParseError::SizeBelowMinimum { size });
    }

    let header = BoxHeader { size, typ };
    let expected = header.payload_len();

    // Grows with what the source actually yields, so a bogus size cannot
    // force a huge allocation up front.
    let mut payload = Vec::new();
    r.by_ref().take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() < expected as usize {
        return Err(ParseError::TruncatedPayload {
            expected,
            available: payload.len(),
        });
    }

    tracing::trace!(typ = %typ, size, "read box");

    Ok(ReadOutcome::Box(Mp4Box {
        header,
        payload,
        offset: 0,
        depth: 0,
    }))
}
