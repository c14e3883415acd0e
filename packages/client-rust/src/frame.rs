//! Thin-client request frames.
//!
//! A frame is a fixed header followed by a `MsgPack` payload:
//!
//! ```text
//! +--------+------------------+-------------------+
//! | marker | payload length   | payload (MsgPack) |
//! | 1 byte | 4 bytes (BE u32) | length bytes      |
//! +--------+------------------+-------------------+
//! ```
//!
//! The payload is marshalled with [`FRAME_HEADER_LEN`] bytes of headroom
//! and the header is written in place, so a request is built with a single
//! allocation. Encoding and decoding run through the scoped facade so the
//! node name is ambient while the payload is (de)serialized.

use bytes::BytesMut;
use gridlink_core::{scoped, MarshalError, NodeNameSource};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::marshaller::MsgPackClientMarshaller;

/// First byte of every thin-client frame.
pub const FRAME_MARKER: u8 = 0x90;

/// Header size reserved in front of the payload: marker + BE u32 length.
pub const FRAME_HEADER_LEN: usize = 5;

/// Errors from frame encoding and decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The frame is shorter than the fixed header.
    #[error("frame truncated: {len} bytes, header needs {FRAME_HEADER_LEN}")]
    Truncated {
        /// Total frame length received.
        len: usize,
    },
    /// The first byte is not [`FRAME_MARKER`].
    #[error("bad frame marker: {found:#04x}")]
    BadMarker {
        /// The byte found where the marker should be.
        found: u8,
    },
    /// The header length field does not match the payload size.
    #[error("frame length mismatch: header says {declared}, payload is {actual}")]
    LengthMismatch {
        /// Length declared in the header.
        declared: u32,
        /// Actual payload length.
        actual: usize,
    },
    /// The payload exceeds the u32 length field.
    #[error("payload too large for frame: {len} bytes")]
    Oversize {
        /// Payload length that overflowed the field.
        len: usize,
    },
    /// Payload (de)serialization failed.
    #[error(transparent)]
    Marshal(#[from] MarshalError),
}

/// Encodes `msg` into a complete request frame on behalf of `source`'s
/// node.
///
/// # Errors
///
/// Returns [`FrameError::Oversize`] when the payload does not fit the
/// header's length field, or the marshaller's error verbatim.
pub fn encode_request<T, S>(msg: &T, source: &S) -> Result<BytesMut, FrameError>
where
    T: Serialize + ?Sized,
    S: NodeNameSource + ?Sized,
{
    let mut buf =
        scoped::client_marshal(&MsgPackClientMarshaller, msg, FRAME_HEADER_LEN, source)?;

    let payload_len = buf.len() - FRAME_HEADER_LEN;
    let declared =
        u32::try_from(payload_len).map_err(|_| FrameError::Oversize { len: payload_len })?;

    buf[0] = FRAME_MARKER;
    buf[1..FRAME_HEADER_LEN].copy_from_slice(&declared.to_be_bytes());
    Ok(buf)
}

/// Decodes a complete response frame received on behalf of `source`'s
/// node.
///
/// # Errors
///
/// Returns a header violation, or the marshaller's error verbatim.
pub fn decode_response<T, S>(frame: &[u8], source: &S) -> Result<T, FrameError>
where
    T: DeserializeOwned,
    S: NodeNameSource + ?Sized,
{
    if frame.len() < FRAME_HEADER_LEN {
        return Err(FrameError::Truncated { len: frame.len() });
    }
    let (header, payload) = frame.split_at(FRAME_HEADER_LEN);

    if header[0] != FRAME_MARKER {
        tracing::debug!(
            node = ?source.node_name(),
            "rejected frame with marker {:#04x}",
            header[0]
        );
        return Err(FrameError::BadMarker { found: header[0] });
    }

    let declared = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    if usize::try_from(declared).ok() != Some(payload.len()) {
        return Err(FrameError::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    Ok(scoped::client_unmarshal(
        &MsgPackClientMarshaller,
        payload,
        source,
    )?)
}
