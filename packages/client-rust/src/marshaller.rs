//! `MsgPack` implementation of the client-side marshaller capability.

use bytes::{BufMut, BytesMut};
use gridlink_core::{ClientMarshaller, MarshalError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Named-field `MsgPack` marshaller for thin-client connections.
///
/// Payloads are wire-compatible with the server's `MsgPackMarshaller`; the
/// only difference is the headroom-reserving buffer contract of
/// [`ClientMarshaller`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackClientMarshaller;

impl ClientMarshaller for MsgPackClientMarshaller {
    fn marshal<T>(&self, obj: &T, headroom: usize) -> Result<BytesMut, MarshalError>
    where
        T: Serialize + ?Sized,
    {
        let payload = rmp_serde::to_vec_named(obj)?;
        let mut buf = BytesMut::with_capacity(headroom + payload.len());
        buf.put_bytes(0, headroom);
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    fn unmarshal<T>(&self, bytes: &[u8]) -> Result<T, MarshalError>
    where
        T: DeserializeOwned,
    {
        Ok(rmp_serde::from_slice(bytes)?)
    }
}
