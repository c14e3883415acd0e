//! Lightweight marshaller capability for the thin client.
//!
//! The thin-client protocol writes a fixed frame header directly in front
//! of the payload. To build a request with a single allocation,
//! [`ClientMarshaller::marshal`] reserves `headroom` zeroed bytes at the
//! start of the returned buffer for the caller to fill in.

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::marshaller::MarshalError;

/// Client-side object-to-buffer capability.
///
/// Shares [`MarshalError`] with the full [`crate::marshaller::Marshaller`]
/// capability; the scoped facade wraps both the same way.
pub trait ClientMarshaller {
    /// Serializes `obj` into a buffer whose first `headroom` bytes are
    /// zeroed and reserved for the caller's frame header. The payload
    /// begins at offset `headroom`.
    ///
    /// # Errors
    ///
    /// Returns the implementation's encode error.
    fn marshal<T>(&self, obj: &T, headroom: usize) -> Result<BytesMut, MarshalError>
    where
        T: Serialize + ?Sized;

    /// Deserializes a value from a payload slice (header already stripped
    /// by the caller).
    ///
    /// # Errors
    ///
    /// Returns the implementation's decode error.
    fn unmarshal<T>(&self, bytes: &[u8]) -> Result<T, MarshalError>
    where
        T: DeserializeOwned;
}
