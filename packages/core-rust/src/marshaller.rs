//! Delegate marshaller capability and the concrete implementations shipped
//! with the runtime.
//!
//! A [`Marshaller`] turns values into bytes and back in four shapes: to an
//! owned buffer, into a writer, from a slice, and from a reader. The facade
//! in [`crate::scoped`] wraps these calls with the node-name context;
//! implementations here do not interpret the payload beyond
//! (de)serialization.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::context;

/// Errors surfaced by marshaller implementations.
///
/// The scoped facade forwards these verbatim; it neither wraps nor
/// translates them.
#[derive(Debug, thiserror::Error)]
pub enum MarshalError {
    /// `MsgPack` encoding failed.
    #[error("msgpack encode: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
    /// `MsgPack` decoding failed.
    #[error("msgpack decode: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
    /// JSON encoding or decoding failed.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    /// The underlying reader or writer failed.
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Object-to-bytes capability consumed by the scoped facade.
///
/// The deserialization target is chosen statically by the caller's type
/// parameter, so no runtime type resolution is involved.
pub trait Marshaller {
    /// Serializes `obj` into an owned buffer.
    ///
    /// # Errors
    ///
    /// Returns the implementation's encode error.
    fn marshal<T>(&self, obj: &T) -> Result<Vec<u8>, MarshalError>
    where
        T: Serialize + ?Sized;

    /// Serializes `obj` into `out`.
    ///
    /// # Errors
    ///
    /// Returns the implementation's encode error or a write failure.
    fn marshal_to<T, W>(&self, obj: &T, out: &mut W) -> Result<(), MarshalError>
    where
        T: Serialize + ?Sized,
        W: Write;

    /// Deserializes a value from `bytes`.
    ///
    /// # Errors
    ///
    /// Returns the implementation's decode error.
    fn unmarshal<T>(&self, bytes: &[u8]) -> Result<T, MarshalError>
    where
        T: DeserializeOwned;

    /// Deserializes a value from `input`.
    ///
    /// # Errors
    ///
    /// Returns the implementation's decode error or a read failure.
    fn unmarshal_from<T, R>(&self, input: &mut R) -> Result<T, MarshalError>
    where
        T: DeserializeOwned,
        R: Read;
}

// ---------------------------------------------------------------------------
// MsgPackMarshaller
// ---------------------------------------------------------------------------

/// Named-field `MsgPack` marshaller, the runtime's primary wire format.
///
/// Uses `rmp_serde::to_vec_named` so struct fields serialize as map keys,
/// keeping payloads self-describing across node versions.
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackMarshaller;

impl Marshaller for MsgPackMarshaller {
    fn marshal<T>(&self, obj: &T) -> Result<Vec<u8>, MarshalError>
    where
        T: Serialize + ?Sized,
    {
        Ok(rmp_serde::to_vec_named(obj)?)
    }

    fn marshal_to<T, W>(&self, obj: &T, out: &mut W) -> Result<(), MarshalError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        let mut ser = rmp_serde::Serializer::new(out).with_struct_map();
        obj.serialize(&mut ser)?;
        Ok(())
    }

    fn unmarshal<T>(&self, bytes: &[u8]) -> Result<T, MarshalError>
    where
        T: DeserializeOwned,
    {
        rmp_serde::from_slice(bytes).map_err(|e| {
            tracing::debug!(
                node = ?context::current_node_name(),
                "msgpack decode failed: {e}"
            );
            MarshalError::from(e)
        })
    }

    fn unmarshal_from<T, R>(&self, input: &mut R) -> Result<T, MarshalError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        rmp_serde::from_read(&mut *input).map_err(|e| {
            tracing::debug!(
                node = ?context::current_node_name(),
                "msgpack decode failed: {e}"
            );
            MarshalError::from(e)
        })
    }
}

// ---------------------------------------------------------------------------
// JsonMarshaller
// ---------------------------------------------------------------------------

/// JSON marshaller used for diagnostics and human-readable dumps.
///
/// Wire-incompatible with [`MsgPackMarshaller`]; never mix the two on one
/// channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller;

impl Marshaller for JsonMarshaller {
    fn marshal<T>(&self, obj: &T) -> Result<Vec<u8>, MarshalError>
    where
        T: Serialize + ?Sized,
    {
        Ok(serde_json::to_vec(obj)?)
    }

    fn marshal_to<T, W>(&self, obj: &T, out: &mut W) -> Result<(), MarshalError>
    where
        T: Serialize + ?Sized,
        W: Write,
    {
        serde_json::to_writer(&mut *out, obj)?;
        Ok(())
    }

    fn unmarshal<T>(&self, bytes: &[u8]) -> Result<T, MarshalError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(bytes).map_err(|e| {
            tracing::debug!(
                node = ?context::current_node_name(),
                "json decode failed: {e}"
            );
            MarshalError::from(e)
        })
    }

    fn unmarshal_from<T, R>(&self, input: &mut R) -> Result<T, MarshalError>
    where
        T: DeserializeOwned,
        R: Read,
    {
        serde_json::from_reader(&mut *input).map_err(|e| {
            tracing::debug!(
                node = ?context::current_node_name(),
                "json decode failed: {e}"
            );
            MarshalError::from(e)
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
