//! Node-scoped wrappers around marshalling operations.
//!
//! Each wrapper makes one delegate call context-transparent and
//! failure-safe: the node name visible to the delegate while it runs is
//! exactly the one supplied by the caller, and the per-thread slot is
//! restored to its prior state before the result (success or error)
//! reaches the caller. Nested wrapped calls see and restore each other's
//! installs in strict stack order.
//!
//! Historical call sites passed the name in several shapes -- a bare
//! string, a configuration object -- so [`NodeNameSource`] collapses those
//! into a single wrapper set instead of duplicating the save/install/restore
//! dance per shape.

use std::io::{Read, Write};

use bytes::BytesMut;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::ClientMarshaller;
use crate::context::NodeNameScope;
use crate::marshaller::{MarshalError, Marshaller};

/// How a wrapped operation obtains the node name to install.
///
/// Implemented by `str` and `String` (direct value), by `Option<&str>`
/// (explicit default-node), and by [`crate::config::NodeConfig`] (accessor
/// on a caller-supplied configuration object).
pub trait NodeNameSource {
    /// Name of the node this operation is associated with, or `None` for
    /// the default, unnamed node. Pure lookup; no side effects.
    fn node_name(&self) -> Option<&str>;
}

impl NodeNameSource for str {
    fn node_name(&self) -> Option<&str> {
        Some(self)
    }
}

impl NodeNameSource for String {
    fn node_name(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl NodeNameSource for Option<&str> {
    fn node_name(&self) -> Option<&str> {
        *self
    }
}

// ---------------------------------------------------------------------------
// Full marshaller wrappers
// ---------------------------------------------------------------------------

/// Serializes `obj` with the node name from `source` installed for the
/// duration of the call.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn marshal<M, T, S>(marshaller: &M, obj: &T, source: &S) -> Result<Vec<u8>, MarshalError>
where
    M: Marshaller,
    T: Serialize + ?Sized,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    marshaller.marshal(obj)
}

/// Serializes `obj` into `out` with the node name from `source` installed
/// for the duration of the call.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn marshal_to<M, T, W, S>(
    marshaller: &M,
    obj: &T,
    out: &mut W,
    source: &S,
) -> Result<(), MarshalError>
where
    M: Marshaller,
    T: Serialize + ?Sized,
    W: Write,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    marshaller.marshal_to(obj, out)
}

/// Deserializes a value from `bytes` with the node name from `source`
/// installed for the duration of the call.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn unmarshal<M, T, S>(marshaller: &M, bytes: &[u8], source: &S) -> Result<T, MarshalError>
where
    M: Marshaller,
    T: DeserializeOwned,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    marshaller.unmarshal(bytes)
}

/// Deserializes a value from `input` with the node name from `source`
/// installed for the duration of the call.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn unmarshal_from<M, T, R, S>(
    marshaller: &M,
    input: &mut R,
    source: &S,
) -> Result<T, MarshalError>
where
    M: Marshaller,
    T: DeserializeOwned,
    R: Read,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    marshaller.unmarshal_from(input)
}

/// Clones `obj` by marshalling and immediately unmarshalling it, with the
/// node name from `source` installed across the whole round trip.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn deep_clone<M, T, S>(marshaller: &M, obj: &T, source: &S) -> Result<T, MarshalError>
where
    M: Marshaller,
    T: Serialize + DeserializeOwned,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    let bytes = marshaller.marshal(obj)?;
    marshaller.unmarshal(&bytes)
}

// ---------------------------------------------------------------------------
// Client marshaller wrappers
// ---------------------------------------------------------------------------

/// Serializes `obj` through the lightweight client marshaller with the node
/// name from `source` installed for the duration of the call.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn client_marshal<M, T, S>(
    marshaller: &M,
    obj: &T,
    headroom: usize,
    source: &S,
) -> Result<BytesMut, MarshalError>
where
    M: ClientMarshaller,
    T: Serialize + ?Sized,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    marshaller.marshal(obj, headroom)
}

/// Deserializes a value through the lightweight client marshaller with the
/// node name from `source` installed for the duration of the call.
///
/// # Errors
///
/// Forwards the delegate's error verbatim; the slot is restored first.
pub fn client_unmarshal<M, T, S>(
    marshaller: &M,
    bytes: &[u8],
    source: &S,
) -> Result<T, MarshalError>
where
    M: ClientMarshaller,
    T: DeserializeOwned,
    S: NodeNameSource + ?Sized,
{
    let _scope = NodeNameScope::enter(source.node_name());
    marshaller.unmarshal(bytes)
}

// ---------------------------------------------------------------------------
// Context-free entry points
// ---------------------------------------------------------------------------

/// Serializes `obj` with no node-name scope.
///
/// A plain delegate call for call sites with no ambient identity (isolated
/// harnesses, bootstrap before the node has a name). Never reads or writes
/// the per-thread slot.
///
/// # Errors
///
/// Forwards the delegate's error verbatim.
pub fn marshal_direct<M, T>(marshaller: &M, obj: &T) -> Result<Vec<u8>, MarshalError>
where
    M: Marshaller,
    T: Serialize + ?Sized,
{
    marshaller.marshal(obj)
}

/// Deserializes a value from `bytes` with no node-name scope.
///
/// Counterpart of [`marshal_direct`]; never reads or writes the per-thread
/// slot.
///
/// # Errors
///
/// Forwards the delegate's error verbatim.
pub fn unmarshal_direct<M, T>(marshaller: &M, bytes: &[u8]) -> Result<T, MarshalError>
where
    M: Marshaller,
    T: DeserializeOwned,
{
    marshaller.unmarshal(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
