//! `GridLink` Core — node-identity context, marshaller capabilities, and the
//! node-scoped marshalling facade.
//!
//! The runtime marshals messages from many call sites, some already running
//! on behalf of a named node, some not. [`scoped`] wraps every marshalling
//! shape so the node name is ambient (via [`context`]) for exactly the
//! duration of the delegate call, and restored afterwards no matter how the
//! call ends.

pub mod client;
pub mod config;
pub mod context;
pub mod marshaller;
pub mod scoped;

pub use client::ClientMarshaller;
pub use config::NodeConfig;
pub use context::{current_node_name, NodeNameScope, NodeNameState};
pub use marshaller::{JsonMarshaller, MarshalError, Marshaller, MsgPackMarshaller};
pub use scoped::NodeNameSource;
