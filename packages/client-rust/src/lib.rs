//! `GridLink` thin client — lightweight marshaller and request frame codec.

pub mod frame;
pub mod marshaller;

pub use frame::{decode_response, encode_request, FrameError, FRAME_HEADER_LEN, FRAME_MARKER};
pub use marshaller::MsgPackClientMarshaller;
