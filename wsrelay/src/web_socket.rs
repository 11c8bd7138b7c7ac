//! A computer communications protocol, providing full-duplex communication channels over a single
//! TCP connection.
//!
//! Only the server role is driven by the relay but the codec also understands masked frames so
//! that clients and tests can produce them.
//!
//! <https://tools.ietf.org/html/rfc6455>

mod frame;
#[cfg(feature = "web-socket-handshake")]
pub mod handshake;
mod misc;
mod op_code;
mod read_frame_info;
mod receive_buffer;
mod unmask;
mod web_socket_error;

pub use frame::Frame;
pub use misc::{encode_frame, encode_server_frame};
pub use op_code::OpCode;
pub use read_frame_info::ReadFrameInfo;
pub use receive_buffer::{decode_frame, FrameDecoding, ReceiveBuffer};
pub use unmask::unmask;
pub use web_socket_error::WebSocketError;

/// Unmasked final close frame without a payload.
pub const CLOSE_FRAME: [u8; 2] = [FIN_MASK | 0b0000_1000, 0];

const FIN_MASK: u8 = 0b1000_0000;
const MASK_MASK: u8 = 0b1000_0000;
const MAX_HEADER_LEN: usize = 14;
const OP_CODE_MASK: u8 = 0b0000_1111;
const PAYLOAD_MASK: u8 = 0b0111_1111;
