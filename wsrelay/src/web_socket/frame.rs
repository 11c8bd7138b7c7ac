use crate::web_socket::OpCode;
use bytes::BytesMut;

/// Unit of generic data used for communication.
///
/// Decoded frames are always unmasked.
#[derive(Debug)]
pub struct Frame {
  fin: bool,
  op_code: OpCode,
  payload: BytesMut,
}

impl Frame {
  /// Creates a new instance from already unmasked parameters.
  #[inline]
  pub fn new(fin: bool, op_code: OpCode, payload: BytesMut) -> Self {
    Self { fin, op_code, payload }
  }

  /// Indicates if this is the final frame in a message.
  #[inline]
  pub fn fin(&self) -> bool {
    self.fin
  }

  /// See [`OpCode`].
  #[inline]
  pub fn op_code(&self) -> OpCode {
    self.op_code
  }

  /// Frame's content.
  #[inline]
  pub fn payload(&self) -> &[u8] {
    &self.payload
  }

  /// Owned version of [`Self::payload`].
  #[inline]
  pub fn into_payload(self) -> BytesMut {
    self.payload
  }
}
