/// Defines how to interpret the payload data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpCode {
  /// Continuation of a previous frame.
  Continuation,
  /// UTF-8 text.
  Text,
  /// Opaque bytes.
  Binary,
  /// Connection is closed.
  Close,
  /// Test reachability.
  Ping,
  /// Response of a ping frame.
  Pong,
  /// Any of the values that RFC 6455 does not define. Always within `0..=15`.
  Reserved(u8),
}

impl OpCode {
  /// Text or binary frames, the only ones whose payload is forwarded upstream.
  #[inline]
  pub fn is_data(self) -> bool {
    matches!(self, OpCode::Text | OpCode::Binary)
  }
}

impl From<OpCode> for u8 {
  #[inline]
  fn from(from: OpCode) -> Self {
    match from {
      OpCode::Continuation => 0b0000_0000,
      OpCode::Text => 0b0000_0001,
      OpCode::Binary => 0b0000_0010,
      OpCode::Close => 0b0000_1000,
      OpCode::Ping => 0b0000_1001,
      OpCode::Pong => 0b0000_1010,
      OpCode::Reserved(elem) => elem & super::OP_CODE_MASK,
    }
  }
}

/// Only the lower four bits are taken into consideration.
impl From<u8> for OpCode {
  #[inline]
  fn from(from: u8) -> Self {
    match from & super::OP_CODE_MASK {
      0b0000_0000 => OpCode::Continuation,
      0b0000_0001 => OpCode::Text,
      0b0000_0010 => OpCode::Binary,
      0b0000_1000 => OpCode::Close,
      0b0000_1001 => OpCode::Ping,
      0b0000_1010 => OpCode::Pong,
      elem => OpCode::Reserved(elem),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::web_socket::OpCode;

  #[test]
  fn every_nibble_is_mapped_back() {
    for byte in 0..16u8 {
      assert_eq!(u8::from(OpCode::from(byte)), byte);
    }
  }

  #[test]
  fn high_bits_are_ignored() {
    assert_eq!(OpCode::from(0b1000_0001), OpCode::Text);
    assert_eq!(OpCode::from(0b1111_1001), OpCode::Ping);
    assert_eq!(OpCode::from(0x03), OpCode::Reserved(3));
    assert_eq!(OpCode::from(0x0F), OpCode::Reserved(15));
  }

  #[test]
  fn classification() {
    assert!(OpCode::Binary.is_data());
    assert!(OpCode::Text.is_data());
    assert!(!OpCode::Continuation.is_data());
    assert!(!OpCode::Ping.is_data());
    assert!(!OpCode::Reserved(3).is_data());
  }
}
