use crate::web_socket::{OpCode, WebSocketError, FIN_MASK, MASK_MASK, PAYLOAD_MASK};

/// Parameters of an WebSocket frame.
#[derive(Debug, Eq, PartialEq)]
pub struct ReadFrameInfo {
  /// Final fragment of a message.
  pub fin: bool,
  /// Base header, extended length and mask key.
  pub header_len: usize,
  /// Present when the frame was sent by a client.
  pub mask: Option<[u8; 4]>,
  /// See [`OpCode`].
  pub op_code: OpCode,
  /// Announced payload length.
  pub payload_len: usize,
}

impl ReadFrameInfo {
  /// Reads the header located at the beginning of `bytes`.
  ///
  /// Returns `None` if `bytes` doesn't contain the whole header yet. Lengths are trusted as
  /// given unless `max_payload_len` is set.
  #[inline]
  pub fn from_bytes(bytes: &[u8], max_payload_len: Option<usize>) -> crate::Result<Option<Self>> {
    let [a, b, rest @ ..] = bytes else {
      return Ok(None);
    };
    let fin = a & FIN_MASK != 0;
    let op_code = OpCode::from(*a);
    let is_masked = b & MASK_MASK != 0;
    let length_code = b & PAYLOAD_MASK;
    let (mut header_len, payload_len, rest): (usize, u64, _) = match length_code {
      126 => {
        let [c, d, rest @ ..] = rest else {
          return Ok(None);
        };
        (4, u16::from_be_bytes([*c, *d]).into(), rest)
      }
      127 => {
        let [c, d, e, f, g, h, i, j, rest @ ..] = rest else {
          return Ok(None);
        };
        (10, u64::from_be_bytes([*c, *d, *e, *f, *g, *h, *i, *j]), rest)
      }
      _ => (2, length_code.into(), rest),
    };
    let Ok(payload_len) = usize::try_from(payload_len) else {
      return Err(WebSocketError::InvalidPayloadLength { received: payload_len }.into());
    };
    if let Some(max) = max_payload_len {
      if payload_len > max {
        return Err(WebSocketError::VeryLargePayload { max, received: payload_len }.into());
      }
    }
    let mut mask = None;
    if is_masked {
      let [c, d, e, f, ..] = rest else {
        return Ok(None);
      };
      mask = Some([*c, *d, *e, *f]);
      header_len = header_len.wrapping_add(4);
    }
    Ok(Some(Self { fin, header_len, mask, op_code, payload_len }))
  }

  /// Header length plus payload length.
  #[inline]
  pub fn frame_len(&self) -> crate::Result<usize> {
    self.header_len.checked_add(self.payload_len).ok_or_else(|| {
      WebSocketError::InvalidPayloadLength { received: self.payload_len as u64 }.into()
    })
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    web_socket::{OpCode, ReadFrameInfo, WebSocketError},
    Error,
  };

  #[test]
  fn reads_short_header() {
    let rfi = ReadFrameInfo::from_bytes(&[0x81, 0x05, b'h'], None).unwrap().unwrap();
    assert_eq!(
      rfi,
      ReadFrameInfo { fin: true, header_len: 2, mask: None, op_code: OpCode::Text, payload_len: 5 }
    );
  }

  #[test]
  fn reads_masked_extended_header() {
    let bytes = [0x02, 0xFE, 0x01, 0x00, 1, 2, 3, 4];
    let rfi = ReadFrameInfo::from_bytes(&bytes, None).unwrap().unwrap();
    assert!(!rfi.fin);
    assert_eq!(rfi.header_len, 8);
    assert_eq!(rfi.mask, Some([1, 2, 3, 4]));
    assert_eq!(rfi.op_code, OpCode::Binary);
    assert_eq!(rfi.payload_len, 256);
  }

  #[test]
  fn missing_parts_are_incomplete() {
    assert!(ReadFrameInfo::from_bytes(&[], None).unwrap().is_none());
    assert!(ReadFrameInfo::from_bytes(&[0x81], None).unwrap().is_none());
    assert!(ReadFrameInfo::from_bytes(&[0x81, 126, 0], None).unwrap().is_none());
    assert!(ReadFrameInfo::from_bytes(&[0x81, 127, 0, 0, 0, 0, 0, 0, 1], None).unwrap().is_none());
    assert!(ReadFrameInfo::from_bytes(&[0x81, 0x81, 1, 2, 3], None).unwrap().is_none());
  }

  #[test]
  fn payload_cap_is_applied_before_the_payload_arrives() {
    let rslt = ReadFrameInfo::from_bytes(&[0x82, 127, 0, 0, 0, 1, 0, 0, 0, 0], Some(1024));
    assert!(matches!(
      rslt,
      Err(Error::WebSocketError(WebSocketError::VeryLargePayload {
        max: 1024,
        received: 4_294_967_296
      }))
    ));
  }
}
