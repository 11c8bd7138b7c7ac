use crate::web_socket::{unmask, OpCode, FIN_MASK, MASK_MASK, MAX_HEADER_LEN};
use bytes::BytesMut;

/// Appends a frame to `buffer`.
///
/// Masking is only expected from clients, servers must pass `None`.
#[inline]
pub fn encode_frame(
  buffer: &mut BytesMut,
  fin: bool,
  mask: Option<[u8; 4]>,
  op_code: OpCode,
  payload: &[u8],
) {
  let mut header = [0; MAX_HEADER_LEN];
  let header_len = fill_header_from_params(fin, &mut header, mask, op_code, payload.len());
  buffer.reserve(header_len.wrapping_add(payload.len()));
  buffer.extend_from_slice(header.get(..header_len).unwrap_or_default());
  let payload_start = buffer.len();
  buffer.extend_from_slice(payload);
  if let (Some(elem), Some(masked)) = (mask, buffer.get_mut(payload_start..)) {
    unmask(masked, elem);
  }
}

/// Appends a final and unmasked frame to `buffer`.
#[inline]
pub fn encode_server_frame(buffer: &mut BytesMut, op_code: OpCode, payload: &[u8]) {
  encode_frame(buffer, true, None, op_code, payload);
}

fn fill_header_from_params(
  fin: bool,
  header: &mut [u8; MAX_HEADER_LEN],
  mask: Option<[u8; 4]>,
  op_code: OpCode,
  payload_len: usize,
) -> usize {
  let first = (if fin { FIN_MASK } else { 0 }) | u8::from(op_code);
  let mask_bit = if mask.is_some() { MASK_MASK } else { 0 };
  let len: usize = match payload_len {
    0..=125 => {
      let [a, b, ..] = header;
      *a = first;
      *b = mask_bit | u8::try_from(payload_len).unwrap_or_default();
      2
    }
    126..=65535 => {
      let [len_c, len_d] = u16::try_from(payload_len).map(u16::to_be_bytes).unwrap_or_default();
      let [a, b, c, d, ..] = header;
      *a = first;
      *b = mask_bit | 126;
      *c = len_c;
      *d = len_d;
      4
    }
    _ => {
      let len = u64::try_from(payload_len).map(u64::to_be_bytes).unwrap_or_default();
      let [a, b, rest @ ..] = header;
      *a = first;
      *b = mask_bit | 127;
      for (to, from) in rest.iter_mut().zip(len) {
        *to = from;
      }
      10
    }
  };
  match (mask, header.get_mut(len..len.wrapping_add(4))) {
    (Some(elem), Some(slice)) => {
      slice.copy_from_slice(&elem);
      len.wrapping_add(4)
    }
    _ => len,
  }
}

#[cfg(test)]
mod tests {
  use crate::web_socket::{encode_frame, encode_server_frame, OpCode, CLOSE_FRAME};
  use bytes::BytesMut;

  #[test]
  fn close_frame_matches_encoder() {
    let mut buffer = BytesMut::new();
    encode_server_frame(&mut buffer, OpCode::Close, &[]);
    assert_eq!(&buffer[..], &CLOSE_FRAME);
  }

  #[test]
  fn length_markers() {
    for (len, header) in [
      (0usize, &[0x81u8, 0][..]),
      (125, &[0x81, 125][..]),
      (126, &[0x81, 126, 0, 126][..]),
      (65535, &[0x81, 126, 255, 255][..]),
      (65536, &[0x81, 127, 0, 0, 0, 0, 0, 1, 0, 0][..]),
    ] {
      let mut buffer = BytesMut::new();
      encode_server_frame(&mut buffer, OpCode::Text, &vec![7; len]);
      assert_eq!(&buffer[..header.len()], header);
      assert_eq!(buffer.len(), header.len() + len);
    }
  }

  #[test]
  fn masked_frames_carry_the_key() {
    let mut buffer = BytesMut::new();
    encode_frame(&mut buffer, false, Some([1, 2, 3, 4]), OpCode::Binary, &[0, 0, 0, 0, 0]);
    assert_eq!(&buffer[..], &[0x02, 0x85, 1, 2, 3, 4, 1, 2, 3, 4, 1]);
  }
}
