use crate::web_socket::{unmask, Frame, ReadFrameInfo};
use bytes::BytesMut;

/// Outcome of a single decoding attempt.
#[derive(Debug)]
pub enum FrameDecoding {
  /// A whole frame was removed from the front of the buffer.
  Frame(Frame),
  /// More bytes are needed. Nothing was consumed.
  Incomplete,
}

/// Extracts at most one frame from the front of `buffer`.
///
/// On success the consumed bytes are removed and the payload is unmasked. Otherwise `buffer` is
/// left untouched.
#[inline]
pub fn decode_frame(
  buffer: &mut BytesMut,
  max_payload_len: Option<usize>,
) -> crate::Result<FrameDecoding> {
  let Some(rfi) = ReadFrameInfo::from_bytes(buffer, max_payload_len)? else {
    return Ok(FrameDecoding::Incomplete);
  };
  let frame_len = rfi.frame_len()?;
  if buffer.len() < frame_len {
    return Ok(FrameDecoding::Incomplete);
  }
  let mut payload = buffer.split_to(frame_len).split_off(rfi.header_len);
  if let Some(mask) = rfi.mask {
    unmask(&mut payload, mask);
  }
  Ok(FrameDecoding::Frame(Frame::new(rfi.fin, rfi.op_code, payload)))
}

/// Bytes received from a peer but not yet resolved into complete frames.
#[derive(Debug, Default)]
pub struct ReceiveBuffer {
  bytes: BytesMut,
  max_payload_len: Option<usize>,
}

impl ReceiveBuffer {
  /// Unbounded instance.
  #[inline]
  pub fn new() -> Self {
    Self::default()
  }

  /// Frames that announce a payload larger than `max_payload_len` are decoding errors.
  #[inline]
  pub fn with_max_payload_len(max_payload_len: Option<usize>) -> Self {
    Self { bytes: BytesMut::new(), max_payload_len }
  }

  /// See [`decode_frame`].
  #[inline]
  pub fn decode_frame(&mut self) -> crate::Result<FrameDecoding> {
    decode_frame(&mut self.bytes, self.max_payload_len)
  }

  /// Appends received bytes.
  #[inline]
  pub fn extend_from_slice(&mut self, bytes: &[u8]) {
    self.bytes.extend_from_slice(bytes);
  }

  /// If there are no pending bytes.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// Number of pending bytes.
  #[inline]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }
}
