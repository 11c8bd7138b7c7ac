//! Decode

#![no_main]

use wsrelay::web_socket::{FrameDecoding, ReceiveBuffer};

libfuzzer_sys::fuzz_target!(|data: &[u8]| {
  let mut rb = ReceiveBuffer::with_max_payload_len(Some(u16::MAX.into()));
  rb.extend_from_slice(data);
  while let Ok(FrameDecoding::Frame(_)) = rb.decode_frame() {}
});
