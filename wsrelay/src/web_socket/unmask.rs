/// Unmasks a sequence of bytes using the given 4-byte `mask`.
///
/// Masking and unmasking are the same operation.
#[inline]
pub fn unmask(bytes: &mut [u8], mask: [u8; 4]) {
  let mask_u32 = u32::from_ne_bytes(mask);
  let mut chunks = bytes.chunks_exact_mut(4);
  for chunk in chunks.by_ref() {
    let [a, b, c, d] = chunk else {
      continue;
    };
    let [e, f, g, h] = (u32::from_ne_bytes([*a, *b, *c, *d]) ^ mask_u32).to_ne_bytes();
    *a = e;
    *b = f;
    *c = g;
    *d = h;
  }
  for (elem, mask_elem) in chunks.into_remainder().iter_mut().zip(mask) {
    *elem ^= mask_elem;
  }
}

#[cfg(test)]
mod tests {
  use crate::web_socket::unmask;

  #[test]
  fn length_variation_unmask() {
    for len in &[0, 2, 3, 8, 16, 18, 31, 32, 40] {
      let mut payload = vec![0u8; *len];
      let mask = [1, 2, 3, 4];
      unmask(&mut payload, mask);
      let expected = (0..*len).map(|i| (i & 3) as u8 + 1).collect::<Vec<_>>();
      assert_eq!(payload, expected);
    }
  }

  #[test]
  fn unmask_has_correct_output() {
    let mut payload = [0u8; 33];
    let mask = [1, 2, 3, 4];
    unmask(&mut payload, mask);
    assert_eq!(
      &payload,
      &[
        1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2,
        3, 4, 1
      ]
    );
  }

  #[test]
  fn unmask_is_an_involution() {
    let original = b"Hello, relay".to_vec();
    let mut data = original.clone();
    unmask(&mut data, [0x37, 0xfa, 0x21, 0x3d]);
    assert_ne!(data, original);
    unmask(&mut data, [0x37, 0xfa, 0x21, 0x3d]);
    assert_eq!(data, original);
  }
}
