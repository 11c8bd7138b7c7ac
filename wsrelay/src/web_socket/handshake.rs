//! Server side of the opening handshake.

use crate::http::header_value;
use base64::{engine::general_purpose::STANDARD, Engine};
use sha1::{Digest, Sha1};

/// Appended to the client key before hashing.
pub const WS_GUID: &[u8] = b"258EAFA5-E914-47DA-95CA-C5AB0DC85B11";

/// What an inbound HTTP request asks for.
#[derive(Debug, Eq, PartialEq)]
pub enum RequestKind {
  /// No upgrade was requested.
  Plain,
  /// Valid WebSocket upgrade.
  Upgrade {
    /// `Sec-WebSocket-Key`
    key: String,
  },
  /// Upgrade attempt with an unexpected protocol or without a key.
  Malformed,
}

impl RequestKind {
  /// Inspects the `Upgrade` and `Sec-WebSocket-Key` headers of `req`.
  #[inline]
  pub fn from_request(req: &httparse::Request<'_, '_>) -> Self {
    let Some(upgrade) = header_value(req, "upgrade") else {
      return Self::Plain;
    };
    if !upgrade.trim_ascii().eq_ignore_ascii_case(b"websocket") {
      _debug!("Unsupported upgrade protocol");
      return Self::Malformed;
    }
    let key = header_value(req, "sec-websocket-key")
      .and_then(|el| core::str::from_utf8(el).ok())
      .map(str::trim)
      .filter(|el| !el.is_empty());
    match key {
      Some(elem) => Self::Upgrade { key: elem.to_owned() },
      None => {
        _debug!("Missing Sec-WebSocket-Key");
        Self::Malformed
      }
    }
  }
}

/// `base64(sha1(key ++ GUID))`
#[inline]
pub fn derived_key(key: &[u8]) -> String {
  let mut sha1 = Sha1::new();
  sha1.update(key);
  sha1.update(WS_GUID);
  STANDARD.encode(sha1.finalize())
}

/// The whole `101` response, without extension negotiation.
#[inline]
pub fn switching_protocols_response(key: &[u8]) -> String {
  format!(
    "HTTP/1.1 101 Switching Protocols\r\nUpgrade: websocket\r\nConnection: Upgrade\r\nSec-WebSocket-Accept: {}\r\n\r\n",
    derived_key(key)
  )
}

#[cfg(test)]
mod tests {
  use crate::web_socket::handshake::{derived_key, switching_protocols_response, RequestKind};

  fn kind(bytes: &[u8]) -> RequestKind {
    let mut headers = [httparse::EMPTY_HEADER; 16];
    let mut req = httparse::Request::new(&mut headers);
    assert!(req.parse(bytes).unwrap().is_complete());
    RequestKind::from_request(&req)
  }

  #[test]
  fn rfc_6455_vector() {
    assert_eq!(derived_key(b"dGhlIHNhbXBsZSBub25jZQ=="), "s3pPLMBiTxaQ9kYGzzhZRbK+xOo=");
  }

  #[test]
  fn response_is_literal() {
    assert_eq!(
      switching_protocols_response(b"dGhlIHNhbXBsZSBub25jZQ=="),
      "HTTP/1.1 101 Switching Protocols\r\n\
       Upgrade: websocket\r\n\
       Connection: Upgrade\r\n\
       Sec-WebSocket-Accept: s3pPLMBiTxaQ9kYGzzhZRbK+xOo=\r\n\
       \r\n"
    );
  }

  #[test]
  fn plain_requests() {
    assert_eq!(kind(b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n"), RequestKind::Plain);
    assert_eq!(
      kind(b"GET /health HTTP/1.1\r\nSec-WebSocket-Key: abc\r\n\r\n"),
      RequestKind::Plain
    );
  }

  #[test]
  fn upgrade_requests() {
    assert_eq!(
      kind(
        b"GET / HTTP/1.1\r\nConnection: Upgrade\r\nUpgrade: WebSocket\r\n\
          Sec-WebSocket-Key: dGhlIHNhbXBsZSBub25jZQ==\r\nSec-WebSocket-Version: 13\r\n\r\n"
      ),
      RequestKind::Upgrade { key: "dGhlIHNhbXBsZSBub25jZQ==".into() }
    );
  }

  #[test]
  fn malformed_requests() {
    assert_eq!(
      kind(b"GET / HTTP/1.1\r\nUpgrade: h2c\r\nSec-WebSocket-Key: abc\r\n\r\n"),
      RequestKind::Malformed
    );
    assert_eq!(kind(b"GET / HTTP/1.1\r\nUpgrade: websocket\r\n\r\n"), RequestKind::Malformed);
    assert_eq!(
      kind(b"GET / HTTP/1.1\r\nUpgrade: websocket\r\nSec-WebSocket-Key: \r\n\r\n"),
      RequestKind::Malformed
    );
  }
}
