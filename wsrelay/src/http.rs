//! The HTTP/1.1 subset needed to tell plain requests and upgrade requests apart.

mod http_error;

pub use http_error::HttpError;

/// Body of the informational response sent to plain requests.
pub const INFO_BODY: &str = "TCP relay is running. Connect via WebSocket.";
/// Request heads larger than this value are rejected.
pub const MAX_REQUEST_HEAD_LEN: usize = 8 * 1024;

const MAX_READ_HEADER_LEN: usize = 64;

/// Plain `200` response that closes the connection afterwards.
#[inline]
pub fn info_response() -> String {
  format!(
    "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{INFO_BODY}",
    INFO_BODY.len()
  )
}

/// Reads `stream` until a whole request head is available and then calls `req_cb` with the
/// parsed request.
///
/// Also returns the bytes that were received after the head.
#[cfg(feature = "tokio")]
#[inline]
pub async fn read_request<S, T>(
  stream: &mut S,
  req_cb: impl FnOnce(&httparse::Request<'_, '_>) -> T,
) -> crate::Result<(T, Vec<u8>)>
where
  S: tokio::io::AsyncRead + Unpin,
{
  use tokio::io::AsyncReadExt as _;

  let mut buffer = vec![0; MAX_REQUEST_HEAD_LEN];
  let mut read: usize = 0;
  loop {
    let Some(read_buffer) = buffer.get_mut(read..).filter(|el| !el.is_empty()) else {
      return Err(HttpError::RequestHeadIsTooLarge { max: MAX_REQUEST_HEAD_LEN }.into());
    };
    let local_read = stream.read(read_buffer).await?;
    if local_read == 0 {
      return Err(crate::Error::UnexpectedStreamReadEOF);
    }
    read = read.wrapping_add(local_read);
    let mut req_buffer = [httparse::EMPTY_HEADER; MAX_READ_HEADER_LEN];
    let mut req = httparse::Request::new(&mut req_buffer);
    match req.parse(buffer.get(..read).unwrap_or_default())? {
      httparse::Status::Complete(len) => {
        _trace!(len, "Received request head");
        let rslt = req_cb(&req);
        let surplus = buffer.get(len..read).unwrap_or_default().to_vec();
        return Ok((rslt, surplus));
      }
      httparse::Status::Partial => {}
    }
  }
}

/// Value of the first header named `name`, case-insensitive.
#[inline]
pub fn header_value<'req>(req: &httparse::Request<'_, 'req>, name: &str) -> Option<&'req [u8]> {
  req.headers.iter().find_map(|el| el.name.eq_ignore_ascii_case(name).then_some(el.value))
}

#[cfg(test)]
mod tests {
  use crate::http::{header_value, info_response};

  #[test]
  fn info_response_is_self_describing() {
    assert_eq!(
      info_response(),
      "HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\nContent-Length: 44\r\nConnection: close\r\n\r\nTCP relay is running. Connect via WebSocket."
    );
  }

  #[test]
  fn header_lookup_ignores_case() {
    let mut headers = [httparse::EMPTY_HEADER; 4];
    let mut req = httparse::Request::new(&mut headers);
    let _ = req.parse(b"GET / HTTP/1.1\r\nUPGRADE: websocket\r\n\r\n").unwrap();
    assert_eq!(header_value(&req, "upgrade"), Some(&b"websocket"[..]));
    assert_eq!(header_value(&req, "sec-websocket-key"), None);
  }
}
