#[cfg(feature = "web-socket-handshake")]
use crate::http::HttpError;
#[cfg(feature = "web-socket")]
use crate::web_socket::WebSocketError;
use core::fmt::{Debug, Display, Formatter};

/// Grouped individual errors
#[derive(Debug)]
pub enum Error {
  // External - Misc
  //
  #[cfg(feature = "web-socket-handshake")]
  HttpParse(httparse::Error),
  #[cfg(feature = "serde_json")]
  SerdeJson(serde_json::Error),
  #[cfg(feature = "tracing-subscriber")]
  TryInitError(tracing_subscriber::util::TryInitError),

  // External - Std
  //
  IoError(std::io::Error),
  ParseIntError(core::num::ParseIntError),

  // Generic
  //
  /// Unexpected end of file when reading from a stream.
  UnexpectedStreamReadEOF,
  /// A configuration variable could not be interpreted.
  UnexpectedVar {
    /// Variable name
    name: &'static str,
  },

  // Internal
  //
  #[cfg(feature = "web-socket-handshake")]
  HttpError(HttpError),
  #[cfg(feature = "web-socket")]
  WebSocketError(WebSocketError),
}

impl Display for Error {
  #[inline]
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    <Self as Debug>::fmt(self, f)
  }
}

impl core::error::Error for Error {}

#[cfg(feature = "web-socket-handshake")]
impl From<httparse::Error> for Error {
  #[inline]
  fn from(from: httparse::Error) -> Self {
    Self::HttpParse(from)
  }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for Error {
  #[inline]
  fn from(from: serde_json::Error) -> Self {
    Self::SerdeJson(from)
  }
}

#[cfg(feature = "tracing-subscriber")]
impl From<tracing_subscriber::util::TryInitError> for Error {
  #[inline]
  fn from(from: tracing_subscriber::util::TryInitError) -> Self {
    Self::TryInitError(from)
  }
}

impl From<std::io::Error> for Error {
  #[inline]
  fn from(from: std::io::Error) -> Self {
    Self::IoError(from)
  }
}

impl From<core::num::ParseIntError> for Error {
  #[inline]
  fn from(from: core::num::ParseIntError) -> Self {
    Self::ParseIntError(from)
  }
}

// Internal

#[cfg(feature = "web-socket-handshake")]
impl From<HttpError> for Error {
  #[inline]
  fn from(from: HttpError) -> Self {
    Self::HttpError(from)
  }
}

#[cfg(feature = "web-socket")]
impl From<WebSocketError> for Error {
  #[inline]
  fn from(from: WebSocketError) -> Self {
    Self::WebSocketError(from)
  }
}
