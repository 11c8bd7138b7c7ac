use serde::Serialize;

/// Text payloads sent by the relay to the browser.
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase", tag = "type")]
pub enum RelayMessage<'any> {
  /// Bytes received from upstream.
  Downstream {
    /// Upstream chunk decoded as UTF-8.
    data: &'any str,
  },
  /// Lifecycle notification, not part of the upstream stream.
  Status {
    /// See [`RelayStatus`].
    status: RelayStatus,
    /// Human-readable details.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'any str>,
  },
}

impl RelayMessage<'_> {
  /// JSON representation.
  #[inline]
  pub fn to_json(&self) -> crate::Result<String> {
    Ok(serde_json::to_string(self)?)
  }
}

/// See [`RelayMessage::Status`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayStatus {
  /// Session was created, upstream connection is pending.
  Connecting,
  /// Upstream connection was established.
  Connected,
  /// Upstream failed. Always followed by `Disconnected`.
  Error,
  /// Session is being torn down.
  Disconnected,
}
