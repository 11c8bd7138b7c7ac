/// Lifecycle of a [`crate::relay::RelaySession`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RelayState {
  /// The upstream connection is being established.
  Connecting,
  /// Both transports are available.
  Connected,
  /// Teardown was initiated. Terminal.
  Closed,
}

impl RelayState {
  /// Shortcut for [`RelayState::Closed`].
  #[inline]
  pub fn is_closed(self) -> bool {
    matches!(self, Self::Closed)
  }
}
