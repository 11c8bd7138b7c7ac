/// WebSocket Error
#[derive(Debug)]
pub enum WebSocketError {
  /// The announced payload length can not be represented in memory.
  InvalidPayloadLength {
    /// Length received from the frame header
    received: u64,
  },
  /// Frame payload exceeds the defined threshold.
  VeryLargePayload {
    /// Configured threshold
    max: usize,
    /// Length received from the frame header
    received: usize,
  },
}
