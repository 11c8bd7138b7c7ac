use crate::{
  relay::{RelayMessage, RelayState, RelayStatus},
  web_socket::{encode_server_frame, FrameDecoding, OpCode, ReceiveBuffer, CLOSE_FRAME},
};
use bytes::BytesMut;
use core::future::{pending, Future};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt as _, AsyncWrite, AsyncWriteExt as _};

const READ_BUFFER_LEN: usize = 16 * 1024;

/// Owns one WebSocket transport and one upstream transport. Neither outlives the other.
///
/// Every `on_*` method is an event handler. [`RelaySession::run`] is the event loop that feeds
/// them but they can also be called directly, one at a time.
#[derive(Debug)]
pub struct RelaySession<S, U> {
  rb: ReceiveBuffer,
  state: RelayState,
  upstream: Option<U>,
  wb: BytesMut,
  ws: S,
  ws_is_writable: bool,
}

impl<S, U> RelaySession<S, U>
where
  S: AsyncRead + AsyncWrite + Unpin,
  U: AsyncRead + AsyncWrite + Unpin,
{
  /// `ws` must have already completed the opening handshake. `rb` may contain bytes that
  /// were received along with the handshake.
  #[inline]
  pub fn new(ws: S, rb: ReceiveBuffer) -> Self {
    Self {
      rb,
      state: RelayState::Connecting,
      upstream: None,
      wb: BytesMut::new(),
      ws,
      ws_is_writable: true,
    }
  }

  /// See [`RelayState`].
  #[inline]
  pub fn state(&self) -> RelayState {
    self.state
  }

  /// Drives the session until teardown.
  ///
  /// `connect` resolves to the upstream transport. WebSocket payloads received before it
  /// resolves are dropped.
  #[inline]
  pub async fn run<C>(mut self, connect: C)
  where
    C: Future<Output = io::Result<U>>,
  {
    let mut connect = core::pin::pin!(connect);
    let mut is_connecting = true;
    let mut upstream_buffer = vec![0; READ_BUFFER_LEN];
    let mut ws_buffer = vec![0; READ_BUFFER_LEN];
    self.start().await;
    self.process_frames().await;
    while !self.state.is_closed() {
      tokio::select! {
        rslt = &mut connect, if is_connecting => {
          is_connecting = false;
          match rslt {
            Ok(upstream) => self.on_upstream_connected(upstream).await,
            Err(err) => self.on_upstream_error(&err.to_string()).await,
          }
        }
        rslt = self.ws.read(&mut ws_buffer) => match rslt {
          Ok(0) => self.on_ws_ended().await,
          Ok(len) => self.on_ws_bytes(ws_buffer.get(..len).unwrap_or_default()).await,
          Err(err) => self.on_ws_error(&err).await,
        },
        rslt = read_upstream(self.upstream.as_mut(), &mut upstream_buffer) => match rslt {
          Ok(0) => self.on_upstream_closed().await,
          Ok(len) => self.on_upstream_data(upstream_buffer.get(..len).unwrap_or_default()).await,
          Err(err) => self.on_upstream_error(&err.to_string()).await,
        },
      }
    }
  }

  /// Announces that the upstream connection is being established.
  #[inline]
  pub async fn start(&mut self) {
    self.send_status(RelayStatus::Connecting, None).await;
  }

  /// Upstream connection was established.
  #[inline]
  pub async fn on_upstream_connected(&mut self, upstream: U) {
    if self.state.is_closed() {
      return;
    }
    tracing::debug!("Upstream connection established");
    self.state = RelayState::Connected;
    self.upstream = Some(upstream);
    self.send_status(RelayStatus::Connected, None).await;
  }

  /// Wraps `chunk` into a downstream envelope. Each chunk produces its own frame.
  #[inline]
  pub async fn on_upstream_data(&mut self, chunk: &[u8]) {
    if chunk.is_empty() {
      return;
    }
    let data = String::from_utf8_lossy(chunk);
    self.send_message(&RelayMessage::Downstream { data: &data }).await;
  }

  /// Reports `message` to the browser and tears everything down.
  #[inline]
  pub async fn on_upstream_error(&mut self, message: &str) {
    if self.state.is_closed() {
      return;
    }
    tracing::error!(message, "Upstream error");
    self.send_status(RelayStatus::Error, Some(message)).await;
    self.teardown().await;
  }

  /// Upstream peer closed the connection.
  #[inline]
  pub async fn on_upstream_closed(&mut self) {
    tracing::debug!("Upstream connection closed");
    self.teardown().await;
  }

  /// Buffers `bytes` and handles every complete frame in order.
  ///
  /// A close frame stops the processing of the remaining buffered frames.
  #[inline]
  pub async fn on_ws_bytes(&mut self, bytes: &[u8]) {
    if self.state.is_closed() {
      return;
    }
    self.rb.extend_from_slice(bytes);
    self.process_frames().await;
  }

  /// Browser closed its side of the connection.
  #[inline]
  pub async fn on_ws_ended(&mut self) {
    tracing::debug!("WebSocket connection ended");
    self.teardown().await;
  }

  /// The WebSocket transport is no longer usable.
  #[inline]
  pub async fn on_ws_error(&mut self, err: &io::Error) {
    tracing::error!(error = %err, "WebSocket error");
    self.ws_is_writable = false;
    self.teardown().await;
  }

  /// Notifies the browser, destroys the upstream connection and closes the WebSocket.
  ///
  /// Only the first call has effects. Every step is attempted regardless of the outcome of the
  /// previous ones.
  #[inline]
  pub async fn teardown(&mut self) {
    if self.state.is_closed() {
      return;
    }
    self.state = RelayState::Closed;
    let msg = RelayMessage::Status { status: RelayStatus::Disconnected, message: None };
    self.write_message(&msg).await;
    self.write_bytes(&CLOSE_FRAME).await;
    if let Some(mut upstream) = self.upstream.take() {
      if let Err(err) = upstream.shutdown().await {
        tracing::debug!(error = %err, "Failed to destroy upstream socket");
      }
    }
    if self.ws_is_writable {
      self.ws_is_writable = false;
      if let Err(err) = self.ws.shutdown().await {
        tracing::debug!(error = %err, "Failed to end WebSocket");
      }
    }
    tracing::info!("Relay closed");
  }

  async fn forward(&mut self, payload: &[u8]) {
    let Some(upstream) = self.upstream.as_mut() else {
      tracing::trace!(len = payload.len(), "Upstream is not connected, dropping payload");
      return;
    };
    if let Err(err) = upstream.write_all(payload).await {
      self.on_upstream_error(&err.to_string()).await;
    }
  }

  async fn process_frames(&mut self) {
    while !self.state.is_closed() {
      let frame = match self.rb.decode_frame() {
        Ok(FrameDecoding::Frame(elem)) => elem,
        Ok(FrameDecoding::Incomplete) => break,
        Err(err) => {
          tracing::error!(error = %err, "Invalid WebSocket frame");
          self.teardown().await;
          break;
        }
      };
      match frame.op_code() {
        OpCode::Close => {
          self.teardown().await;
          break;
        }
        OpCode::Ping => self.send_frame(OpCode::Pong, frame.payload()).await,
        op_code if op_code.is_data() => self.forward(frame.payload()).await,
        op_code => {
          tracing::trace!(?op_code, "Ignoring frame");
        }
      }
    }
  }

  async fn send_frame(&mut self, op_code: OpCode, payload: &[u8]) {
    if self.state.is_closed() {
      return;
    }
    self.write_frame(op_code, payload).await;
    self.teardown_if_unwritable().await;
  }

  async fn send_message(&mut self, msg: &RelayMessage<'_>) {
    if self.state.is_closed() {
      return;
    }
    self.write_message(msg).await;
    self.teardown_if_unwritable().await;
  }

  async fn send_status(&mut self, status: RelayStatus, message: Option<&str>) {
    self.send_message(&RelayMessage::Status { status, message }).await;
  }

  async fn teardown_if_unwritable(&mut self) {
    if !self.ws_is_writable {
      self.teardown().await;
    }
  }

  async fn write_bytes(&mut self, bytes: &[u8]) {
    if !self.ws_is_writable {
      return;
    }
    if let Err(err) = self.ws.write_all(bytes).await {
      tracing::error!(error = %err, "Failed to write to WebSocket");
      self.ws_is_writable = false;
    }
  }

  async fn write_frame(&mut self, op_code: OpCode, payload: &[u8]) {
    let mut wb = core::mem::take(&mut self.wb);
    wb.clear();
    encode_server_frame(&mut wb, op_code, payload);
    self.write_bytes(&wb).await;
    self.wb = wb;
  }

  async fn write_message(&mut self, msg: &RelayMessage<'_>) {
    match msg.to_json() {
      Ok(json) => self.write_frame(OpCode::Text, json.as_bytes()).await,
      Err(err) => tracing::error!(error = %err, "Failed to serialize relay message"),
    }
  }
}

async fn read_upstream<U>(upstream: Option<&mut U>, buffer: &mut [u8]) -> io::Result<usize>
where
  U: AsyncRead + Unpin,
{
  match upstream {
    Some(elem) => elem.read(buffer).await,
    None => pending().await,
  }
}
