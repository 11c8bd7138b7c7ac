use crate::{
  http::{info_response, read_request},
  relay::{RelayConfig, RelaySession},
  web_socket::{
    handshake::{switching_protocols_response, RequestKind},
    ReceiveBuffer,
  },
};
use std::sync::Arc;
use tokio::{
  io::AsyncWriteExt as _,
  net::{TcpListener, TcpStream},
};
use tracing::Instrument as _;

/// Accepts browser connections and spawns one [`RelaySession`] per WebSocket upgrade.
#[derive(Clone, Debug)]
pub struct RelayServer {
  config: Arc<RelayConfig>,
}

impl RelayServer {
  /// Nothing is bound until [`Self::bind`] or [`Self::run`] is called.
  #[inline]
  pub fn new(config: RelayConfig) -> Self {
    Self { config: Arc::new(config) }
  }

  /// Binds the listening socket described by [`RelayConfig::relay_addr`].
  #[inline]
  pub async fn bind(&self) -> crate::Result<TcpListener> {
    Ok(TcpListener::bind(self.config.relay_addr()).await?)
  }

  /// [`Self::bind`] followed by [`Self::serve`].
  #[inline]
  pub async fn run(self) -> crate::Result<()> {
    let listener = self.bind().await?;
    self.serve(listener).await
  }

  /// Accept loop. Each connection is handled by its own task and a failure in one connection
  /// never affects the others.
  ///
  /// Accept errors are logged and the loop keeps going.
  #[inline]
  pub async fn serve(self, listener: TcpListener) -> crate::Result<()> {
    tracing::info!(addr = %listener.local_addr()?, "TCP relay listening");
    tracing::info!(target_addr = %self.config.target_addr(), "Forwarding to upstream");
    loop {
      let (stream, peer) = match listener.accept().await {
        Ok(elem) => elem,
        Err(err) => {
          tracing::error!(error = %err, "Failed to accept connection");
          continue;
        }
      };
      let config = Arc::clone(&self.config);
      let span = tracing::info_span!("session", %peer);
      let _jh = tokio::spawn(
        async move {
          if let Err(err) = handle_connection(&config, stream).await {
            tracing::debug!(error = %err, "Connection was dropped");
          }
        }
        .instrument(span),
      );
    }
  }
}

async fn handle_connection(config: &RelayConfig, mut stream: TcpStream) -> crate::Result<()> {
  let (kind, surplus) = read_request(&mut stream, RequestKind::from_request).await?;
  match kind {
    RequestKind::Plain => {
      stream.write_all(info_response().as_bytes()).await?;
      stream.shutdown().await?;
    }
    RequestKind::Malformed => {
      tracing::debug!("Dropping malformed upgrade request");
    }
    RequestKind::Upgrade { key } => {
      stream.write_all(switching_protocols_response(key.as_bytes()).as_bytes()).await?;
      tracing::info!("WebSocket connection established");
      let mut rb = ReceiveBuffer::with_max_payload_len(config.max_payload_len);
      rb.extend_from_slice(&surplus);
      RelaySession::new(stream, rb).run(TcpStream::connect(config.target_addr())).await;
    }
  }
  Ok(())
}
