//! Bridges browser WebSocket connections to a fixed TCP peer.
//!
//! Settings are read from the environment or from the nearest `.env` file. See
//! `wsrelay::relay::RelayConfig`.

use wsrelay::{
  misc::{tracing_tree_init, EnvVars},
  relay::{RelayConfig, RelayServer},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> wsrelay::Result<()> {
  tracing_tree_init(Some("info"))?;
  let config = EnvVars::<RelayConfig>::from_available()?.finish();
  let rslt = RelayServer::new(config).run().await;
  if let Err(err) = &rslt {
    tracing::error!(error = %err, "Relay stopped");
  }
  rslt
}
