//! Bridges every accepted WebSocket connection to a fixed upstream TCP peer.
//!
//! Upstream-bound payloads are written verbatim while upstream bytes are wrapped into
//! `{"type":"downstream","data":...}` text frames. Lifecycle changes are narrated to the browser
//! with `{"type":"status",...}` envelopes.

mod relay_config;
mod relay_message;
mod relay_server;
mod relay_session;
mod relay_state;

pub use relay_config::RelayConfig;
pub use relay_message::{RelayMessage, RelayStatus};
pub use relay_server::RelayServer;
pub use relay_session::RelaySession;
pub use relay_state::RelayState;
