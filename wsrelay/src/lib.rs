//! Bridges browser-facing WebSocket connections to a fixed upstream TCP endpoint.
//!
//! The WebSocket handshake and the frame protocol are implemented by hand: [`web_socket`]
//! contains the stateless frame codec and the upgrade handshake while [`relay`] wires one
//! WebSocket transport and one TCP transport together for every accepted connection.

#[macro_use]
mod macros;

mod error;
#[cfg(feature = "web-socket-handshake")]
pub mod http;
pub mod misc;
#[cfg(feature = "relay")]
pub mod relay;
#[cfg(feature = "web-socket")]
pub mod web_socket;

pub use error::Error;

/// Shortcut of [`core::result::Result<T, Error>`].
pub type Result<T> = core::result::Result<T, Error>;
