use crate::misc::FromVars;

const RELAY_HOST: &str = "RELAY_HOST";
const RELAY_MAX_PAYLOAD_LEN: &str = "RELAY_MAX_PAYLOAD_LEN";
const RELAY_PORT: &str = "RELAY_PORT";
const TARGET_HOST: &str = "TARGET_HOST";
const TARGET_PORT: &str = "TARGET_PORT";

/// Parameters shared by every session of a relay.
///
/// Absent variables take the values of [`RelayConfig::default`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RelayConfig {
  /// Local address the listener binds to. `RELAY_HOST`.
  pub relay_host: String,
  /// Local port the listener binds to. `RELAY_PORT`.
  pub relay_port: u16,
  /// Optional cap on the payload length of inbound frames. `RELAY_MAX_PAYLOAD_LEN`.
  pub max_payload_len: Option<usize>,
  /// Upstream host. `TARGET_HOST`.
  pub target_host: String,
  /// Upstream port. `TARGET_PORT`.
  pub target_port: u16,
}

impl RelayConfig {
  /// `host:port` of the listener.
  #[inline]
  pub fn relay_addr(&self) -> String {
    format!("{}:{}", self.relay_host, self.relay_port)
  }

  /// `host:port` of the upstream peer.
  #[inline]
  pub fn target_addr(&self) -> String {
    format!("{}:{}", self.target_host, self.target_port)
  }
}

impl Default for RelayConfig {
  #[inline]
  fn default() -> Self {
    Self {
      relay_host: "0.0.0.0".into(),
      relay_port: 6003,
      max_payload_len: None,
      target_host: "127.0.0.1".into(),
      target_port: 6002,
    }
  }
}

impl FromVars for RelayConfig {
  const KEYS: &'static [&'static str] =
    &[RELAY_HOST, RELAY_MAX_PAYLOAD_LEN, RELAY_PORT, TARGET_HOST, TARGET_PORT];

  #[inline]
  fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> crate::Result<Self> {
    let mut this = Self::default();
    for (key, value) in vars {
      match key.as_str() {
        RELAY_HOST => this.relay_host = non_empty(RELAY_HOST, value)?,
        RELAY_MAX_PAYLOAD_LEN => {
          this.max_payload_len =
            if value.trim().is_empty() { None } else { Some(value.trim().parse()?) };
        }
        RELAY_PORT => this.relay_port = value.trim().parse()?,
        TARGET_HOST => this.target_host = non_empty(TARGET_HOST, value)?,
        TARGET_PORT => this.target_port = value.trim().parse()?,
        _ => {}
      }
    }
    Ok(this)
  }
}

fn non_empty(name: &'static str, value: String) -> crate::Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(crate::Error::UnexpectedVar { name });
  }
  Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
  use crate::{misc::EnvVars, relay::RelayConfig, Error};

  fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(key, value)| ((*key).to_owned(), (*value).to_owned())).collect()
  }

  #[test]
  fn defaults_when_nothing_is_set() {
    let config = EnvVars::<RelayConfig>::from_iterator(vars(&[("PATH", "/bin")])).unwrap().finish();
    assert_eq!(config, RelayConfig::default());
    assert_eq!(config.relay_addr(), "0.0.0.0:6003");
    assert_eq!(config.target_addr(), "127.0.0.1:6002");
  }

  #[test]
  fn every_variable_is_read() {
    let config = EnvVars::<RelayConfig>::from_iterator(vars(&[
      ("RELAY_HOST", "127.0.0.1"),
      ("RELAY_PORT", "7003"),
      ("RELAY_MAX_PAYLOAD_LEN", "65536"),
      ("TARGET_HOST", "gps.example.com"),
      ("TARGET_PORT", " 7002 "),
    ]))
    .unwrap()
    .finish();
    assert_eq!(
      config,
      RelayConfig {
        relay_host: "127.0.0.1".into(),
        relay_port: 7003,
        max_payload_len: Some(65536),
        target_host: "gps.example.com".into(),
        target_port: 7002,
      }
    );
  }

  #[test]
  fn env_data_is_supported() {
    let data = b"# Upstream\nTARGET_HOST='10.0.0.2'\nTARGET_PORT=\"9000\"\n\
      RELAY_MAX_PAYLOAD_LEN=\n";
    let config = EnvVars::<RelayConfig>::from_env_data(data).unwrap().finish();
    assert_eq!(config.target_addr(), "10.0.0.2:9000");
    assert_eq!(config.max_payload_len, None);
  }

  #[test]
  fn invalid_values_are_errors() {
    let rslt = EnvVars::<RelayConfig>::from_iterator(vars(&[("RELAY_PORT", "70000")]));
    assert!(matches!(rslt, Err(Error::ParseIntError(_))));
    let rslt = EnvVars::<RelayConfig>::from_iterator(vars(&[("TARGET_HOST", " ")]));
    assert!(matches!(rslt, Err(Error::UnexpectedVar { name: "TARGET_HOST" })));
  }
}
