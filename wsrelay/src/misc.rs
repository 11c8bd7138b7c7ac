//! Miscellaneous

mod env_vars;

pub use env_vars::{EnvVars, FromVars};

/// Initializes a hierarchical `tracing` subscriber that writes to `stderr`.
///
/// `RUST_LOG` takes precedence over `fallback_opt`.
#[cfg(feature = "tracing-subscriber")]
#[inline]
pub fn tracing_tree_init(
  fallback_opt: Option<&str>,
) -> Result<(), tracing_subscriber::util::TryInitError> {
  use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
  };
  let fallback = fallback_opt.unwrap_or("");
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
  let tracing_tree = tracing_tree::HierarchicalLayer::default()
    .with_deferred_spans(true)
    .with_indent_amount(2)
    .with_indent_lines(true)
    .with_targets(true)
    .with_thread_ids(true)
    .with_thread_names(true)
    .with_verbose_entry(false)
    .with_verbose_exit(false)
    .with_writer(std::io::stderr);
  tracing_subscriber::Registry::default().with(env_filter).with(tracing_tree).try_init()
}

/// Splits `str` at the first occurrence of `elem`, excluding the separator.
pub(crate) fn str_split_once1(str: &str, elem: u8) -> Option<(&str, &str)> {
  let idx = str.as_bytes().iter().position(|el| *el == elem)?;
  Some((str.get(..idx)?, str.get(idx.wrapping_add(1)..)?))
}
