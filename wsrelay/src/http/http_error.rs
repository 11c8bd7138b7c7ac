/// Http error
#[derive(Debug)]
pub enum HttpError {
  /// The request head didn't fit into the reading buffer.
  RequestHeadIsTooLarge {
    /// Maximum allowed length
    max: usize,
  },
}
