use crate::misc::str_split_once1;
use std::{
  env, fs,
  io::{self, BufRead as _, BufReader, Read},
  path::{Path, PathBuf},
};

/// Allows the interactive reading of environment variables.
#[derive(Debug)]
pub struct EnvVars<T>(T);

impl<T> EnvVars<T>
where
  T: FromVars,
{
  /// Tries reading from [`Self::from_process`] and then fallbacks to
  /// [`Self::from_nearest_env_file`].
  ///
  /// The process is only preferred when it defines at least one of [`FromVars::KEYS`].
  #[inline]
  pub fn from_available() -> crate::Result<Self> {
    if env::vars().any(|(key, _)| T::KEYS.contains(&key.as_str())) {
      return Self::from_process();
    }
    match Self::from_nearest_env_file() {
      Ok(elem) => Ok(elem),
      Err(crate::Error::IoError(err)) if err.kind() == io::ErrorKind::NotFound => {
        Self::from_process()
      }
      Err(err) => Err(err),
    }
  }

  /// Constructs `T` through the deserialization of a literal `.env` data.
  ///
  /// Intended for debugging or tests.
  #[inline]
  pub fn from_env_data(data: &[u8]) -> crate::Result<Self> {
    Ok(Self(T::from_vars(env_file(data)?)?))
  }

  /// Constructs `T` through the deserialization of the passed `.env` file.
  #[inline]
  pub fn from_env_path<P>(path: P) -> crate::Result<Self>
  where
    P: AsRef<Path>,
  {
    Ok(Self(T::from_vars(env_file(fs::File::open(path)?)?)?))
  }

  /// Constructs itself based on `vars`.
  ///
  /// Intended for debugging or tests.
  #[inline]
  pub fn from_iterator(vars: impl IntoIterator<Item = (String, String)>) -> crate::Result<Self> {
    Ok(Self(T::from_vars(vars)?))
  }

  /// Tries to find an `.env` file starting at the current location until the root directory.
  #[inline]
  pub fn from_nearest_env_file() -> crate::Result<Self> {
    let mut buffer = env::current_dir()?;
    find_file(&mut buffer, Path::new(".env"))?;
    Ok(Self(T::from_vars(env_file(fs::File::open(buffer)?)?)?))
  }

  /// Constructs `T` according to all the environment variables of the current process.
  #[inline]
  pub fn from_process() -> crate::Result<Self> {
    Ok(Self(T::from_vars(env::vars())?))
  }

  /// Unwraps `T`.
  #[inline]
  pub fn finish(self) -> T {
    self.0
  }
}

/// Constructs itself using a set of `(key, value)` string pairs.
pub trait FromVars: Sized {
  /// Variable names recognized by the implementation.
  const KEYS: &'static [&'static str];

  /// See [`FromVars`].
  fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> crate::Result<Self>;
}

fn env_file<R>(read: R) -> crate::Result<Vec<(String, String)>>
where
  R: Read,
{
  let mut buf_reader = BufReader::new(read);
  let mut buffer = String::new();
  let mut vars = Vec::new();
  loop {
    if buf_reader.read_line(&mut buffer)? == 0 {
      break;
    }
    let buffer_ref = buffer.trim();
    if buffer_ref.is_empty() || buffer_ref.starts_with('#') {
      buffer.clear();
      continue;
    }
    let Some((key, value)) = str_split_once1(buffer_ref, b'=') else {
      buffer.clear();
      continue;
    };
    vars.push((unquote(key), unquote(value)));
    buffer.clear();
  }
  Ok(vars)
}

fn find_file(buffer: &mut PathBuf, path: &Path) -> io::Result<()> {
  buffer.push(path);
  match fs::metadata(&buffer) {
    Ok(elem) => {
      if elem.is_file() {
        return Ok(());
      }
    }
    Err(err) => {
      if err.kind() != io::ErrorKind::NotFound {
        return Err(err);
      }
    }
  }
  let _ = buffer.pop();
  if buffer.pop() {
    find_file(buffer, path)
  } else {
    Err(io::Error::new(io::ErrorKind::NotFound, "`.env` file not found"))
  }
}

fn unquote(str: &str) -> String {
  let trimmed = str.trim();
  for quote in ['\'', '"'] {
    if let Some(rest) = trimmed.strip_prefix(quote).and_then(|el| el.strip_suffix(quote)) {
      return rest.to_owned();
    }
  }
  trimmed.to_owned()
}

#[cfg(test)]
mod tests {
  use crate::misc::env_vars::env_file;

  #[test]
  fn basic_env() {
    let data = "HOST='localhost'\nPORT=8080\n Comment\nNAME=\"foo\"\n# IGNORED=1\n\n";
    let result = env_file(data.as_bytes()).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[0], ("HOST".into(), "localhost".into()));
    assert_eq!(result[1], ("PORT".into(), "8080".into()));
    assert_eq!(result[2], ("NAME".into(), "foo".into()));
  }

  #[test]
  fn values_keep_inner_separators() {
    let result = env_file("URL=tcp://host:1?a=b\nQUOTE='\n".as_bytes()).unwrap();
    assert_eq!(result[0], ("URL".into(), "tcp://host:1?a=b".into()));
    assert_eq!(result[1], ("QUOTE".into(), "'".into()));
  }
}
