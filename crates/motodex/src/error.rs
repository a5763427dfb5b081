use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
  #[error("{} not found! Run `motodex generate` first to create the catalog.", path.display())]
  FileNotFound { path: PathBuf },

  #[error("Malformed catalog document {}: {source}", path.display())]
  MalformedDocument {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("I/O error on {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to encode catalog: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("Invalid configuration {}: {message}", path.display())]
  Config { path: PathBuf, message: String },
}

impl CatalogError {
  pub fn file_not_found(path: impl AsRef<Path>) -> Self {
    Self::FileNotFound { path: path.as_ref().to_path_buf() }
  }

  pub fn malformed(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
    Self::MalformedDocument { path: path.as_ref().to_path_buf(), source }
  }

  /// Wraps an I/O failure, promoting `NotFound` to [`CatalogError::FileNotFound`]
  pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
    if source.kind() == std::io::ErrorKind::NotFound {
      return Self::file_not_found(path);
    }
    Self::Io { path: path.as_ref().to_path_buf(), source }
  }

  pub fn config(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
    Self::Config { path: path.as_ref().to_path_buf(), message: message.into() }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::FileNotFound { .. })
  }
}
