use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsrError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Failed to read config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("Failed to build certificate request")]
    Request { source: rcgen::Error },

    #[error("Failed to generate RSA key")]
    KeyGeneration { source: rsa::Error },

    #[error("Failed to encode RSA private key")]
    KeyEncoding { source: rsa::pkcs8::Error },

    #[error("Failed to write {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CsrError>;
