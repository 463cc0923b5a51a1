//! Errors raised while bootstrapping: reading config and preparing folders

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Root folder or config file could not be created or read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}
