use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading the address list or the task config failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Args(#[from] pico_args::Error),

    /// Unknown option or a second free argument
    #[error("{0}, see -h")]
    Usage(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// Malformed filter text, e.g. "x=46"
    #[error("Query error: {0}")]
    Query(String),
}

pub type Result<T> = std::result::Result<T, Error>;
