use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Redaction is only supported for local vaults")]
    UnsupportedEnvironment,

    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    #[error("Invalid extra arguments: {0}")]
    InvalidArguments(#[from] shell_words::ParseError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
