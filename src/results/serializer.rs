//! JSON serialization for [`CallResult`].
//!
//! The serialized form is the caller-facing interchange contract; reading it
//! back yields a value equal to the one written. Paths are validated before
//! any I/O happens.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::results::CallResult;

#[derive(Error, Debug)]
pub enum SerializerError {
    #[error("Unsupported output path (expected a .json file): {0}")]
    UnsupportedOutput(PathBuf),

    #[error("Input is not a regular file: {0}")]
    MissingInput(PathBuf),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON failure: {0}")]
    Json(#[from] serde_json::Error),
}

fn check_json_extension(path: &Path) -> Result<(), SerializerError> {
    if path.extension().is_some_and(|ext| ext == "json") {
        Ok(())
    } else {
        Err(SerializerError::UnsupportedOutput(path.to_path_buf()))
    }
}

/// Serialize a result to pretty-printed JSON
pub fn to_json_string(result: &CallResult) -> Result<String, SerializerError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write a result to a `.json` file
pub fn to_json(result: &CallResult, path: &Path) -> Result<(), SerializerError> {
    check_json_extension(path)?;
    std::fs::write(path, to_json_string(result)?)?;
    Ok(())
}

/// Read a result back from a `.json` file
pub fn from_json(path: &Path) -> Result<CallResult, SerializerError> {
    check_json_extension(path)?;
    if !path.is_file() {
        return Err(SerializerError::MissingInput(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
