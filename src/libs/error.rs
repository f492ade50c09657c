use anyhow::Result;
use serde::{ser::Serializer, Serialize};
use thiserror::Error;

/**
 * Create the error type that represents all errors possible in our program
 * Stolen from https://github.com/tauri-apps/tauri/discussions/3913
 */
#[derive(Debug, Error)]
pub enum MedleyError {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Tauri(#[from] tauri::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("An error occurred while manipulating the config: {0}")]
    Config(String),

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),

    #[error("Supabase error: {0}")]
    Supabase(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /**
     * Custom errors
     */
    #[error("Supabase credentials are not configured")]
    NotConfigured,

    #[error("Record not found")]
    RecordNotFound,

    #[error("Unsupported file location: {0}")]
    Path(String),
}

/**
 * Let's make anyhow's errors Tauri friendly, so they can be used for commands
 */
impl Serialize for MedleyError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type AnyResult<T, E = MedleyError> = Result<T, E>;

impl From<serde_json::Error> for MedleyError {
    fn from(error: serde_json::Error) -> Self {
        MedleyError::SerializationError(error.to_string())
    }
}

impl From<toml::ser::Error> for MedleyError {
    fn from(error: toml::ser::Error) -> Self {
        MedleyError::SerializationError(error.to_string())
    }
}

impl From<toml::de::Error> for MedleyError {
    fn from(error: toml::de::Error) -> Self {
        MedleyError::DeserializationError(error.to_string())
    }
}
