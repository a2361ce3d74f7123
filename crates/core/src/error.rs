use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoundscoutError {
    #[error("Download failed for sound {sound_id}: {reason}")]
    DownloadFailed { sound_id: u64, reason: String },

    #[error("No preview available for sound {sound_id}")]
    PreviewUnavailable { sound_id: u64 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Missing API key: {env_var} environment variable is not set")]
    MissingApiKey { env_var: String },
}

pub type Result<T> = std::result::Result<T, SoundscoutError>;
