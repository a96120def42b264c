use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoicingError {
    #[error("Unknown key name: {0}")]
    UnknownKey(String),

    #[error("Unknown chord quality: {0}")]
    UnknownQuality(String),

    #[error("Invalid fret value {value} (expected -1 for muted, 0 for open, or 1..={max})")]
    InvalidFret { value: i32, max: u8 },

    #[error("Inconsistent chord position {frets}: {reason}")]
    InvalidPosition { frets: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
