//! Vision error types.

use thiserror::Error;

pub type VisionResult<T> = Result<T, VisionError>;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("failed to open camera {0}")]
    DeviceOpen(u32),

    #[error("could not open any video source")]
    NoDevice,

    #[error("failed to read frame from video source")]
    ReadFailed,

    #[error("unknown camera backend: {0}")]
    UnknownBackend(String),

    #[error("invalid capture config: {0}")]
    InvalidConfig(String),

    #[error("JPEG encode failed: {0}")]
    Encode(#[from] image::ImageError),
}
