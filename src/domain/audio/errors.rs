//! Audio Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("not an audio mime type: {0}")]
    NotAudio(String),

    #[error("mime type carries no sample rate: {0}")]
    MissingRate(String),

    #[error("invalid sample rate in mime type: {0}")]
    InvalidRate(String),

    #[error("invalid WAV header: {0}")]
    InvalidHeader(&'static str),
}
