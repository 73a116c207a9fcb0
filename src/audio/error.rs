//! Audio subsystem errors.

use std::path::PathBuf;

/// Failures while loading tracks, opening devices, or configuring analysis
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No audio {0} device found")]
    NoDevice(&'static str),

    #[error("Captured stream has no audio channels")]
    NoAudioTrack,

    #[error("Unsupported audio file: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("Track contains no samples: {}", .0.display())]
    EmptyTrack(PathBuf),

    #[error("No preset at index {0}")]
    UnknownPreset(usize),

    #[error("Unsupported device sample format: {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("Failed to get audio config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Invalid analysis config: {0}")]
    InvalidConfig(String),
}
