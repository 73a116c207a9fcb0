//! Audio analysis, playback, and beat detection configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::audio::AudioError;

/// Spectrum analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// FFT window size (must be power of 2)
    /// 2048 samples = 1024 spectrum bins
    pub fft_size: usize,

    /// Time smoothing between consecutive reads (0.0 = none, 1.0 = frozen)
    pub smoothing: f32,

    /// Magnitude mapped to byte value 0 (decibels)
    pub min_db: f32,

    /// Magnitude mapped to byte value 255 (decibels)
    pub max_db: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: 2048,
            smoothing: 0.8,
            min_db: -100.0,
            max_db: -30.0,
        }
    }
}

impl AnalysisConfig {
    /// Number of spectrum bins produced per read
    pub fn spectrum_len(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), AudioError> {
        if !self.fft_size.is_power_of_two() {
            return Err(AudioError::InvalidConfig(format!(
                "FFT size must be power of 2, got {}",
                self.fft_size
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(AudioError::InvalidConfig(format!(
                "smoothing must be in [0, 1), got {}",
                self.smoothing
            )));
        }
        if self.max_db <= self.min_db {
            return Err(AudioError::InvalidConfig(format!(
                "max_db ({}) must exceed min_db ({})",
                self.max_db, self.min_db
            )));
        }
        Ok(())
    }
}

/// Track playback configuration
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// Output gain applied after a successful load (0.0..=1.0)
    pub gain: f32,

    /// Preset track paths, selectable with keys 1-5
    pub presets: Vec<PathBuf>,

    /// Preset loaded at startup
    pub startup_preset: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            gain: 0.2,
            presets: [
                "assets/ArgoFox.wav",
                "assets/Island.wav",
                "assets/Spectrum.wav",
                "assets/Tobu.wav",
                "assets/Tranquillity.wav",
            ]
            .into_iter()
            .map(PathBuf::from)
            .collect(),
            startup_preset: 1,
        }
    }
}

/// Beat detection tuning
#[derive(Debug, Clone)]
pub struct BeatParams {
    /// Minimum time between two beats
    pub min_interval: Duration,

    /// Fraction of bass energy the threshold settles toward
    pub threshold_ratio: f32,

    /// Threshold smoothing factor per check
    pub smoothing: f32,
}

impl Default for BeatParams {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(200),
            threshold_ratio: 0.8,
            smoothing: 0.1,
        }
    }
}
