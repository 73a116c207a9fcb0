//! FFT spectrum analysis.
//!
//! Produces a fixed-length byte spectrum the way a browser analyser node does:
//! Blackman window, normalized magnitude, time smoothing, then a decibel range
//! mapped onto 0..=255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use super::{AudioError, SampleTap};
use crate::params::AnalysisConfig;

/// One frame of frequency-bin magnitudes (0..=255)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spectrum {
    bins: Vec<u8>,
}

impl Spectrum {
    pub fn new(bins: Vec<u8>) -> Self {
        Self { bins }
    }

    /// All-zero spectrum of the given length
    pub fn silent(len: usize) -> Self {
        Self { bins: vec![0; len] }
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    /// Bin magnitude as a float, 0 past the end
    pub fn value(&self, index: usize) -> f32 {
        self.bins.get(index).copied().unwrap_or(0) as f32
    }
}

/// Stateful analyzer (keeps the smoothed magnitudes between reads)
pub struct SpectrumAnalyzer {
    config: AnalysisConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    samples: Vec<f32>,
    smoothed: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self, AudioError> {
        config.validate()?;

        let size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);

        Ok(Self {
            window: (0..size).map(|i| blackman_window(i, size)).collect(),
            buffer: vec![Complex::new(0.0, 0.0); size],
            samples: vec![0.0; size],
            smoothed: vec![0.0; config.spectrum_len()],
            fft,
            config,
        })
    }

    pub fn spectrum_len(&self) -> usize {
        self.config.spectrum_len()
    }

    /// Analyze the latest window held by a sample tap
    pub fn analyze_tap(&mut self, tap: &SampleTap) -> Spectrum {
        let mut samples = std::mem::take(&mut self.samples);
        tap.snapshot_into(&mut samples);
        let spectrum = self.analyze(&samples);
        self.samples = samples;
        spectrum
    }

    /// Analyze one window of mono samples
    ///
    /// Inputs shorter than the FFT size are zero-padded at the front; longer
    /// inputs use their most recent samples.
    pub fn analyze(&mut self, samples: &[f32]) -> Spectrum {
        let size = self.config.fft_size;
        let recent = &samples[samples.len().saturating_sub(size)..];
        let pad = size - recent.len();

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = if i < pad { 0.0 } else { recent[i - pad] };
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing;
        let norm = 1.0 / size as f32;
        let bins = self
            .smoothed
            .iter_mut()
            .zip(&self.buffer)
            .map(|(smoothed, bin)| {
                *smoothed = tau * *smoothed + (1.0 - tau) * bin.norm() * norm;
                magnitude_to_byte(*smoothed, self.config.min_db, self.config.max_db)
            })
            .collect();

        Spectrum::new(bins)
    }

    /// Forget smoothing history (used when switching sources)
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }
}

/// Blackman window (alpha 0.16) over a period of `size` samples
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let phase = 2.0 * PI * index as f32 / size as f32;
    0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
}

/// Map a linear magnitude onto 0..=255 across [min_db, max_db]
fn magnitude_to_byte(magnitude: f32, min_db: f32, max_db: f32) -> u8 {
    if magnitude <= 0.0 || !magnitude.is_finite() {
        return 0;
    }
    let db = 20.0 * magnitude.log10();
    let scaled = 255.0 * (db - min_db) / (max_db - min_db);
    scaled.clamp(0.0, 255.0) as u8
}
