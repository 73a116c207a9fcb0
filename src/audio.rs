//! Audio playback, live capture, and spectrum analysis.
//!
//! Track playback and live capture both feed mono samples into a sample tap;
//! once per frame the active spectrum source runs an FFT over the tap and the
//! band extractor reduces the result to bass/mid/treble energies.

mod bands;
mod beat;
mod capture;
mod deck;
mod error;
mod fft;
mod playback;
mod source;
mod tap;

// Re-export public types
pub use bands::{extract, BandEnergies, BandLayout};
pub use beat::BeatDetector;
pub use capture::{request_capture, CaptureStream};
pub use deck::{AudioDeck, CaptureStatus};
pub use error::AudioError;
pub use fft::{blackman_window, Spectrum, SpectrumAnalyzer};
pub use playback::{decode_wav, DecodedAudio, Track};
pub use source::{DecodedAnalysis, LiveCapture, SpectrumSource};
pub use tap::SampleTap;
