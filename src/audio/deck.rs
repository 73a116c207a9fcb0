//! Audio deck: current track, preset/file selection, and capture mode.

use std::path::Path;

use super::{
    request_capture, AudioError, BandLayout, CaptureStream, DecodedAnalysis, LiveCapture,
    SampleTap, Spectrum, SpectrumAnalyzer, SpectrumSource, Track,
};
use crate::params::{AnalysisConfig, PlaybackConfig};

/// Fallback analysis rate until a track reports its output rate
const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Live capture state shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    Idle,
    Capturing,
    Failed,
}

impl CaptureStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CaptureStatus::Idle => "Capture Audio",
            CaptureStatus::Capturing => "Audio Capturing...",
            CaptureStatus::Failed => "Capture Failed - Try Again",
        }
    }
}

/// Owns the playing track and the spectrum source
pub struct AudioDeck {
    analysis: AnalysisConfig,
    playback: PlaybackConfig,
    playback_tap: SampleTap,
    track: Option<Track>,
    source: SpectrumSource,
    status: CaptureStatus,
}

impl AudioDeck {
    pub fn new(analysis: AnalysisConfig, playback: PlaybackConfig) -> Result<Self, AudioError> {
        let analyzer = SpectrumAnalyzer::new(analysis.clone())?;
        let playback_tap = SampleTap::new(analysis.fft_size);
        let source = SpectrumSource::DecodedAnalysis(DecodedAnalysis::new(
            playback_tap.clone(),
            analyzer,
            DEFAULT_SAMPLE_RATE,
        ));

        Ok(Self {
            analysis,
            playback,
            playback_tap,
            track: None,
            source,
            status: CaptureStatus::Idle,
        })
    }

    /// Load one of the configured presets
    pub fn load_preset(&mut self, index: usize) -> Result<(), AudioError> {
        let path = self
            .playback
            .presets
            .get(index)
            .cloned()
            .ok_or(AudioError::UnknownPreset(index))?;
        self.load_file(&path)
    }

    /// Load a user-provided file
    ///
    /// On failure the current track is left untouched (and keeps playing).
    pub fn load_file(&mut self, path: &Path) -> Result<(), AudioError> {
        let track = Track::load(path, self.playback_tap.clone())?;

        // Stop the previous track only once the new one is ready
        if let Some(previous) = self.track.take() {
            previous.pause();
        }

        track.set_gain(self.playback.gain);
        track.play();

        if let SpectrumSource::DecodedAnalysis(decoded) = &mut self.source {
            decoded.set_sample_rate(track.sample_rate());
        }

        tracing::info!("Now playing: {}", track.name());
        self.track = Some(track);
        Ok(())
    }

    /// Toggle the current track between playing and paused
    pub fn toggle_play(&mut self) {
        let Some(track) = &self.track else {
            tracing::debug!("Toggle ignored: no track loaded");
            return;
        };
        if track.is_playing() {
            track.pause();
        } else {
            track.play();
        }
    }

    /// Switch to live capture; failures keep decoded analysis active
    pub fn start_capture(&mut self) -> CaptureStatus {
        self.start_capture_with(request_capture)
    }

    /// Switch to live capture using `request` to open the input stream
    pub fn start_capture_with<F>(&mut self, request: F) -> CaptureStatus
    where
        F: FnOnce(SampleTap) -> Result<CaptureStream, AudioError>,
    {
        if self.source.is_capturing() {
            return self.status;
        }

        let tap = SampleTap::new(self.analysis.fft_size);
        let attempt = request(tap.clone())
            .and_then(|stream| Ok((stream, SpectrumAnalyzer::new(self.analysis.clone())?)));

        self.status = match attempt {
            Ok((stream, analyzer)) => {
                self.source = SpectrumSource::LiveCapture(LiveCapture::new(stream, tap, analyzer));
                CaptureStatus::Capturing
            }
            Err(e) => {
                tracing::warn!("Audio capture failed: {}", e);
                CaptureStatus::Failed
            }
        };
        self.status
    }

    /// Read this frame's spectrum together with its band layout
    pub fn read(&mut self) -> (Spectrum, BandLayout) {
        (self.source.read(), self.source.band_layout())
    }

    pub fn status(&self) -> CaptureStatus {
        self.status
    }

    pub fn is_capturing(&self) -> bool {
        self.source.is_capturing()
    }

    /// Input device name while capturing
    pub fn capture_device(&self) -> Option<&str> {
        self.source.capture_device()
    }

    pub fn is_playing(&self) -> bool {
        self.track.as_ref().is_some_and(Track::is_playing)
    }

    pub fn track_name(&self) -> Option<String> {
        self.track.as_ref().map(Track::name)
    }

    pub fn preset_count(&self) -> usize {
        self.playback.presets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn deck() -> AudioDeck {
        AudioDeck::new(AnalysisConfig::default(), PlaybackConfig::default()).unwrap()
    }

    #[test]
    fn test_new_deck_reads_silence() {
        let mut deck = deck();
        let (spectrum, layout) = deck.read();

        assert_eq!(spectrum.len(), 1024);
        assert!(spectrum.bins().iter().all(|&b| b == 0));
        assert_eq!(
            layout,
            BandLayout::Frequency {
                sample_rate: DEFAULT_SAMPLE_RATE
            }
        );
        assert_eq!(deck.status(), CaptureStatus::Idle);
        assert!(!deck.is_playing());
    }

    #[test]
    fn test_unsupported_file_is_rejected_without_side_effects() {
        let mut deck = deck();
        let err = deck.load_file(&PathBuf::from("notes.txt")).unwrap_err();

        assert!(matches!(err, AudioError::UnsupportedFormat(_)));
        assert!(deck.track_name().is_none());
        assert!(!deck.is_capturing());
    }

    fn deck_playing(name: &str) -> AudioDeck {
        let mut deck = deck();
        let track = Track::detached(&PathBuf::from(name), 48000);
        track.play();
        deck.track = Some(track);
        deck
    }

    #[test]
    fn test_failed_load_keeps_previous_track() {
        let mut deck = deck_playing("assets/Island.wav");

        assert!(deck.load_file(&PathBuf::from("notes.txt")).is_err());
        assert!(matches!(
            deck.load_file(&PathBuf::from("/nonexistent/terrasonic.wav")),
            Err(AudioError::Decode { .. })
        ));
        assert!(deck.load_preset(99).is_err());

        assert_eq!(deck.track_name().as_deref(), Some("Island"));
        assert!(deck.is_playing());
    }

    #[test]
    fn test_toggle_pauses_and_resumes_track() {
        let mut deck = deck_playing("assets/Tobu.wav");
        deck.toggle_play();
        assert!(!deck.is_playing());
        deck.toggle_play();
        assert!(deck.is_playing());
    }

    #[test]
    fn test_capture_failure_keeps_decoded_analysis() {
        let mut deck = deck();
        let status = deck.start_capture_with(|_| Err(AudioError::NoDevice("input")));

        assert_eq!(status, CaptureStatus::Failed);
        assert_eq!(deck.status(), CaptureStatus::Failed);
        assert!(!deck.is_capturing());
        assert!(deck.capture_device().is_none());

        let (spectrum, layout) = deck.read();
        assert_eq!(spectrum.len(), 1024);
        assert!(matches!(layout, BandLayout::Frequency { .. }));
    }

    #[test]
    fn test_capture_can_be_retried_after_failure() {
        let mut deck = deck();
        deck.start_capture_with(|_| Err(AudioError::NoDevice("input")));

        let status = deck.start_capture_with(|_| Ok(CaptureStream::detached("Monitor")));
        assert_eq!(status, CaptureStatus::Capturing);
        assert!(deck.is_capturing());
        assert_eq!(deck.capture_device(), Some("Monitor"));

        let (spectrum, layout) = deck.read();
        assert_eq!(spectrum.len(), 1024);
        assert_eq!(layout, BandLayout::FixedBins);
    }

    #[test]
    fn test_capture_is_not_reopened() {
        let mut deck = deck();
        deck.start_capture_with(|_| Ok(CaptureStream::detached("Monitor")));

        let status = deck.start_capture_with(|_| Err(AudioError::NoDevice("input")));
        assert_eq!(status, CaptureStatus::Capturing);
        assert_eq!(deck.capture_device(), Some("Monitor"));
    }

    #[test]
    fn test_unknown_preset() {
        let mut deck = deck();
        let count = deck.preset_count();
        assert!(matches!(
            deck.load_preset(count),
            Err(AudioError::UnknownPreset(i)) if i == count
        ));
    }

    #[test]
    fn test_toggle_without_track_is_noop() {
        let mut deck = deck();
        deck.toggle_play();
        assert!(!deck.is_playing());
    }

    #[test]
    fn test_invalid_analysis_config_is_rejected() {
        let analysis = AnalysisConfig {
            fft_size: 3000,
            ..Default::default()
        };
        assert!(AudioDeck::new(analysis, PlaybackConfig::default()).is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(CaptureStatus::Capturing.label(), "Audio Capturing...");
        assert_eq!(CaptureStatus::Failed.label(), "Capture Failed - Try Again");
    }
}
