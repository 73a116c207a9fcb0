//! Per-frame spectrum source: decoded track analysis or live capture.

use super::{BandLayout, CaptureStream, SampleTap, Spectrum, SpectrumAnalyzer};

/// Analysis of whatever the playback stream emits
pub struct DecodedAnalysis {
    tap: SampleTap,
    analyzer: SpectrumAnalyzer,
    sample_rate: u32,
}

impl DecodedAnalysis {
    pub fn new(tap: SampleTap, analyzer: SpectrumAnalyzer, sample_rate: u32) -> Self {
        Self {
            tap,
            analyzer,
            sample_rate,
        }
    }

    /// Track the output rate of a newly loaded track
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }
}

/// Analysis of a live capture stream
pub struct LiveCapture {
    stream: CaptureStream,
    tap: SampleTap,
    analyzer: SpectrumAnalyzer,
}

impl LiveCapture {
    pub fn new(stream: CaptureStream, tap: SampleTap, mut analyzer: SpectrumAnalyzer) -> Self {
        analyzer.reset();
        Self {
            stream,
            tap,
            analyzer,
        }
    }

    pub fn device_name(&self) -> &str {
        self.stream.device_name()
    }
}

/// Where this frame's spectrum comes from
pub enum SpectrumSource {
    DecodedAnalysis(DecodedAnalysis),
    LiveCapture(LiveCapture),
}

impl SpectrumSource {
    /// Read one frame's spectrum (fixed length for every call)
    pub fn read(&mut self) -> Spectrum {
        match self {
            SpectrumSource::DecodedAnalysis(decoded) => decoded.analyzer.analyze_tap(&decoded.tap),
            SpectrumSource::LiveCapture(live) => live.analyzer.analyze_tap(&live.tap),
        }
    }

    /// Band grouping matching this source
    pub fn band_layout(&self) -> BandLayout {
        match self {
            SpectrumSource::DecodedAnalysis(decoded) => BandLayout::Frequency {
                sample_rate: decoded.sample_rate,
            },
            SpectrumSource::LiveCapture(_) => BandLayout::FixedBins,
        }
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, SpectrumSource::LiveCapture(_))
    }

    /// Input device name while capturing
    pub fn capture_device(&self) -> Option<&str> {
        match self {
            SpectrumSource::DecodedAnalysis(_) => None,
            SpectrumSource::LiveCapture(live) => Some(live.device_name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::AnalysisConfig;
    use std::f32::consts::PI;

    fn decoded_source(tap: SampleTap) -> SpectrumSource {
        let analyzer = SpectrumAnalyzer::new(AnalysisConfig::default()).unwrap();
        SpectrumSource::DecodedAnalysis(DecodedAnalysis::new(tap, analyzer, 44100))
    }

    #[test]
    fn test_decoded_source_reads_fixed_length() {
        let tap = SampleTap::new(2048);
        let mut source = decoded_source(tap.clone());

        assert_eq!(source.read().len(), 1024);
        tap.push((0..300).map(|i| (i as f32 * 0.3).sin()));
        assert_eq!(source.read().len(), 1024);
        assert!(!source.is_capturing());
    }

    #[test]
    fn test_decoded_source_follows_tap() {
        let tap = SampleTap::new(2048);
        let mut source = decoded_source(tap.clone());
        assert!(source.read().bins().iter().all(|&b| b == 0));

        // 86 Hz bass tone at 44.1 kHz lands in bin 4
        tap.push((0..2048).map(|i| (2.0 * PI * 4.0 * i as f32 / 2048.0).sin()));
        let spectrum = source.read();
        assert!(spectrum.bins()[4] > 200);
    }

    #[test]
    fn test_decoded_layout_uses_sample_rate() {
        let source = decoded_source(SampleTap::new(16));
        assert_eq!(
            source.band_layout(),
            BandLayout::Frequency { sample_rate: 44100 }
        );
    }
}
