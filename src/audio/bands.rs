//! Band energy extraction (bass / mid / treble + spectral centroid).

use std::ops::Range;

use super::Spectrum;

/// Bin ranges used when reading a live capture spectrum
const CAPTURE_BASS_BINS: Range<usize> = 0..60;
const CAPTURE_MID_BINS: Range<usize> = 60..300;
const CAPTURE_TREBLE_BINS: Range<usize> = 600..1024;

/// Named frequency bands used for decoded tracks (Hz)
const BASS_HZ: (f32, f32) = (20.0, 140.0);
const MID_HZ: (f32, f32) = (400.0, 2600.0);
const TREBLE_HZ: (f32, f32) = (5200.0, 14000.0);

/// Per-frame band energies derived from one spectrum
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BandEnergies {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    /// Energy-weighted mean bin index
    pub centroid: f32,
}

/// How spectrum bins are grouped into bands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BandLayout {
    /// Fixed bin ranges (live capture)
    FixedBins,
    /// Named frequency ranges resolved against the stream's sample rate
    Frequency { sample_rate: u32 },
}

impl BandLayout {
    /// Bass, mid, and treble bin ranges for a spectrum of `len` bins
    pub fn ranges(&self, len: usize) -> [Range<usize>; 3] {
        match *self {
            BandLayout::FixedBins => [CAPTURE_BASS_BINS, CAPTURE_MID_BINS, CAPTURE_TREBLE_BINS],
            BandLayout::Frequency { sample_rate } => [BASS_HZ, MID_HZ, TREBLE_HZ]
                .map(|(low, high)| frequency_bins(low, high, sample_rate, len)),
        }
    }
}

/// Inclusive bin range covering `low..=high` Hz
fn frequency_bins(low_hz: f32, high_hz: f32, sample_rate: u32, len: usize) -> Range<usize> {
    if len == 0 || sample_rate == 0 {
        return 0..0;
    }
    let nyquist = sample_rate as f32 / 2.0;
    let to_bin = |hz: f32| ((hz / nyquist * len as f32).round() as usize).min(len - 1);
    to_bin(low_hz)..to_bin(high_hz) + 1
}

/// Mean magnitude over a bin range (clamped to the spectrum)
fn mean(spectrum: &Spectrum, range: Range<usize>) -> f32 {
    let end = range.end.min(spectrum.len());
    let start = range.start.min(end);
    if start == end {
        return 0.0;
    }
    let sum: u32 = spectrum.bins()[start..end].iter().map(|&b| b as u32).sum();
    sum as f32 / (end - start) as f32
}

/// Energy-weighted mean bin index; silence yields 0
fn centroid(spectrum: &Spectrum) -> f32 {
    let (weighted, total) = spectrum
        .bins()
        .iter()
        .enumerate()
        .fold((0.0f64, 1.0f64), |(weighted, total), (i, &v)| {
            (weighted + v as f64 * i as f64, total + v as f64)
        });
    (weighted / total) as f32
}

/// Reduce a spectrum to band energies
pub fn extract(spectrum: &Spectrum, layout: BandLayout) -> BandEnergies {
    let [bass, mid, treble] = layout.ranges(spectrum.len());
    BandEnergies {
        bass: mean(spectrum, bass),
        mid: mean(spectrum, mid),
        treble: mean(spectrum, treble),
        centroid: centroid(spectrum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn spectrum_with(values: impl FnMut(usize) -> u8) -> Spectrum {
        Spectrum::new((0..1024).map(values).collect())
    }

    #[test]
    fn test_silence_extracts_zero() {
        let energies = extract(&Spectrum::silent(1024), BandLayout::FixedBins);
        assert_eq!(energies, BandEnergies::default());

        let energies = extract(
            &Spectrum::silent(1024),
            BandLayout::Frequency { sample_rate: 44100 },
        );
        assert_eq!(energies.centroid, 0.0);
    }

    #[test]
    fn test_single_bass_bin() {
        let spectrum = spectrum_with(|i| if i == 30 { 255 } else { 0 });
        let energies = extract(&spectrum, BandLayout::FixedBins);

        assert!((energies.bass - 255.0 / 60.0).abs() < 1e-4);
        assert_eq!(energies.mid, 0.0);
        assert_eq!(energies.treble, 0.0);
        assert!((energies.centroid - 30.0 * 255.0 / 256.0).abs() < 1e-3);
    }

    #[test]
    fn test_full_scale_spectrum() {
        let energies = extract(&spectrum_with(|_| 255), BandLayout::FixedBins);
        assert_eq!(energies.bass, 255.0);
        assert_eq!(energies.mid, 255.0);
        assert_eq!(energies.treble, 255.0);
    }

    #[test]
    fn test_energies_stay_in_range_for_random_spectra() {
        let mut rng = StdRng::seed_from_u64(11);
        let layouts = [
            BandLayout::FixedBins,
            BandLayout::Frequency { sample_rate: 48000 },
        ];

        for _ in 0..200 {
            let spectrum = spectrum_with(|_| rng.gen());
            for layout in layouts {
                let e = extract(&spectrum, layout);
                for band in [e.bass, e.mid, e.treble] {
                    assert!((0.0..=255.0).contains(&band));
                }
                assert!(e.centroid >= 0.0 && e.centroid < 1024.0);
            }
        }
    }

    #[test]
    fn test_frequency_bins_at_44100() {
        let [bass, mid, treble] = BandLayout::Frequency { sample_rate: 44100 }.ranges(1024);
        assert_eq!(bass, 1..8);
        assert_eq!(mid, 19..122);
        assert_eq!(treble, 241..651);
    }

    #[test]
    fn test_frequency_layout_preserves_band_ordering() {
        // Typical music: energy falls off with frequency
        let spectrum = spectrum_with(|i| (255 - i / 4) as u8);
        let e = extract(&spectrum, BandLayout::Frequency { sample_rate: 44100 });
        assert!(e.bass > e.mid);
        assert!(e.mid > e.treble);
    }
}
