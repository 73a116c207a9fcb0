//! Adaptive-threshold beat detection over the bass band.

use std::time::Duration;

use crate::params::BeatParams;

/// Fires when bass energy rises above a smoothed threshold
#[derive(Debug, Clone)]
pub struct BeatDetector {
    params: BeatParams,
    threshold: f32,
    last_beat: Option<Duration>,
}

impl BeatDetector {
    pub fn new(params: BeatParams) -> Self {
        Self {
            params,
            threshold: 0.0,
            last_beat: None,
        }
    }

    /// Check one bass sample taken at `now` (time since start)
    ///
    /// The threshold is smoothed toward `threshold_ratio * bass` after every
    /// call, whether or not a beat fired.
    pub fn check(&mut self, bass: f32, now: Duration) -> bool {
        let rested = match self.last_beat {
            Some(last) => now.saturating_sub(last) > self.params.min_interval,
            None => true,
        };

        let fired = bass > self.threshold && rested;
        if fired {
            self.last_beat = Some(now);
        }

        let target = bass * self.params.threshold_ratio;
        self.threshold += (target - self.threshold) * self.params.smoothing;

        fired
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn last_beat(&self) -> Option<Duration> {
        self.last_beat
    }
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::new(BeatParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_loud_check_fires() {
        let mut detector = BeatDetector::default();
        assert!(detector.check(255.0 / 60.0, Duration::ZERO));
        assert_eq!(detector.last_beat(), Some(Duration::ZERO));
    }

    #[test]
    fn test_silence_never_fires() {
        let mut detector = BeatDetector::default();
        for i in 0..100 {
            assert!(!detector.check(0.0, Duration::from_millis(i * 10)));
        }
        assert_eq!(detector.threshold(), 0.0);
    }

    #[test]
    fn test_min_interval_between_beats() {
        let mut detector = BeatDetector::default();
        let mut fired_at = Vec::new();

        for i in 0..100 {
            let now = Duration::from_millis(i * 10);
            if detector.check(100.0, now) {
                fired_at.push(now);
            }
        }

        assert!(!fired_at.is_empty());
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] > Duration::from_millis(200));
        }
        assert_eq!(
            fired_at,
            [0, 210, 420, 630, 840].map(Duration::from_millis).to_vec()
        );
    }

    #[test]
    fn test_threshold_converges_geometrically() {
        let mut detector = BeatDetector::default();
        let energy = 120.0;
        let target = 0.8 * energy;

        let mut previous_gap = target;
        for i in 0..200 {
            detector.check(energy, Duration::from_millis(i * 10));
            let gap = (target - detector.threshold()).abs();
            assert!(gap <= previous_gap * 0.9 + 1e-3);
            previous_gap = gap;
        }
        assert!((detector.threshold() - target).abs() < 1e-3);
    }

    #[test]
    fn test_threshold_blocks_quieter_bass() {
        let mut detector = BeatDetector::default();
        for i in 0..100 {
            detector.check(200.0, Duration::from_millis(i * 10));
        }
        // Threshold has settled near 160
        assert!(!detector.check(100.0, Duration::from_secs(5)));
    }
}
