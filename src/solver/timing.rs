/// Running min / average / max of per-round stencil times, in seconds.
/// Round 0 is warm up and is skipped, unless it is the only round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingStats {
    iterations: usize,
    samples: usize,
    total: f64,
    min: f64,
    max: f64,
}

impl TimingStats {
    pub fn new(iterations: usize) -> Self {
        TimingStats {
            iterations,
            samples: 0,
            total: 0.0,
            min: f64::MAX,
            max: 0.0,
        }
    }

    /// Returns whether the sample was kept.
    pub fn record(&mut self, round: usize, seconds: f64) -> bool {
        if round == 0 && self.iterations > 1 {
            return false;
        }
        self.samples += 1;
        self.total += seconds;
        self.min = self.min.min(seconds);
        self.max = self.max.max(seconds);
        true
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Total over `max(iterations - 1, 1)`.
    pub fn average(&self) -> f64 {
        self.total / (self.iterations.saturating_sub(1).max(1) as f64)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn warm_up_is_skipped() {
        let mut t = TimingStats::new(4);
        assert!(!t.record(0, 100.0));
        assert!(t.record(1, 1.0));
        assert!(t.record(2, 3.0));
        assert!(t.record(3, 2.0));
        assert_eq!(t.samples(), 3);
        assert_approx_eq!(f64, t.min(), 1.0);
        assert_approx_eq!(f64, t.max(), 3.0);
        assert_approx_eq!(f64, t.average(), 2.0);
    }

    #[test]
    fn single_round_is_kept() {
        let mut t = TimingStats::new(1);
        assert!(t.record(0, 0.5));
        assert_eq!(t.samples(), 1);
        assert_approx_eq!(f64, t.min(), 0.5);
        assert_approx_eq!(f64, t.max(), 0.5);
        assert_approx_eq!(f64, t.average(), 0.5);
    }
}
