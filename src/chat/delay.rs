use std::time::Duration;

use rand::Rng;

/// Default typing pause range, tuned to feel like a short human reply.
pub const DEFAULT_MIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_MAX_DELAY_MS: u64 = 3000;

/// Half-open range of milliseconds the simulated typing pause is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayBounds {
    pub min_ms: u64,
    /// Exclusive upper bound.
    pub max_ms: u64,
}

impl Default for DelayBounds {
    fn default() -> Self {
        Self {
            min_ms: DEFAULT_MIN_DELAY_MS,
            max_ms: DEFAULT_MAX_DELAY_MS,
        }
    }
}

impl DelayBounds {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms, max_ms }
    }

    /// Fixed pause, for demos and deterministic tests.
    pub fn fixed(ms: u64) -> Self {
        Self { min_ms: ms, max_ms: ms }
    }

    /// Draws a pause uniformly from `[min_ms, max_ms)`.
    ///
    /// A degenerate range (`max_ms <= min_ms`) yields exactly `min_ms` rather
    /// than handing `gen_range` an empty interval.
    pub fn sample(&self, rng: &mut impl Rng) -> Duration {
        let ms = if self.max_ms <= self.min_ms {
            self.min_ms
        } else {
            rng.gen_range(self.min_ms..self.max_ms)
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_bounds() {
        let bounds = DelayBounds::default();
        assert_eq!(bounds.min_ms, 1000);
        assert_eq!(bounds.max_ms, 3000);
    }

    #[test]
    fn test_sample_stays_in_half_open_range() {
        let bounds = DelayBounds::new(1000, 3000);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let pause = bounds.sample(&mut rng);
            assert!(pause >= Duration::from_millis(1000));
            assert!(pause < Duration::from_millis(3000));
        }
    }

    #[test]
    fn test_degenerate_range_yields_min() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(
            DelayBounds::fixed(1500).sample(&mut rng),
            Duration::from_millis(1500)
        );
        // Inverted bounds also collapse to min instead of panicking.
        assert_eq!(
            DelayBounds::new(2000, 100).sample(&mut rng),
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn test_zero_delay_is_allowed() {
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(DelayBounds::fixed(0).sample(&mut rng), Duration::ZERO);
    }
}
