//! Delay policies for character pacing.
//!
//! The engine never draws randomness itself; it asks a [`DelayPolicy`] for
//! each pause, so tests can substitute a seeded or zero-delay policy.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound of the extra pause inserted after a whitespace character.
///
/// Fixed and independent of the per-character bounds.
pub const WHITESPACE_PAUSE_MAX: Duration = Duration::from_millis(6);

/// Source of per-character and whitespace pauses.
pub trait DelayPolicy: Send {
    /// Delay before revealing one character, within `[min, max]` inclusive.
    fn char_delay(&mut self, min: Duration, max: Duration) -> Duration;

    /// Extra pause after a whitespace character, within `[0, WHITESPACE_PAUSE_MAX]`.
    fn whitespace_delay(&mut self) -> Duration;
}

/// Uniformly random delays at millisecond granularity.
#[derive(Debug, Clone)]
pub struct RandomDelay {
    rng: StdRng,
}

impl RandomDelay {
    /// Seed from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic policy for reproducible pacing.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn millis_between(&mut self, min: Duration, max: Duration) -> Duration {
        let (lo, hi) = ordered_millis(min, max);
        if lo == hi {
            return Duration::from_millis(lo);
        }
        Duration::from_millis(self.rng.random_range(lo..=hi))
    }
}

impl Default for RandomDelay {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl DelayPolicy for RandomDelay {
    fn char_delay(&mut self, min: Duration, max: Duration) -> Duration {
        self.millis_between(min, max)
    }

    fn whitespace_delay(&mut self) -> Duration {
        self.millis_between(Duration::ZERO, WHITESPACE_PAUSE_MAX)
    }
}

/// Policy that never pauses. Useful for instant rendering and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl DelayPolicy for NoDelay {
    fn char_delay(&mut self, _min: Duration, _max: Duration) -> Duration {
        Duration::ZERO
    }

    fn whitespace_delay(&mut self) -> Duration {
        Duration::ZERO
    }
}

/// Policy that always uses the lower bound and a fixed whitespace pause.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedDelay {
    pub whitespace: Duration,
}

impl DelayPolicy for FixedDelay {
    fn char_delay(&mut self, min: Duration, max: Duration) -> Duration {
        min.min(max)
    }

    fn whitespace_delay(&mut self) -> Duration {
        self.whitespace.min(WHITESPACE_PAUSE_MAX)
    }
}

/// Millisecond bounds in ascending order.
fn ordered_millis(a: Duration, b: Duration) -> (u64, u64) {
    let a = a.as_millis() as u64;
    let b = b.as_millis() as u64;
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_delay_within_bounds() {
        let mut policy = RandomDelay::seeded(7);
        let min = Duration::from_millis(2);
        let max = Duration::from_millis(9);
        for _ in 0..500 {
            let d = policy.char_delay(min, max);
            assert!(d >= min && d <= max, "{:?} out of range", d);
        }
    }

    #[test]
    fn test_random_delay_reversed_bounds() {
        let mut policy = RandomDelay::seeded(1);
        for _ in 0..100 {
            let d = policy.char_delay(Duration::from_millis(5), Duration::from_millis(1));
            assert!(d >= Duration::from_millis(1) && d <= Duration::from_millis(5));
        }
    }

    #[test]
    fn test_random_delay_hits_both_bounds() {
        let mut policy = RandomDelay::seeded(42);
        let samples: Vec<_> = (0..1000)
            .map(|_| policy.char_delay(Duration::ZERO, Duration::from_millis(3)))
            .collect();
        assert!(samples.contains(&Duration::ZERO));
        assert!(samples.contains(&Duration::from_millis(3)));
    }

    #[test]
    fn test_seeded_policies_repeat() {
        let mut a = RandomDelay::seeded(99);
        let mut b = RandomDelay::seeded(99);
        for _ in 0..50 {
            assert_eq!(
                a.char_delay(Duration::ZERO, Duration::from_millis(20)),
                b.char_delay(Duration::ZERO, Duration::from_millis(20))
            );
            assert_eq!(a.whitespace_delay(), b.whitespace_delay());
        }
    }

    #[test]
    fn test_whitespace_delay_bounded() {
        let mut policy = RandomDelay::seeded(3);
        for _ in 0..500 {
            assert!(policy.whitespace_delay() <= WHITESPACE_PAUSE_MAX);
        }
    }

    #[test]
    fn test_fixed_delay() {
        let mut policy = FixedDelay {
            whitespace: Duration::from_millis(50),
        };
        assert_eq!(
            policy.char_delay(Duration::from_millis(4), Duration::from_millis(8)),
            Duration::from_millis(4)
        );
        assert_eq!(policy.whitespace_delay(), WHITESPACE_PAUSE_MAX);
    }
}
