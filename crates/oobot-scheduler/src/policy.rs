//! Delay policy — the pure math behind the adaptive schedule.
//!
//! An idle channel waits up to 72 hours between ambient sends. Every
//! qualifying message shrinks the wait geometrically (`delay ^ 0.9`), so a
//! busy channel pulls the agent in without the delay ever reaching zero, and
//! every firing resets the channel back to the ceiling.

use rand::Rng;

/// Floor for a channel's delay, in seconds.
pub const MIN_DELAY_SECS: u64 = 1;
/// Ceiling for a channel's delay: 72 hours.
pub const MAX_DELAY_SECS: u64 = 72 * 60 * 60;
/// Exponent applied on every observed activity event.
pub const DECAY_EXPONENT: f64 = 0.9;

/// Randomize a delay into `[max(MIN, current / 2), current)`. An empty
/// interval (current ≤ 2·MIN) collapses to MIN.
pub fn jitter(current: u64) -> u64 {
    let lo = (current / 2).max(MIN_DELAY_SECS);
    if lo >= current {
        return MIN_DELAY_SECS;
    }
    rand::thread_rng().gen_range(lo..current)
}

/// Shrink a delay after observed activity: `floor(current ^ 0.9)`, never
/// below MIN.
pub fn decay(current: u64) -> u64 {
    let decayed = (current as f64).powf(DECAY_EXPONENT).floor() as u64;
    decayed.max(MIN_DELAY_SECS)
}

/// The delay a channel returns to after every firing.
pub fn reset() -> u64 {
    MAX_DELAY_SECS
}

/// Render a delay as `"2d 5h 3m 20s"` for scheduling logs.
pub fn describe(secs: u64) -> String {
    let (m, s) = (secs / 60, secs % 60);
    let (h, m) = (m / 60, m % 60);
    let (d, h) = (h / 24, h % 24);
    format!("{d}d {h}h {m}m {s}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_exact_chain_from_max() {
        // floor(x ^ 0.9) applied repeatedly from the 72h ceiling.
        let expected = [
            259_200, 74_519, 24_268, 8_841, 3_563, 1_572, 753, 388, 213, 124, 76, 49, 33,
            23, 16, 12, 9, 7, 5, 4, 3, 2, 1, 1,
        ];
        let mut current = MAX_DELAY_SECS;
        for window in expected.windows(2) {
            assert_eq!(current, window[0]);
            current = decay(current);
            assert_eq!(current, window[1]);
        }
    }

    #[test]
    fn test_decay_bounds() {
        for current in [1, 2, 3, 100, 4_096, 86_400, MAX_DELAY_SECS] {
            let decayed = decay(current);
            assert!(decayed >= MIN_DELAY_SECS);
            assert!(decayed <= current, "decay({current}) grew to {decayed}");
        }
    }

    #[test]
    fn test_decay_never_below_min() {
        assert_eq!(decay(1), MIN_DELAY_SECS);
        assert_eq!(decay(2), MIN_DELAY_SECS);
    }

    #[test]
    fn test_jitter_in_range() {
        for current in [3, 10, 100, 40_149, MAX_DELAY_SECS] {
            let lo = (current / 2).max(MIN_DELAY_SECS);
            for _ in 0..200 {
                let drawn = jitter(current);
                assert!(drawn >= lo, "jitter({current}) = {drawn} below {lo}");
                assert!(drawn < current, "jitter({current}) = {drawn} not below bound");
            }
        }
    }

    #[test]
    fn test_jitter_collapses_to_min() {
        assert_eq!(jitter(1), MIN_DELAY_SECS);
        assert_eq!(jitter(2), MIN_DELAY_SECS);
    }

    #[test]
    fn test_reset_is_ceiling() {
        assert_eq!(reset(), MAX_DELAY_SECS);
        assert_eq!(MAX_DELAY_SECS, 259_200);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(0), "0d 0h 0m 0s");
        assert_eq!(describe(59), "0d 0h 0m 59s");
        assert_eq!(describe(3_661), "0d 1h 1m 1s");
        assert_eq!(describe(MAX_DELAY_SECS), "3d 0h 0m 0s");
    }
}
