//! # Retry policy for notification delivery.
//!
//! [`RetryPolicy`] controls how many delivery attempts are made and how long
//! to pause between them. The pause is a **fixed** delay: no growth factor,
//! no jitter. The gateways here simulate their transports, so the policy
//! demonstrates bounded-attempt recovery rather than production backoff
//! shaping.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use notivisor::RetryPolicy;
//!
//! let policy = RetryPolicy::default();
//! assert_eq!(policy.max_attempts, 3);
//! assert_eq!(policy.delay, Duration::from_millis(1000));
//!
//! // max_attempts is clamped to at least one attempt.
//! let at_least_once = RetryPolicy::new(0, Duration::ZERO);
//! assert_eq!(at_least_once.max_attempts, 1);
//! ```

use std::time::Duration;

/// Bounded-attempt, fixed-delay retry policy.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first (always ≥ 1).
    pub max_attempts: u32,
    /// Fixed pause between consecutive attempts.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy, clamping `max_attempts` to at least 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    /// Returns the stock policy: 3 attempts, 1000 ms apart.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_attempts_clamps_to_one() {
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        assert_eq!(policy.max_attempts, 1);
    }

    #[test]
    fn test_explicit_values_kept() {
        let policy = RetryPolicy::new(5, Duration::from_millis(250));
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_default_matches_stock_configuration() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }
}
