//! # Global pool configuration.
//!
//! Provides [`Config`] centralized settings for the dispatch pool.
//!
//! ## Sentinel values
//! - `pool_size = 0` → clamped to 1 (the pool is always bounded)
//! - `max_attempts = 0` → clamped to 1 (every notification gets one attempt)
//! - `bus_capacity` → clamped to a minimum of 1 by the bus

use std::time::Duration;

use crate::policies::RetryPolicy;

/// Global configuration for the dispatch pool.
///
/// Defines:
/// - **Concurrency**: fixed worker ceiling for deliveries
/// - **Retry defaults**: attempts and fixed delay applied to every dispatch
/// - **Event system**: bus capacity for event delivery
/// - **Drain behavior**: grace period for [`DispatchPool::join`](crate::DispatchPool::join)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of deliveries executing concurrently.
    ///
    /// Submissions beyond this queue up (the queue is unbounded); they are
    /// never rejected for capacity.
    pub pool_size: usize,

    /// Total delivery attempts per notification, including the first.
    pub max_attempts: u32,

    /// Fixed pause between consecutive attempts of one notification.
    pub retry_delay: Duration,

    /// Capacity of the event bus broadcast ring buffer.
    ///
    /// Slow receivers that lag behind more than `bus_capacity` events will
    /// observe `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Maximum time [`join`](crate::DispatchPool::join) waits for in-flight
    /// deliveries before reporting them stuck.
    pub grace: Duration,
}

impl Config {
    /// Returns the worker ceiling, clamped to at least 1.
    #[inline]
    pub fn pool_size_clamped(&self) -> usize {
        self.pool_size.max(1)
    }

    /// Returns the retry policy workers apply to every dispatch.
    #[inline]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, self.retry_delay)
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `pool_size = 10`
    /// - `max_attempts = 3`
    /// - `retry_delay = 1000ms`
    /// - `bus_capacity = 1024`
    /// - `grace = 30s`
    fn default() -> Self {
        Self {
            pool_size: 10,
            max_attempts: 3,
            retry_delay: Duration::from_millis(1000),
            bus_capacity: 1024,
            grace: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_reproduce_stock_pipeline() {
        let cfg = Config::default();
        assert_eq!(cfg.pool_size, 10);
        assert_eq!(cfg.max_attempts, 3);
        assert_eq!(cfg.retry_delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_pool_size_zero_clamps_to_one() {
        let cfg = Config {
            pool_size: 0,
            ..Config::default()
        };
        assert_eq!(cfg.pool_size_clamped(), 1);
    }

    #[test]
    fn test_retry_policy_inherits_config() {
        let cfg = Config {
            max_attempts: 5,
            retry_delay: Duration::from_millis(50),
            ..Config::default()
        };
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_millis(50));
    }
}
