use rand::Rng;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};

pub const NETWORK_FAILURE_MESSAGE: &str = "Operation failed";

/// Decides whether a simulated write fails.
pub trait FailurePolicy: Send + Sync + fmt::Debug {
    fn should_fail(&self, operation: &str) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct RandomFailure {
    rate: f64,
}

impl RandomFailure {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }
}

impl FailurePolicy for RandomFailure {
    fn should_fail(&self, _operation: &str) -> bool {
        rand::thread_rng().gen_bool(self.rate)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FailurePolicy for NeverFail {
    fn should_fail(&self, _operation: &str) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysFail;

impl FailurePolicy for AlwaysFail {
    fn should_fail(&self, _operation: &str) -> bool {
        true
    }
}

/// Artificial latency before every call plus failure injection on writes.
#[derive(Clone, Debug)]
pub struct NetworkSimulator {
    min_delay: Duration,
    max_delay: Duration,
    policy: Arc<dyn FailurePolicy>,
}

impl NetworkSimulator {
    pub fn new(min_delay: Duration, max_delay: Duration, policy: Arc<dyn FailurePolicy>) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            policy,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Duration::from_millis(config.network_min_delay_ms),
            Duration::from_millis(config.network_max_delay_ms),
            Arc::new(RandomFailure::new(config.network_failure_rate)),
        )
    }

    /// No delay, no failures.
    pub fn instant() -> Self {
        Self::with_policy(Arc::new(NeverFail))
    }

    /// No delay, custom failure policy.
    pub fn with_policy(policy: Arc<dyn FailurePolicy>) -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, policy)
    }

    fn next_delay(&self) -> Duration {
        if self.max_delay.is_zero() {
            return Duration::ZERO;
        }
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }

    pub async fn delay(&self) {
        let delay = self.next_delay();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Latency for a read.
    pub async fn read(&self) {
        self.delay().await;
    }

    /// Latency, then the failure check for a write.
    pub async fn write(&self, operation: &str) -> Result<()> {
        self.delay().await;
        if self.policy.should_fail(operation) {
            tracing::warn!(operation, "Injected network failure");
            return Err(Error::Network(NETWORK_FAILURE_MESSAGE.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn instant_simulator_never_fails() {
        let net = NetworkSimulator::instant();
        for _ in 0..50 {
            assert!(net.write("create job").await.is_ok());
        }
    }

    #[tokio::test]
    async fn always_fail_surfaces_network_error() {
        let net = NetworkSimulator::with_policy(Arc::new(AlwaysFail));
        let err = net.write("create job").await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
        assert_eq!(err.to_string(), "Network error: Operation failed");
    }

    #[test]
    fn random_failure_extremes() {
        assert!(!RandomFailure::new(0.0).should_fail("x"));
        assert!(RandomFailure::new(1.0).should_fail("x"));
        assert!(RandomFailure::new(7.0).should_fail("x"));
    }

    #[test]
    fn delay_stays_in_window() {
        let net = NetworkSimulator::new(
            Duration::from_millis(5),
            Duration::from_millis(10),
            Arc::new(NeverFail),
        );
        for _ in 0..100 {
            let d = net.next_delay();
            assert!(d >= Duration::from_millis(5) && d <= Duration::from_millis(10));
        }
    }
}
