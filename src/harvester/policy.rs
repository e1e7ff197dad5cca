use crate::config::{Backoff, HarvestConfig};
use crate::harvester::HarvestError;
use rand::Rng;
use std::time::Duration;

/// How the harvester paces and retries calls to the portal.
///
/// Every attempt, including the first, is preceded by a sleep. With `Fixed`
/// backoff that sleep is always `delay`; with `Exponential` it doubles per attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestPolicy {
    pub delay: Duration,
    /// Total attempts per call, at least one.
    pub max_attempts: u32,
    pub backoff: Backoff,
    pub jitter: Duration,
}

impl RequestPolicy {
    pub fn from_config(cfg: &HarvestConfig) -> Self {
        Self {
            delay: Duration::from_millis(cfg.delay_ms),
            max_attempts: cfg.max_retries.max(1),
            backoff: cfg.backoff,
            jitter: Duration::from_millis(cfg.jitter_ms),
        }
    }

    /// No sleeping at all. Used by tests.
    #[cfg(test)]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            delay: Duration::ZERO,
            max_attempts,
            backoff: Backoff::Fixed,
            jitter: Duration::ZERO,
        }
    }

    /// Sleep before attempt number `attempt` (1-based), excluding jitter.
    pub fn wait_before(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                self.delay.saturating_mul(factor)
            }
        }
    }

    fn pause(&self, attempt: u32) {
        let mut wait = self.wait_before(attempt);
        if !self.jitter.is_zero() {
            let extra = rand::thread_rng().gen_range(0..=self.jitter.as_millis() as u64);
            wait += Duration::from_millis(extra);
        }
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
    }

    /// Runs `op` until it succeeds or attempts run out, returning the last error.
    pub fn run<T, F>(&self, what: &str, mut op: F) -> Result<T, HarvestError>
    where
        F: FnMut() -> Result<T, HarvestError>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_err = None;

        for attempt in 1..=attempts {
            self.pause(attempt);
            match op() {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::warn!("⚠️ {what} failed (attempt {attempt}/{attempts}): {e}");
                    last_err = Some(e);
                }
            }
        }

        Err(last_err.unwrap_or_else(|| HarvestError::Network(format!("{what}: retry loop failed"))))
    }
}
