use std::future::Future;
use std::time::Duration;

use crate::config::Config;

/// Fixed-delay retry: up to `max_attempts` tries, waiting `delay` between two
/// consecutive tries. No wait before the first try or after the last one.
///
/// The policy is a plain value. All per-call state lives inside [`RetryPolicy::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

/// Returned by [`RetryPolicy::run`] when every attempt failed.
#[derive(Debug)]
pub struct Exhausted<E> {
    pub attempts: u32,
    /// The error from the final attempt.
    pub last: E,
}

impl RetryPolicy {
    /// A zero attempt count is raised to 1, so the operation always runs at least once.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), delay }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_attempts, config.retry_delay)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait before the given 1-based attempt.
    #[inline]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 { Duration::ZERO } else { self.delay }
    }

    /// Total time spent waiting when every attempt fails.
    pub fn worst_case_wait(&self) -> Duration {
        (1..=self.max_attempts).map(|attempt| self.delay_before(attempt)).sum()
    }

    /// Runs `op` until it succeeds or the attempt budget is spent.
    ///
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, Exhausted<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 1;
        loop {
            let wait = self.delay_before(attempt);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(last) if attempt >= self.max_attempts => {
                    return Err(Exhausted { attempts: attempt, last });
                }
                Err(_) => attempt += 1,
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
