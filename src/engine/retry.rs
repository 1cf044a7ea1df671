use std::time::Duration;

use rand::Rng;

/// What happens to a payment both processors refused
///
/// The default retries forever with no delay, so a payment stays eligible
/// for redispatch until some processor accepts it. A non-zero `base_delay`
/// turns on capped exponential backoff with jitter; `max_attempts` bounds
/// the number of dispatch cycles before the payment is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            base_delay: Duration::ZERO,
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Whether a payment that has failed `failed_cycles` full cycles may go round again
    pub fn allows_retry(&self, failed_cycles: u32) -> bool {
        self.max_attempts.is_none_or(|max| failed_cycles < max)
    }

    /// Upper bound of the delay before requeueing after `failed_cycles` failures:
    /// `min(base * 2^(failed_cycles - 1), max_delay)`
    pub fn ceiling(&self, failed_cycles: u32) -> Duration {
        if self.base_delay.is_zero() || failed_cycles == 0 {
            return Duration::ZERO;
        }

        let factor = 1u32
            .checked_shl(failed_cycles - 1)
            .unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Jittered delay in `[ceiling / 2, ceiling]`
    pub fn backoff(&self, failed_cycles: u32) -> Duration {
        let ceiling = self.ceiling(failed_cycles);
        if ceiling.is_zero() {
            return ceiling;
        }
        ceiling.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
    }
}
