//! Trailing-edge debouncing on an explicit clock

use std::time::Duration;

/// Fires once `wait` has elapsed since the last trigger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    pub fn from_millis(wait_ms: u64) -> Self {
        Self::new(Duration::from_millis(wait_ms))
    }

    /// Restart the wait from `now`
    pub fn trigger(&mut self, now: Duration) {
        self.deadline = Some(now + self.wait);
    }

    /// Returns true exactly once per burst, when the deadline has passed
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let mut debouncer = Debouncer::from_millis(250);
        assert!(!debouncer.poll(ms(1000)));

        debouncer.trigger(ms(0));
        debouncer.trigger(ms(200));
        assert!(!debouncer.poll(ms(400)));
        assert!(debouncer.poll(ms(450)));
        assert!(!debouncer.poll(ms(900)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::from_millis(100);
        debouncer.trigger(ms(0));
        debouncer.cancel();
        assert!(!debouncer.poll(ms(500)));
    }
}
