//! Guards for overlapping async UI requests.

/// Numbers each load so a late reply from an older load can be dropped.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

impl Generation {
    /// Begin a new load; returns its ticket.
    pub fn start(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }

    /// Whether `ticket` belongs to the most recent load.
    pub fn is_current(&self, ticket: u64) -> bool {
        self.0 == ticket
    }
}

/// Rejects an action repeated within `min_gap_ms` of the last accepted one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    min_gap_ms: f64,
    last_ms: Option<f64>,
}

impl Throttle {
    pub fn new(min_gap_ms: f64) -> Self {
        Self {
            min_gap_ms,
            last_ms: None,
        }
    }

    /// Record an attempt at `now_ms`. Rejected attempts do not restart the
    /// window.
    pub fn allow(&mut self, now_ms: f64) -> bool {
        if self.last_ms.is_some_and(|last| now_ms - last < self.min_gap_ms) {
            return false;
        }
        self.last_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_generation_is_current() {
        let mut generation = Generation::default();
        let show_all = generation.start();
        let search = generation.start();

        assert!(!generation.is_current(show_all));
        assert!(generation.is_current(search));
    }

    #[test]
    fn test_throttle_window() {
        let mut throttle = Throttle::new(300.0);
        assert!(throttle.allow(1_000.0));
        assert!(!throttle.allow(1_299.0));
        assert!(!throttle.allow(1_150.0));
        assert!(throttle.allow(1_300.0));
        assert!(!throttle.allow(1_400.0));
    }
}
