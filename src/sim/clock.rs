//! Session countdown
//!
//! The clock is ticked by its own periodic trigger, not by frames. Whether a
//! tick is allowed (started, still in progress) is decided by the caller.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    /// Session length in ticks
    pub length: u32,
    /// Ticks left before time runs out
    pub remaining: u32,
    /// Ticks elapsed since start
    pub elapsed: u32,
}

impl Clock {
    pub fn new(length: u32) -> Self {
        Self {
            length,
            remaining: length,
            elapsed: 0,
        }
    }

    /// Count down one unit; saturates at zero
    ///
    /// Returns false if time had already run out.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.elapsed += 1;
        true
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_down_to_zero() {
        let mut clock = Clock::new(3);
        assert!(clock.tick());
        assert_eq!((clock.remaining, clock.elapsed), (2, 1));
        assert!(clock.tick());
        assert!(clock.tick());
        assert!(clock.expired());
        assert_eq!((clock.remaining, clock.elapsed), (0, 3));
    }

    #[test]
    fn test_never_below_zero() {
        let mut clock = Clock::new(1);
        clock.tick();
        assert!(!clock.tick());
        assert_eq!(clock.remaining, 0);
        assert_eq!(clock.elapsed, 1);
    }
}
