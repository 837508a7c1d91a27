//! Real-time millisecond source for hosts that run on wall clock.

use web_time::Instant;

/// Monotonic ms counter from an arbitrary origin.
///
/// Tests and replays use literal timestamps instead; this is for live hosts
/// that need to stamp touch and scroll events as they arrive. Backed by
/// `web-time` so the same code runs on wasm.
pub struct HostClock {
    origin: Instant,
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Milliseconds elapsed since this clock was created.
    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_monotonic() {
        let clock = HostClock::new();
        let first = clock.now_ms();
        let second = clock.now_ms();
        assert!(second >= first);
    }
}
