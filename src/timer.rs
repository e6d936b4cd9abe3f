use std::time::Duration;

use crate::util::format_clock;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// Session stopwatch counting whole seconds while running.
///
/// Ticks of any length can be fed in; time below one second is carried over
/// to the next tick so that `elapsed_seconds` advances once per second of
/// accumulated running time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stopwatch {
    running: bool,
    elapsed_seconds: u64,
    carry: Duration,
}

impl Stopwatch {
    /// Returns true if this call started it; starting a running stopwatch is a no-op.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop and zero, including any partial second.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_seconds = 0;
        self.carry = Duration::ZERO;
    }

    /// Returns true when the displayed second changed.
    pub fn on_tick(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }

        self.carry += elapsed;
        let mut changed = false;
        while self.carry >= ONE_SECOND {
            self.carry -= ONE_SECOND;
            self.elapsed_seconds += 1;
            changed = true;
        }
        changed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn display(&self) -> String {
        format_clock(self.elapsed_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut sw = Stopwatch::default();

        assert!(sw.start());
        assert!(!sw.start());
        assert!(sw.is_running());
    }

    #[test]
    fn test_ticks_ignored_while_stopped() {
        let mut sw = Stopwatch::default();

        assert!(!sw.on_tick(Duration::from_secs(5)));
        assert_eq!(sw.elapsed_seconds(), 0);
    }

    #[test]
    fn test_sub_second_ticks_accumulate() {
        let mut sw = Stopwatch::default();
        sw.start();

        for _ in 0..9 {
            assert!(!sw.on_tick(Duration::from_millis(100)));
        }
        assert!(sw.on_tick(Duration::from_millis(100)));
        assert_eq!(sw.elapsed_seconds(), 1);

        sw.on_tick(Duration::from_millis(2500));
        assert_eq!(sw.elapsed_seconds(), 3);
    }

    #[test]
    fn test_reset_zeroes_and_stops() {
        let mut sw = Stopwatch::default();
        sw.start();
        sw.on_tick(Duration::from_millis(1700));

        sw.reset();
        assert!(!sw.is_running());
        assert_eq!(sw.elapsed_seconds(), 0);

        // carry was discarded too
        sw.start();
        assert!(!sw.on_tick(Duration::from_millis(400)));
        assert_eq!(sw.display(), "00:00");
    }

    #[test]
    fn test_display() {
        let mut sw = Stopwatch::default();
        sw.start();
        sw.on_tick(Duration::from_secs(75));
        assert_eq!(sw.display(), "01:15");
    }
}
