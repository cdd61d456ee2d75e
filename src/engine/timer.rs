/// RoundTimer tracks the time remaining to make the next move. It is
/// advisory: expiry is surfaced to the display layer but never blocks a
/// move. The host samples the wall clock cooperatively through `tick`; the
/// timer itself never reads a clock.
#[derive(Debug)]
pub(crate) struct RoundTimer {
    max_millis: u64,
    remaining: u64,
    last_sample: Option<u64>,
}

impl RoundTimer {
    pub(crate) fn new(max_millis: u64) -> Self {
        Self {
            max_millis,
            remaining: max_millis,
            last_sample: None,
        }
    }

    pub(crate) fn remaining(&self) -> u64 {
        self.remaining
    }

    pub(crate) fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Sample the clock. The first sample after a reset only anchors the
    /// timer; subsequent samples subtract the elapsed delta, floored at
    /// zero. A clock that jumps backwards counts as no elapsed time.
    pub(crate) fn tick(&mut self, now_millis: u64) {
        if let Some(last) = self.last_sample {
            let delta = now_millis.saturating_sub(last);
            self.remaining = self.remaining.saturating_sub(delta);
        }
        self.last_sample = Some(now_millis);
    }

    /// Restore the full round duration, as after an accepted move.
    pub(crate) fn reset(&mut self) {
        self.remaining = self.max_millis;
        self.last_sample = None;
    }

    /// Reconfigure the round duration and restart the countdown.
    pub(crate) fn set_max(&mut self, max_millis: u64) {
        self.max_millis = max_millis;
        self.reset();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn first_tick_only_anchors() {
        let mut timer = RoundTimer::new(10_000);
        timer.tick(5_000);
        assert_eq!(timer.remaining(), 10_000);
    }

    #[test]
    fn later_ticks_subtract_elapsed_time() {
        let mut timer = RoundTimer::new(10_000);
        timer.tick(1_000);
        timer.tick(1_400);
        timer.tick(4_000);
        assert_eq!(timer.remaining(), 7_000);
        assert!(!timer.is_expired());
    }

    #[test]
    fn remaining_floors_at_zero() {
        let mut timer = RoundTimer::new(1_000);
        timer.tick(0);
        timer.tick(60_000);
        assert_eq!(timer.remaining(), 0);
        assert!(timer.is_expired());
    }

    #[test]
    fn backwards_clock_is_ignored() {
        let mut timer = RoundTimer::new(10_000);
        timer.tick(5_000);
        timer.tick(4_000);
        assert_eq!(timer.remaining(), 10_000);
    }

    #[test]
    fn reset_restores_the_maximum_and_reanchors() {
        let mut timer = RoundTimer::new(10_000);
        timer.tick(0);
        timer.tick(9_000);
        assert_eq!(timer.remaining(), 1_000);

        timer.reset();
        assert_eq!(timer.remaining(), 10_000);
        // the next sample must not count the time before the reset
        timer.tick(20_000);
        assert_eq!(timer.remaining(), 10_000);
    }

    #[test]
    fn set_max_takes_effect_immediately() {
        let mut timer = RoundTimer::new(10_000);
        timer.tick(0);
        timer.tick(2_000);
        timer.set_max(30_000);
        assert_eq!(timer.remaining(), 30_000);
    }
}
