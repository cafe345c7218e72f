use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockTick {
    Ticked(Seconds),
    Expired,
}

/// Round countdown in whole seconds, started once per round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundTimer {
    remaining: Seconds,
    started: bool,
    slot: TimerSlot,
}

impl RoundTimer {
    pub(crate) const fn new(duration: Seconds, tick_ms: u32) -> Self {
        Self {
            remaining: duration,
            started: false,
            slot: TimerSlot::new(TimerKind::Round, tick_ms),
        }
    }

    pub fn remaining(&self) -> Seconds {
        self.remaining
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_live()
    }

    /// Starts the clock. Returns `false` if it was already started this round.
    pub(crate) fn start(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.slot.restart(scheduler);
        true
    }

    /// Applies one tick. Expiry is reported exactly once, after which the sequence is stopped.
    pub(crate) fn on_tick(
        &mut self,
        handle: TimerHandle,
        scheduler: &mut impl Scheduler,
    ) -> Option<ClockTick> {
        if !self.slot.accepts(handle) {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.slot.stop(scheduler);
            Some(ClockTick::Expired)
        } else {
            Some(ClockTick::Ticked(self.remaining))
        }
    }

    pub(crate) fn cancel(&mut self, scheduler: &mut impl Scheduler) {
        self.slot.stop(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::tests::LogScheduler;

    #[test]
    fn expires_once_after_full_duration() {
        let mut scheduler = LogScheduler::default();
        let mut timer = RoundTimer::new(10, 1000);
        assert!(timer.start(&mut scheduler));
        let (handle, period) = scheduler.scheduled[0];
        assert_eq!(period, 1000);

        for expected in (1..10).rev() {
            assert_eq!(
                timer.on_tick(handle, &mut scheduler),
                Some(ClockTick::Ticked(expected))
            );
        }
        assert_eq!(
            timer.on_tick(handle, &mut scheduler),
            Some(ClockTick::Expired)
        );

        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_running());
        assert_eq!(timer.on_tick(handle, &mut scheduler), None);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn start_only_once() {
        let mut scheduler = LogScheduler::default();
        let mut timer = RoundTimer::new(10, 1000);

        assert!(timer.start(&mut scheduler));
        assert!(!timer.start(&mut scheduler));
        assert_eq!(scheduler.scheduled.len(), 1);
        assert!(scheduler.cancelled.is_empty());
    }

    #[test]
    fn unstarted_timer_ignores_ticks() {
        let mut scheduler = LogScheduler::default();
        let mut timer = RoundTimer::new(10, 1000);
        let stray = TimerHandle {
            kind: TimerKind::Round,
            generation: 1,
        };

        assert_eq!(timer.on_tick(stray, &mut scheduler), None);
        assert_eq!(timer.remaining(), 10);
    }
}
