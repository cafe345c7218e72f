use serde::{Deserialize, Serialize};

use crate::Scheduler;

/// The periodic sequences a round can have pending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerKind {
    Countdown,
    Decay,
    Round,
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [Self::Countdown, Self::Decay, Self::Round];

    pub const fn index(self) -> usize {
        match self {
            Self::Countdown => 0,
            Self::Decay => 1,
            Self::Round => 2,
        }
    }
}

/// Identifies one started sequence. Ticks carrying an older generation belong to a cancelled sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    pub kind: TimerKind,
    pub generation: u32,
}

/// Owner of at most one live periodic sequence of a given kind.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TimerSlot {
    kind: TimerKind,
    period_ms: u32,
    generation: u32,
    live: Option<TimerHandle>,
}

impl TimerSlot {
    pub(crate) const fn new(kind: TimerKind, period_ms: u32) -> Self {
        Self {
            kind,
            period_ms,
            generation: 0,
            live: None,
        }
    }

    /// Cancels the live sequence, if any, then schedules a fresh one.
    pub(crate) fn restart(&mut self, scheduler: &mut impl Scheduler) -> TimerHandle {
        self.stop(scheduler);
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle {
            kind: self.kind,
            generation: self.generation,
        };
        scheduler.schedule(handle, self.period_ms);
        self.live = Some(handle);
        handle
    }

    pub(crate) fn stop(&mut self, scheduler: &mut impl Scheduler) {
        if let Some(handle) = self.live.take() {
            scheduler.cancel(handle);
        }
    }

    pub(crate) fn accepts(&self, handle: TimerHandle) -> bool {
        self.live == Some(handle)
    }

    pub(crate) fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[derive(Default)]
    pub(crate) struct LogScheduler {
        pub scheduled: Vec<(TimerHandle, u32)>,
        pub cancelled: Vec<TimerHandle>,
    }

    impl Scheduler for LogScheduler {
        fn schedule(&mut self, handle: TimerHandle, period_ms: u32) {
            self.scheduled.push((handle, period_ms));
        }

        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn restart_cancels_previous_sequence() {
        let mut scheduler = LogScheduler::default();
        let mut slot = TimerSlot::new(TimerKind::Decay, 100);

        let first = slot.restart(&mut scheduler);
        let second = slot.restart(&mut scheduler);

        assert_ne!(first, second);
        assert_eq!(scheduler.scheduled, [(first, 100), (second, 100)]);
        assert_eq!(scheduler.cancelled, [first]);
        assert!(!slot.accepts(first));
        assert!(slot.accepts(second));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut scheduler = LogScheduler::default();
        let mut slot = TimerSlot::new(TimerKind::Round, 1000);

        let handle = slot.restart(&mut scheduler);
        slot.stop(&mut scheduler);
        slot.stop(&mut scheduler);

        assert_eq!(scheduler.cancelled, [handle]);
        assert!(!slot.is_live());
        assert!(!slot.accepts(handle));
    }
}
