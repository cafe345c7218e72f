use crate::*;

/// Point value on offer for the next scoring tap.
///
/// The value sits at its maximum until the first [`DecayTimer::arm`], then drops by one point per tick until it
/// reaches zero. Arming again restarts the sequence from the maximum.
#[derive(Clone, Debug, PartialEq)]
pub struct DecayTimer {
    value: Points,
    max: Points,
    slot: TimerSlot,
}

impl DecayTimer {
    pub(crate) const fn new(max: Points, tick_ms: u32) -> Self {
        Self {
            value: max,
            max,
            slot: TimerSlot::new(TimerKind::Decay, tick_ms),
        }
    }

    pub fn current_value(&self) -> Points {
        self.value
    }

    pub fn max(&self) -> Points {
        self.max
    }

    /// Remaining share of the maximum, for the decay bar.
    pub fn fraction(&self) -> f32 {
        f32::from(self.value) / f32::from(self.max)
    }

    pub fn is_running(&self) -> bool {
        self.slot.is_live()
    }

    pub(crate) fn arm(&mut self, scheduler: &mut impl Scheduler) {
        self.value = self.max;
        self.slot.restart(scheduler);
    }

    /// Applies one tick. Returns `false` for ticks of a cancelled sequence.
    pub(crate) fn on_tick(&mut self, handle: TimerHandle, scheduler: &mut impl Scheduler) -> bool {
        if !self.slot.accepts(handle) {
            return false;
        }

        self.value = self.value.saturating_sub(1);
        if self.value == 0 {
            self.slot.stop(scheduler);
        }
        true
    }

    pub(crate) fn cancel(&mut self, scheduler: &mut impl Scheduler) {
        self.slot.stop(scheduler);
    }
}
