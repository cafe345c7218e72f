use crate::game::{GameView, Msg};
use gloo::timers::callback::Interval;
use tapgrid_core::{Scheduler, TimerHandle, TimerKind};
use yew::html::Scope;

/// [`Scheduler`] backed by browser intervals that post [`Msg::Tick`] to the game view.
///
/// Holds at most one interval per [`TimerKind`]; replacing or dropping an interval cancels it.
pub(crate) struct IntervalScheduler {
    link: Scope<GameView>,
    live: [Option<(TimerHandle, Interval)>; TimerKind::ALL.len()],
}

impl IntervalScheduler {
    pub(crate) fn new(link: Scope<GameView>) -> Self {
        Self {
            link,
            live: Default::default(),
        }
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, handle: TimerHandle, period_ms: u32) {
        let link = self.link.clone();
        let interval = Interval::new(period_ms, move || link.send_message(Msg::Tick(handle)));
        if let Some((previous, _)) = self.live[handle.kind.index()].replace((handle, interval)) {
            log::warn!("{:?} replaced without cancel", previous);
        }
    }

    fn cancel(&mut self, handle: TimerHandle) {
        let slot = &mut self.live[handle.kind.index()];
        if slot.as_ref().is_some_and(|(live, _)| *live == handle) {
            drop(slot.take());
        }
    }
}

impl std::fmt::Debug for IntervalScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let live: Vec<_> = self.live.iter().flatten().map(|(handle, _)| handle).collect();
        f.debug_struct("IntervalScheduler").field("live", &live).finish()
    }
}
