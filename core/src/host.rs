use crate::*;

/// Runs periodic ticks on behalf of the controller.
///
/// Every tick of a scheduled sequence must be delivered back through [`Game::tick`] with the same handle until the
/// sequence is cancelled.
pub trait Scheduler {
    fn schedule(&mut self, handle: TimerHandle, period_ms: u32);
    fn cancel(&mut self, handle: TimerHandle);
}

/// Receives every player-visible change. Rendering is entirely up to the implementor.
pub trait Surface {
    fn phase_changed(&mut self, phase: Phase);
    fn countdown_changed(&mut self, count: u8);
    fn cell_changed(&mut self, id: CellId, state: CellState);
    fn score_changed(&mut self, score: Score);
    fn time_changed(&mut self, remaining: Seconds);
    /// Share of the maximum still on offer, in `0.0..=1.0`.
    fn decay_changed(&mut self, fraction: f32);
    fn round_ended(&mut self, outcome: RoundOutcome);
    fn best_changed(&mut self, best: Score);
    fn show_play_again(&mut self);

    fn points_awarded(&mut self, _id: CellId, _points: Points) {}

    /// The first scoring tap started the round clock.
    fn clock_started(&mut self) {}

    /// Decorative effect for a new best score.
    fn celebrate(&mut self) {}
}

/// Persistence for the single best-score value.
pub trait BestScoreStore {
    /// Missing values are `Ok(0)`; unreadable storage is [`GameError::PersistenceUnavailable`].
    fn load_best(&self) -> Result<Score>;
    fn save_best(&mut self, best: Score) -> Result<()>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for &mut T {
    fn load_best(&self) -> Result<Score> {
        (**self).load_best()
    }

    fn save_best(&mut self, best: Score) -> Result<()> {
        (**self).save_best(best)
    }
}
