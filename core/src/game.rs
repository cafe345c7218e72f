use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Countdown(u8),
    Playing,
    Ended(RoundOutcome),
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Ended(_))
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Everything that belongs to one round, created when play begins.
#[derive(Clone, Debug)]
pub struct RoundState {
    board: Board,
    decay: DecayTimer,
    clock: RoundTimer,
    score: Score,
    taps: u32,
}

impl RoundState {
    fn new(config: &GameConfig, board: Board) -> Self {
        Self {
            board,
            decay: DecayTimer::new(config.max_points, config.decay_tick_ms),
            clock: RoundTimer::new(config.round_secs, config.clock_tick_ms),
            score: 0,
            taps: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn decay(&self) -> &DecayTimer {
        &self.decay
    }

    pub fn clock(&self) -> &RoundTimer {
        &self.clock
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn decay_value(&self) -> Points {
        self.decay.current_value()
    }

    pub fn time_remaining(&self) -> Seconds {
        self.clock.remaining()
    }

    /// Number of taps that scored, including zero-point ones.
    pub fn accepted_taps(&self) -> u32 {
        self.taps
    }
}

/// Round controller: drives the phases, owns the round state and the best score.
///
/// Input arrives through [`Game::start`], [`Game::tap`] and [`Game::tick`]; each call gets the surface to notify
/// and the scheduler that runs its timers.
#[derive(Debug)]
pub struct Game<S> {
    config: GameConfig,
    seed: u64,
    phase: Phase,
    countdown: TimerSlot,
    round: Option<RoundState>,
    best: Score,
    store: S,
}

impl<S: BestScoreStore> Game<S> {
    pub fn new(config: GameConfig, seed: u64, store: S) -> Result<Self> {
        config.validate()?;

        let best = match store.load_best() {
            Ok(best) => best,
            Err(err) => {
                log::warn!("could not load best score, keeping it in memory: {}", err);
                0
            }
        };
        log::debug!("loaded best score: {}", best);

        Ok(Self::with_best(config, seed, store, best))
    }

    fn with_best(config: GameConfig, seed: u64, store: S, best: Score) -> Self {
        Self {
            countdown: TimerSlot::new(TimerKind::Countdown, config.countdown_tick_ms),
            config,
            seed,
            phase: Phase::Idle,
            round: None,
            best,
            store,
        }
    }

    /// Fresh idle game with the same config, store and best score.
    pub fn replay(mut self, seed: u64, scheduler: &mut impl Scheduler) -> Self {
        self.cancel_timers(scheduler);
        Self::with_best(self.config, seed, self.store, self.best)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn best_score(&self) -> Score {
        self.best
    }

    pub fn score(&self) -> Score {
        self.round.as_ref().map_or(0, RoundState::score)
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn start(&mut self, surface: &mut impl Surface, scheduler: &mut impl Scheduler) {
        if self.phase != Phase::Idle {
            log::trace!("start ignored in phase {:?}", self.phase);
            return;
        }

        let count = self.config.countdown_from;
        log::debug!("countdown from {}", count);
        self.set_phase(Phase::Countdown(count), surface);
        surface.countdown_changed(count);
        self.countdown.restart(scheduler);
    }

    pub fn tap(
        &mut self,
        id: CellId,
        surface: &mut impl Surface,
        scheduler: &mut impl Scheduler,
    ) -> TapOutcome {
        if !self.phase.is_playing() {
            log::trace!("tap on {} ignored in phase {:?}", id, self.phase);
            return TapOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return TapOutcome::Ignored;
        };
        if !round.board.is_hot(id) {
            log::trace!("tap on {} ignored, cell is not hot", id);
            return TapOutcome::Ignored;
        }

        let points = round.decay.current_value();
        if let Err(err) = round.board.consume(id) {
            log::warn!("could not consume cell: {}", err);
            return TapOutcome::Ignored;
        }

        if round.clock.start(scheduler) {
            log::debug!("round clock started");
            surface.clock_started();
        }

        round.score += Score::from(points);
        round.taps += 1;
        log::debug!("cell {} scored {}, total {}", id, points, round.score);
        surface.cell_changed(id, CellState::Consumed);
        surface.points_awarded(id, points);
        surface.score_changed(round.score);

        for spawned in round.board.spawn_hot(1) {
            surface.cell_changed(spawned, CellState::Hot);
        }

        round.decay.arm(scheduler);
        surface.decay_changed(round.decay.fraction());

        TapOutcome::Scored(points)
    }

    pub fn tick(
        &mut self,
        handle: TimerHandle,
        surface: &mut impl Surface,
        scheduler: &mut impl Scheduler,
    ) {
        match handle.kind {
            TimerKind::Countdown => self.countdown_tick(handle, surface, scheduler),
            TimerKind::Decay => {
                let Some(round) = self.round.as_mut() else {
                    log::trace!("decay tick without a round");
                    return;
                };
                if round.decay.on_tick(handle, scheduler) {
                    surface.decay_changed(round.decay.fraction());
                } else {
                    log::trace!("stale decay tick {:?}", handle);
                }
            }
            TimerKind::Round => {
                let Some(round) = self.round.as_mut() else {
                    log::trace!("clock tick without a round");
                    return;
                };
                match round.clock.on_tick(handle, scheduler) {
                    Some(ClockTick::Ticked(remaining)) => surface.time_changed(remaining),
                    Some(ClockTick::Expired) => {
                        surface.time_changed(0);
                        self.finish(surface, scheduler);
                    }
                    None => log::trace!("stale clock tick {:?}", handle),
                }
            }
        }
    }

    fn countdown_tick(
        &mut self,
        handle: TimerHandle,
        surface: &mut impl Surface,
        scheduler: &mut impl Scheduler,
    ) {
        let Phase::Countdown(count) = self.phase else {
            log::trace!("countdown tick in phase {:?}", self.phase);
            return;
        };
        if !self.countdown.accepts(handle) {
            log::trace!("stale countdown tick {:?}", handle);
            return;
        }

        match count.saturating_sub(1) {
            0 => {
                self.countdown.stop(scheduler);
                self.begin_round(surface);
            }
            count => {
                self.set_phase(Phase::Countdown(count), surface);
                surface.countdown_changed(count);
            }
        }
    }

    fn begin_round(&mut self, surface: &mut impl Surface) {
        let board = match Board::new(self.config.size, self.config.hot_target, self.seed) {
            Ok(board) => board,
            Err(err) => {
                log::error!("could not create board: {}", err);
                return;
            }
        };
        let mut round = RoundState::new(&self.config, board);

        for id in round.board.spawn_hot(self.config.hot_target) {
            surface.cell_changed(id, CellState::Hot);
        }
        surface.score_changed(0);
        surface.time_changed(round.clock.remaining());
        surface.decay_changed(round.decay.fraction());

        self.round = Some(round);
        log::debug!("round started");
        self.set_phase(Phase::Playing, surface);
    }

    fn finish(&mut self, surface: &mut impl Surface, scheduler: &mut impl Scheduler) {
        self.cancel_timers(scheduler);

        let score = self.score();
        let outcome = if score > self.best {
            self.best = score;
            if let Err(err) = self.store.save_best(score) {
                log::warn!("could not save best score {}: {}", score, err);
            }
            RoundOutcome::NewBest
        } else {
            RoundOutcome::TimeUp
        };
        log::debug!("round ended with {}: {:?}", score, outcome);

        self.set_phase(Phase::Ended(outcome), surface);
        if outcome == RoundOutcome::NewBest {
            surface.best_changed(self.best);
            surface.celebrate();
        }
        surface.round_ended(outcome);
        surface.show_play_again();
    }

    fn cancel_timers(&mut self, scheduler: &mut impl Scheduler) {
        self.countdown.stop(scheduler);
        if let Some(round) = self.round.as_mut() {
            round.decay.cancel(scheduler);
            round.clock.cancel(scheduler);
        }
    }

    fn set_phase(&mut self, phase: Phase, surface: &mut impl Surface) {
        self.phase = phase;
        surface.phase_changed(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::tests::LogScheduler;
    use alloc::vec::Vec;

    #[derive(Default)]
    struct Store {
        best: Option<Score>,
        broken: bool,
    }

    impl BestScoreStore for Store {
        fn load_best(&self) -> Result<Score> {
            if self.broken {
                return Err(GameError::PersistenceUnavailable);
            }
            Ok(self.best.unwrap_or(0))
        }

        fn save_best(&mut self, best: Score) -> Result<()> {
            if self.broken {
                return Err(GameError::PersistenceUnavailable);
            }
            self.best = Some(best);
            Ok(())
        }
    }

    #[derive(Default)]
    struct Changes {
        phases: Vec<Phase>,
        cells: Vec<(CellId, CellState)>,
    }

    impl Surface for Changes {
        fn phase_changed(&mut self, phase: Phase) {
            self.phases.push(phase);
        }
        fn countdown_changed(&mut self, _count: u8) {}
        fn cell_changed(&mut self, id: CellId, state: CellState) {
            self.cells.push((id, state));
        }
        fn score_changed(&mut self, _score: Score) {}
        fn time_changed(&mut self, _remaining: Seconds) {}
        fn decay_changed(&mut self, _fraction: f32) {}
        fn round_ended(&mut self, _outcome: RoundOutcome) {}
        fn best_changed(&mut self, _best: Score) {}
        fn show_play_again(&mut self) {}
    }

    fn playing(store: Store) -> (Game<Store>, Changes, LogScheduler) {
        let mut game = Game::new(GameConfig::default(), 11, store).unwrap();
        let mut surface = Changes::default();
        let mut scheduler = LogScheduler::default();

        game.start(&mut surface, &mut scheduler);
        let (countdown, _) = scheduler.scheduled[0];
        for _ in 0..3 {
            game.tick(countdown, &mut surface, &mut scheduler);
        }
        (game, surface, scheduler)
    }

    fn live(scheduler: &LogScheduler, kind: TimerKind) -> TimerHandle {
        scheduler
            .scheduled
            .iter()
            .rev()
            .map(|&(handle, _)| handle)
            .find(|handle| handle.kind == kind)
            .unwrap()
    }

    #[test]
    fn invalid_config_is_fatal() {
        let config = GameConfig {
            size: (1, 1),
            ..GameConfig::default()
        };

        assert!(matches!(
            Game::new(config, 0, Store::default()),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn countdown_leads_into_playing() {
        let (game, surface, scheduler) = playing(Store::default());

        assert_eq!(
            surface.phases,
            [
                Phase::Countdown(3),
                Phase::Countdown(2),
                Phase::Countdown(1),
                Phase::Playing
            ]
        );
        assert_eq!(game.round().unwrap().board().hot_cells().len(), 3);
        assert_eq!(scheduler.scheduled.len(), 1);
        assert_eq!(scheduler.cancelled.len(), 1);
    }

    #[test]
    fn start_is_one_shot() {
        let (mut game, mut surface, mut scheduler) = playing(Store::default());

        game.start(&mut surface, &mut scheduler);

        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(scheduler.scheduled.len(), 1);
    }

    #[test]
    fn first_tap_starts_clock_and_arms_decay() {
        let (mut game, mut surface, mut scheduler) = playing(Store::default());
        let id = game.round().unwrap().board().hot_cells()[0];

        assert_eq!(
            game.tap(id, &mut surface, &mut scheduler),
            TapOutcome::Scored(10)
        );

        let round = game.round().unwrap();
        assert!(round.clock().is_running());
        assert!(round.decay().is_running());
        assert_eq!(round.board().hot_cells().len(), 3);
        assert_eq!(round.board().consumed_count(), 1);
        assert_eq!(surface.cells.iter().filter(|c| c.1 == CellState::Hot).count(), 4);
    }

    #[test]
    fn taps_outside_playing_are_ignored() {
        let mut game = Game::new(GameConfig::default(), 0, Store::default()).unwrap();
        let mut surface = Changes::default();
        let mut scheduler = LogScheduler::default();

        assert_eq!(
            game.tap(0, &mut surface, &mut scheduler),
            TapOutcome::Ignored
        );
        assert!(surface.cells.is_empty());
        assert!(scheduler.scheduled.is_empty());
    }

    #[test]
    fn unreadable_store_degrades_to_memory() {
        let store = Store {
            best: None,
            broken: true,
        };
        let (mut game, mut surface, mut scheduler) = playing(store);
        let id = game.round().unwrap().board().hot_cells()[0];
        game.tap(id, &mut surface, &mut scheduler);

        let clock = live(&scheduler, TimerKind::Round);
        for _ in 0..10 {
            game.tick(clock, &mut surface, &mut scheduler);
        }

        assert_eq!(game.phase(), Phase::Ended(RoundOutcome::NewBest));
        assert_eq!(game.best_score(), 10);
        assert_eq!(game.store().best, None);
    }

    #[test]
    fn replay_keeps_best_and_restarts_idle() {
        let (mut game, mut surface, mut scheduler) = playing(Store::default());
        let id = game.round().unwrap().board().hot_cells()[0];
        game.tap(id, &mut surface, &mut scheduler);
        let clock = live(&scheduler, TimerKind::Round);
        for _ in 0..10 {
            game.tick(clock, &mut surface, &mut scheduler);
        }

        let game = game.replay(5, &mut scheduler);

        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.best_score(), 10);
        assert_eq!(game.score(), 0);
        assert!(game.round().is_none());
    }
}
