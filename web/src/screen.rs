use tapgrid_core::{
    CellId, CellState, GameConfig, Phase, Points, RoundOutcome, Score, Seconds, Surface,
};

/// Everything the view renders, kept current by the game's notifications.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Screen {
    pub phase: Phase,
    pub countdown: u8,
    pub cells: Vec<CellState>,
    pub flashes: Vec<Option<Points>>,
    pub score: Score,
    pub time: Seconds,
    pub decay: f32,
    pub best: Score,
    pub outcome: Option<RoundOutcome>,
    pub play_again: bool,
    pub hint_visible: bool,
    celebration_pending: bool,
}

impl Screen {
    pub(crate) fn new(config: &GameConfig, best: Score) -> Self {
        let cells = usize::from(config.total_cells());
        Self {
            phase: Phase::Idle,
            countdown: config.countdown_from,
            cells: vec![CellState::Idle; cells],
            flashes: vec![None; cells],
            score: 0,
            time: config.round_secs,
            decay: 1.0,
            best,
            outcome: None,
            play_again: false,
            hint_visible: true,
            celebration_pending: false,
        }
    }

    pub(crate) fn is_locked(&self) -> bool {
        !self.phase.is_playing()
    }

    /// Returns `true` once per new best score.
    pub(crate) fn take_celebration(&mut self) -> bool {
        std::mem::take(&mut self.celebration_pending)
    }
}

impl Surface for Screen {
    fn phase_changed(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn countdown_changed(&mut self, count: u8) {
        self.countdown = count;
    }

    fn cell_changed(&mut self, id: CellId, state: CellState) {
        let id = usize::from(id);
        if let Some(cell) = self.cells.get_mut(id) {
            *cell = state;
        }
        if state == CellState::Hot {
            if let Some(flash) = self.flashes.get_mut(id) {
                *flash = None;
            }
        }
    }

    fn score_changed(&mut self, score: Score) {
        self.score = score;
    }

    fn time_changed(&mut self, remaining: Seconds) {
        self.time = remaining;
    }

    fn decay_changed(&mut self, fraction: f32) {
        self.decay = fraction.clamp(0.0, 1.0);
    }

    fn round_ended(&mut self, outcome: RoundOutcome) {
        self.outcome = Some(outcome);
    }

    fn best_changed(&mut self, best: Score) {
        self.best = best;
    }

    fn show_play_again(&mut self) {
        self.play_again = true;
    }

    fn points_awarded(&mut self, id: CellId, points: Points) {
        if let Some(flash) = self.flashes.get_mut(usize::from(id)) {
            *flash = Some(points);
        }
    }

    fn clock_started(&mut self) {
        self.hint_visible = false;
    }

    fn celebrate(&mut self) {
        self.celebration_pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Screen {
        Screen::new(&GameConfig::default(), 7)
    }

    #[test]
    fn starts_idle_with_full_clock() {
        let screen = screen();

        assert_eq!(screen.cells.len(), 16);
        assert_eq!(screen.time, 10);
        assert_eq!(screen.best, 7);
        assert!(screen.is_locked());
        assert!(screen.hint_visible);
    }

    #[test]
    fn awarded_points_flash_until_cell_turns_hot_again() {
        let mut screen = screen();

        screen.cell_changed(3, CellState::Consumed);
        screen.points_awarded(3, 8);
        assert_eq!(screen.flashes[3], Some(8));

        screen.cell_changed(3, CellState::Hot);
        assert_eq!(screen.flashes[3], None);
        assert_eq!(screen.cells[3], CellState::Hot);
    }

    #[test]
    fn out_of_range_cells_are_ignored() {
        let mut screen = screen();
        let before = screen.clone();

        screen.cell_changed(99, CellState::Hot);
        screen.points_awarded(99, 10);

        assert_eq!(screen, before);
    }

    #[test]
    fn celebration_is_taken_once() {
        let mut screen = screen();

        screen.celebrate();

        assert!(screen.take_celebration());
        assert!(!screen.take_celebration());
    }

    #[test]
    fn playing_unlocks_and_end_locks() {
        let mut screen = screen();

        screen.phase_changed(Phase::Playing);
        assert!(!screen.is_locked());

        screen.phase_changed(Phase::Ended(RoundOutcome::TimeUp));
        screen.round_ended(RoundOutcome::TimeUp);
        screen.show_play_again();
        assert!(screen.is_locked());
        assert!(screen.play_again);
    }
}
