use ndarray::Array2;
use rand::prelude::*;
use smallvec::SmallVec;

use crate::*;

/// Cells a single spawn call turned hot.
pub type Spawned = SmallVec<[CellId; 4]>;

/// Grid of cells for one round, together with the set of currently hot cells.
#[derive(Clone, Debug)]
pub struct Board {
    cells: Array2<CellState>,
    size: Coord2,
    hot: SmallVec<[CellId; 4]>,
    rng: SmallRng,
}

impl Board {
    /// Creates an all-idle board of `size`, refusing boards that cannot hold `hot_target` hot cells.
    pub fn new(size: Coord2, hot_target: CellCount, seed: u64) -> Result<Self> {
        let total = mult(size.0, size.1);
        if total == 0 || total < hot_target {
            return Err(GameError::InvalidConfig("board is smaller than the hot cell target"));
        }

        Ok(Self {
            cells: Array2::default(size.to_nd_index()),
            size,
            hot: SmallVec::new(),
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn cell_at(&self, id: CellId) -> Option<CellState> {
        self.nd_index(id).map(|index| self.cells[index])
    }

    pub fn is_hot(&self, id: CellId) -> bool {
        self.cell_at(id).is_some_and(CellState::is_hot)
    }

    pub fn hot_cells(&self) -> &[CellId] {
        &self.hot
    }

    pub fn idle_count(&self) -> CellCount {
        self.count(CellState::Idle)
    }

    pub fn consumed_count(&self) -> CellCount {
        self.count(CellState::Consumed)
    }

    /// Turns up to `count` idle cells hot, picked uniformly among the idle cells left.
    pub fn spawn_hot(&mut self, count: CellCount) -> Spawned {
        let mut idle: SmallVec<[CellId; 16]> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_idle())
            .map(|(id, _)| id as CellId)
            .collect();

        if idle.len() < usize::from(count) {
            log::debug!(
                "only {} idle cells left, requested {} hot cells",
                idle.len(),
                count
            );
        }

        let mut spawned = Spawned::new();
        while spawned.len() < usize::from(count) && !idle.is_empty() {
            let pick = self.rng.gen_range(0..idle.len());
            let id = idle.swap_remove(pick);
            self.set(id, CellState::Hot);
            self.hot.push(id);
            spawned.push(id);
        }
        spawned
    }

    pub fn consume(&mut self, id: CellId) -> Result<()> {
        if !self.is_hot(id) {
            return Err(GameError::InvalidState(id));
        }

        self.set(id, CellState::Consumed);
        self.hot.retain(|&mut hot| hot != id);
        Ok(())
    }

    fn count(&self, state: CellState) -> CellCount {
        self.cells.iter().filter(|&&cell| cell == state).count() as CellCount
    }

    fn set(&mut self, id: CellId, state: CellState) {
        if let Some(index) = self.nd_index(id) {
            self.cells[index] = state;
        }
    }

    fn nd_index(&self, id: CellId) -> Option<[usize; 2]> {
        let cols = CellId::from(self.size.0);
        (id < self.total_cells()).then(|| [usize::from(id / cols), usize::from(id % cols)])
    }
}
