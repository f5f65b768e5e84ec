// life.rs - Conway's Game of Life engine

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::RngCore;
use tracing::{debug, trace};

use crate::apg::ApgCode;
use crate::config::LifeConfig;
use crate::error::Result;
use crate::grid::{DenseGrid, Pos};
use crate::noise::{Perlin, Rng};

/// Bit depth of the seeding generator.
const SEED_RNG_BITS: u32 = 16;
/// Noise level a cell must exceed to be considered for seeding.
const NOISE_THRESHOLD: f64 = 0.5;
/// Chance that a cell above the noise threshold comes alive.
const SEED_WEIGHT: f64 = 0.35;
/// Pattern placement is offset this far up and left of the grid center.
const PLACEMENT_MARGIN: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

/// Next state of a cell given its live neighbor count.
pub fn next_state(state: CellState, living: usize) -> CellState {
    match (state, living) {
        (CellState::Alive, 2 | 3) => CellState::Alive, // Survival
        (CellState::Dead, 3)      => CellState::Alive, // Birth
        _                         => CellState::Dead,  // Death or stays dead
    }
}

/// Owns the cell grid and advances it one generation at a time.
///
/// Renderers read the grid through [`LifeEngine::grid`] between calls to
/// [`LifeEngine::step`]; they never write cells.
#[derive(Debug, Clone)]
pub struct LifeEngine {
    grid: DenseGrid<CellState>,
    apg: Option<ApgCode>,
    generation: u64,
}

impl LifeEngine {
    /// Builds an engine seeded from OS entropy when no pattern is configured.
    pub fn new(config: &LifeConfig) -> Result<Self> {
        Self::with_rng(config, Rng::new(SEED_RNG_BITS)?)
    }

    /// Same as [`LifeEngine::new`] with a caller-supplied generator.
    pub fn with_rng<R: RngCore>(config: &LifeConfig, mut rng: Rng<R>) -> Result<Self> {
        config.validate()?;
        let mut grid = DenseGrid::new(config.width, config.height, CellState::Dead);

        let apg = match config.pattern.as_deref() {
            None => {
                seed_from_noise(&mut grid, &mut rng)?;
                None
            }
            Some(code) => {
                let apg = ApgCode::parse(code)?;
                place(&mut grid, &apg)?;
                Some(apg)
            }
        };

        let engine = Self { grid, apg, generation: 0 };
        debug!(
            width = config.width,
            height = config.height,
            pattern = config.pattern.as_deref().unwrap_or("<noise>"),
            population = engine.population(),
            "life engine seeded"
        );
        Ok(engine)
    }

    pub fn grid(&self) -> &DenseGrid<CellState> {
        &self.grid
    }

    /// The parsed pattern, when seeded from one.
    pub fn apg(&self) -> Option<&ApgCode> {
        self.apg.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.grid.iter().filter(|(_, s)| s.is_alive()).count()
    }

    pub fn living_neighbors(&self, x: i32, y: i32) -> usize {
        self.grid.neighbors(x, y).filter(|s| s.is_alive()).count()
    }

    pub fn dead_neighbors(&self, x: i32, y: i32) -> usize {
        self.grid.neighbors(x, y).filter(|s| !s.is_alive()).count()
    }

    /// Advances one generation.
    ///
    /// Every next state is computed from the current generation before any
    /// cell is written, so scan order never affects the result.
    pub fn step(&mut self) {
        let updates: Vec<(usize, CellState)> = self
            .grid
            .iter()
            .filter_map(|(idx, &state)| {
                let Pos { x, y } = self.grid.pos_of(idx);
                let next = next_state(state, self.living_neighbors(x, y));
                (next != state).then_some((idx, next))
            })
            .collect();

        for &(idx, state) in &updates {
            self.grid[idx] = state;
        }
        self.generation += 1;
        trace!(generation = self.generation, changed = updates.len(), "step");
    }

    /// Hash of the cell states, for spotting repeated configurations.
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for (_, state) in self.grid.iter() {
            state.hash(&mut hasher);
        }
        hasher.finish()
    }
}

/// Cells come alive only where the noise is above the threshold AND a
/// weighted coin flip succeeds.
fn seed_from_noise<R: RngCore>(grid: &mut DenseGrid<CellState>, rng: &mut Rng<R>) -> Result<()> {
    let perlin = Perlin::randomized(rng);
    debug!(bits = rng.bits(), "seeding from noise");
    for idx in 0..grid.len() {
        let Pos { x, y } = grid.pos_of(idx);
        if perlin.noise(f64::from(x), f64::from(y)) > NOISE_THRESHOLD
            && rng.random_bool(SEED_WEIGHT)?
        {
            grid[idx] = CellState::Alive;
        }
    }
    Ok(())
}

fn place(grid: &mut DenseGrid<CellState>, apg: &ApgCode) -> Result<()> {
    let origin = Pos::new(
        (grid.width() / 2) as i32 - PLACEMENT_MARGIN,
        (grid.height() / 2) as i32 - PLACEMENT_MARGIN,
    );
    for (pos, state) in apg.iter() {
        grid.set(origin.x + pos.x, origin.y + pos.y, state)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConwayError;
    use crate::grid::GridError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn alive_cells(engine: &LifeEngine) -> Vec<Pos> {
        engine
            .grid()
            .iter_coords()
            .filter(|(_, s)| s.is_alive())
            .map(|(p, _)| p)
            .collect()
    }

    fn seeded_rng(seed: u64) -> Rng<ChaCha8Rng> {
        Rng::with_source(SEED_RNG_BITS, ChaCha8Rng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn rule_table() {
        use CellState::{Alive, Dead};
        for n in 0..=8 {
            let survive = if n == 2 || n == 3 { Alive } else { Dead };
            let birth = if n == 3 { Alive } else { Dead };
            assert_eq!(next_state(Alive, n), survive, "alive with {n}");
            assert_eq!(next_state(Dead, n), birth, "dead with {n}");
        }
    }

    #[test]
    fn pattern_is_placed_off_center() {
        let config = LifeConfig::new(20, 20).with_pattern("xq4_153");
        let engine = LifeEngine::new(&config).unwrap();
        // origin is (20/2 - 5, 20/2 - 5)
        let mut alive = alive_cells(&engine);
        alive.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            alive,
            vec![
                Pos::new(5, 5),
                Pos::new(6, 5),
                Pos::new(7, 5),
                Pos::new(7, 6),
                Pos::new(6, 7),
            ]
        );
        assert_eq!(engine.apg().map(|a| a.period()), Some(4));
    }

    #[test]
    fn placement_outside_grid_fails() {
        let config = LifeConfig::new(6, 6).with_pattern("xq4_153");
        let err = LifeEngine::new(&config).unwrap_err();
        assert!(matches!(err, ConwayError::Grid(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn bad_pattern_fails_construction() {
        let config = LifeConfig::new(20, 20).with_pattern("xq4_15!");
        assert!(matches!(LifeEngine::new(&config), Err(ConwayError::Apg(_))));
    }

    #[test]
    fn zero_size_config_fails() {
        assert!(matches!(
            LifeEngine::new(&LifeConfig::new(0, 5)),
            Err(ConwayError::Config(_))
        ));
    }

    #[test]
    fn blinker_oscillates() {
        let config = LifeConfig::new(16, 16).with_pattern("xp2_7");
        let mut engine = LifeEngine::new(&config).unwrap();
        let start = alive_cells(&engine);
        engine.step();
        let mid = alive_cells(&engine);
        assert_ne!(start, mid);
        assert_eq!(mid.len(), 3);
        engine.step();
        assert_eq!(alive_cells(&engine), start);
        assert_eq!(engine.generation(), 2);
    }

    #[test]
    fn block_is_still() {
        let config = LifeConfig::new(16, 16).with_pattern("xs4_33");
        let mut engine = LifeEngine::new(&config).unwrap();
        let hash = engine.state_hash();
        engine.step();
        assert_eq!(engine.state_hash(), hash);
        assert_eq!(engine.population(), 4);
    }

    #[test]
    fn neighbor_counts() {
        let config = LifeConfig::new(16, 16).with_pattern("xs4_33");
        let engine = LifeEngine::new(&config).unwrap();
        // block occupies (3, 3), (4, 3), (3, 4), (4, 4)
        assert_eq!(engine.living_neighbors(3, 3), 3);
        assert_eq!(engine.dead_neighbors(3, 3), 5);
        assert_eq!(engine.living_neighbors(0, 0), 0);
        assert_eq!(engine.dead_neighbors(0, 0), 3);
    }

    #[test]
    fn noise_seeding_is_reproducible_and_sparse() {
        let config = LifeConfig::new(48, 32);
        let a = LifeEngine::with_rng(&config, seeded_rng(11)).unwrap();
        let b = LifeEngine::with_rng(&config, seeded_rng(11)).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert!(a.apg().is_none());
        // noise passes roughly half the cells, the coin keeps about a third of those
        let population = a.population();
        assert!(population > 0);
        assert!(population < a.grid().len() / 2);
    }
}
