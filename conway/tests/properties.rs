use conway::apg;
use conway::{CellState, DenseGrid, LifeConfig, LifeEngine, Perlin, Rng};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

prop_compose! {
    fn arb_dims()(width in 1u32..24, height in 1u32..24) -> (u32, u32) {
        (width, height)
    }
}

fn noise_engine(width: u32, height: u32, seed: u64) -> LifeEngine {
    let rng = Rng::with_source(16, ChaCha8Rng::seed_from_u64(seed)).unwrap();
    LifeEngine::with_rng(&LifeConfig::new(width, height), rng).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fresh_grid_is_dead_and_bounded((w, h) in arb_dims(), dx in 0i32..5, dy in 0i32..5) {
        let mut grid = DenseGrid::new(w, h, CellState::Dead);
        prop_assert_eq!(grid.len(), (w * h) as usize);
        prop_assert!(grid.iter().all(|(_, s)| *s == CellState::Dead));
        prop_assert!(grid.get(w as i32 + dx, 0).is_err());
        prop_assert!(grid.get(0, h as i32 + dy).is_err());
        prop_assert!(grid.get(-1 - dx, 0).is_err());
        prop_assert!(grid.set(0, -1 - dy, CellState::Alive).is_err());
    }

    #[test]
    fn neighbor_counts_by_region((w, h) in arb_dims(), x in 0i32..24, y in 0i32..24) {
        prop_assume!(x < w as i32 && y < h as i32);
        let grid = DenseGrid::new(w, h, ());
        let on_x_edge = x == 0 || x == w as i32 - 1;
        let on_y_edge = y == 0 || y == h as i32 - 1;
        let count = grid.neighbors(x, y).count();
        if w >= 3 && h >= 3 {
            let expected = match (on_x_edge, on_y_edge) {
                (false, false) => 8,
                (true, true) => 3,
                _ => 5,
            };
            prop_assert_eq!(count, expected);
        } else {
            prop_assert!(count <= 5);
        }
    }

    #[test]
    fn empty_grid_is_a_fixed_point((w, h) in arb_dims()) {
        let mut engine = LifeEngine::new(
            &LifeConfig::new(w.max(10), h.max(10)).with_pattern("xs0_0"),
        ).unwrap();
        let before = engine.grid().clone();
        engine.step();
        prop_assert_eq!(engine.grid(), &before);
    }

    #[test]
    fn step_is_deterministic((w, h) in arb_dims(), seed in any::<u64>()) {
        let mut a = noise_engine(w, h, seed);
        let mut b = a.clone();
        for _ in 0..3 {
            a.step();
            b.step();
        }
        prop_assert_eq!(a.grid(), b.grid());
        prop_assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn decoder_never_panics(body in "[0-9a-z!_]{0,40}") {
        let _ = apg::parse(&body);
    }

    #[test]
    fn column_characters_map_to_single_columns(body in "[0-9a-v]{1,30}") {
        let strips = apg::parse(&body).unwrap();
        prop_assert_eq!(strips.len(), 1);
        prop_assert_eq!(strips[0].len(), body.len());
    }

    #[test]
    fn canonical_noise_is_deterministic(x in -300.0f64..300.0, y in -300.0f64..300.0) {
        let a = Perlin::new();
        let b = Perlin::new();
        prop_assert_eq!(a.noise(x, y).to_bits(), b.noise(x, y).to_bits());
    }
}
