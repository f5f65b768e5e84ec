use conway::patterns::PATTERNS;
use conway::{CellState, LifeConfig, LifeEngine, Pos};

fn alive(engine: &LifeEngine) -> Vec<Pos> {
    engine
        .grid()
        .iter_coords()
        .filter(|(_, s)| **s == CellState::Alive)
        .map(|(p, _)| p)
        .collect()
}

fn shifted(cells: &[Pos], dx: i32, dy: i32) -> Vec<Pos> {
    let mut out: Vec<Pos> = cells.iter().map(|p| p.offset(dx, dy)).collect();
    out.sort_by_key(|p| (p.y, p.x));
    out
}

#[test]
fn glider_translates_after_one_period() {
    let config = LifeConfig::new(32, 32).with_pattern("xq4_153");
    let mut engine = LifeEngine::new(&config).unwrap();
    let start = alive(&engine);
    assert_eq!(start.len(), 5);

    let period = engine.apg().map(|a| a.period()).unwrap();
    assert_eq!(period, 4);
    for _ in 0..period {
        engine.step();
    }

    assert_eq!(alive(&engine), shifted(&start, 1, -1));
    assert_eq!(engine.generation(), 4);
}

#[test]
fn glider_keeps_travelling() {
    let config = LifeConfig::new(32, 32).with_pattern("xq4_153");
    let mut engine = LifeEngine::new(&config).unwrap();
    let start = alive(&engine);
    for _ in 0..12 {
        engine.step();
    }
    assert_eq!(alive(&engine), shifted(&start, 3, -3));
}

#[test]
fn catalog_patterns_repeat_their_shape() {
    for pattern in PATTERNS {
        let config = LifeConfig::new(48, 48).with_pattern(pattern.apgcode);
        let mut engine = LifeEngine::new(&config).unwrap();
        let start = alive(&engine);
        let period = engine.apg().map(|a| a.period()).unwrap();
        for _ in 0..period {
            engine.step();
        }
        let end = alive(&engine);
        assert_eq!(end.len(), start.len(), "{} changed population", pattern.name);

        let (dx, dy) = (end[0].x - start[0].x, end[0].y - start[0].y);
        assert_eq!(end, shifted(&start, dx, dy), "{} changed shape", pattern.name);
    }
}
