// main.rs - Desktop renderer for the Life engine
// Draws the engine's grid and paces calls to step(); all rules live in the conway crate.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use conway::patterns;
use conway::{LifeConfig, LifeEngine};
use eframe::egui;
use egui::Color32;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod ui; // eframe::App implementation

/// How many recent grid hashes are kept for cycle detection.
const HISTORY_LEN: usize = 10;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML file with [life] and [display] sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Apgcode or catalog pattern name; noise seeding when omitted
    #[arg(short, long)]
    pattern: Option<String>,

    /// Cell size in pixels
    #[arg(long)]
    tile_size: Option<f32>,

    /// Generations per second
    #[arg(long)]
    fps: Option<f32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct DisplayConfig {
    pub tile_size: f32,
    pub fps: f32,
    pub show_grid: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tile_size: 8.0,
            fps: 30.0,
            show_grid: true,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub life: LifeConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    fn load(args: &Args) -> Result<Self> {
        let mut config = match &args.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str::<Self>(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => Self::default(),
        };

        if let Some(width) = args.width {
            config.life.width = width;
        }
        if let Some(height) = args.height {
            config.life.height = height;
        }
        if let Some(pattern) = &args.pattern {
            config.life.pattern = Some(resolve_pattern(pattern));
        }
        if let Some(tile_size) = args.tile_size {
            config.display.tile_size = tile_size;
        }
        if let Some(fps) = args.fps {
            config.display.fps = fps;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.life.validate()?;
        anyhow::ensure!(self.display.tile_size >= 1.0, "Tile size must be at least 1 pixel");
        anyhow::ensure!(self.display.fps > 0.0, "Target FPS must be positive");
        anyhow::ensure!(self.display.fps <= 240.0, "Target FPS too high (max 240)");
        Ok(())
    }
}

/// Catalog names map to their apgcode; anything else is taken as an apgcode.
fn resolve_pattern(text: &str) -> String {
    patterns::find(text)
        .map(|p| p.apgcode.to_string())
        .unwrap_or_else(|| text.to_string())
}

pub struct LifeApp {
    engine: LifeEngine,
    config: LifeConfig,
    pub display: DisplayConfig,
    pub is_running: bool,
    pub last_update: Instant,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub pattern_text: String,
    pub error: Option<String>,
    pub cycle_detected: bool,

    grid_history: [u64; HISTORY_LEN],
    history_count: usize,
}

impl LifeApp {
    fn new(config: AppConfig) -> Result<Self> {
        let engine = LifeEngine::new(&config.life).context("building life engine")?;
        let mut app = Self {
            engine,
            pattern_text: config.life.pattern.clone().unwrap_or_default(),
            config: config.life,
            display: config.display,
            is_running: false,
            last_update: Instant::now(),
            live_color: Color32::BLACK,
            dead_color: Color32::from_rgb(0xee, 0xee, 0xee),
            error: None,
            cycle_detected: false,
            grid_history: [0; HISTORY_LEN],
            history_count: 0,
        };
        app.reset_history();
        Ok(app)
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.display.fps)
    }

    /// Rebuilds the engine from `pattern_text`; an empty field seeds from noise.
    /// On failure the current engine is kept and the error is shown.
    pub fn reload(&mut self) {
        self.is_running = false;
        let text = self.pattern_text.trim();
        self.config.pattern = (!text.is_empty()).then(|| resolve_pattern(text));

        match LifeEngine::new(&self.config) {
            Ok(engine) => {
                info!(
                    pattern = engine.apg().map_or("<noise>", |apg| apg.source()),
                    population = engine.population(),
                    "reloaded"
                );
                self.engine = engine;
                self.error = None;
                self.reset_history();
            }
            Err(e) => {
                error!("Failed to reload: {e}");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Steps once and pauses when the new generation repeats a recent one.
    pub fn advance(&mut self) {
        self.engine.step();
        if self.check_for_cycle() {
            warn!(generation = self.engine.generation(), "cycle detected, pausing");
            self.cycle_detected = true;
            self.is_running = false;
        }
    }

    fn check_for_cycle(&mut self) -> bool {
        let current_hash = self.engine.state_hash();
        let seen = HISTORY_LEN.min(self.history_count);
        if self.grid_history[..seen].contains(&current_hash) {
            return true;
        }
        self.remember(current_hash);
        false
    }

    fn remember(&mut self, hash: u64) {
        self.grid_history[self.history_count % HISTORY_LEN] = hash;
        self.history_count += 1;
    }

    /// Forgets past generations; the current one becomes the first entry.
    fn reset_history(&mut self) {
        self.grid_history = [0; HISTORY_LEN];
        self.history_count = 0;
        self.cycle_detected = false;
        self.remember(self.engine.state_hash());
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = AppConfig::load(&args)?;
    info!(
        width = config.life.width,
        height = config.life.height,
        pattern = config.life.pattern.as_deref().unwrap_or("<noise>"),
        "starting"
    );

    let app = LifeApp::new(config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([800.0, 900.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("window error: {e}"))
}
