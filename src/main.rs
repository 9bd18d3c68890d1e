//! Overclock entry point
//!
//! Native builds run the core headless in idle (autopilot) mode: useful for
//! soak testing tuning files and checking seeds reproduce.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use overclock::audio::{AudioManager, LogSink};
    use overclock::consts::MAX_FRAME_DT;
    use overclock::sim::{GamePhase, GameState, TickInput, tick};
    use overclock::{Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "overclock")]
    #[command(about = "Run the Overclock core headless with the autopilot at the controls")]
    struct Cli {
        /// Run seed
        #[arg(long, default_value_t = 0xC0FFEE)]
        seed: u64,
        /// Frames to simulate
        #[arg(long, default_value_t = 3_600)]
        frames: u64,
        /// Tuning overrides (JSON)
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Player settings (JSON)
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Nominal host frame rate; frame times jitter around it
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print the full final snapshot instead of the summary
        #[arg(long)]
        full: bool,
    }

    fn load_tuning(path: &Path) -> Result<Tuning> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("invalid tuning in {}", path.display()))
    }

    fn load_settings(path: &Path) -> Result<Settings> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        Settings::from_json(&json).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        if !(cli.fps.is_finite() && cli.fps > 0.0) {
            bail!("--fps must be positive, got {}", cli.fps);
        }

        let tuning = match &cli.tuning {
            Some(path) => load_tuning(path)?,
            None => Tuning::default(),
        };
        let settings = match &cli.settings {
            Some(path) => load_settings(path)?,
            None => Settings::default(),
        };

        log::info!("Overclock (headless) seed {:#x}, {} frames", cli.seed, cli.frames);

        let mut state = GameState::with_tuning(cli.seed, tuning);
        state.apply_settings(&settings);
        let mut audio = AudioManager::new(Some(Box::new(LogSink::default())));
        audio.apply_settings(&settings);

        // Host clock noise is separate from the run seed's simulation stream
        let mut clock = Pcg32::seed_from_u64(cli.seed.rotate_left(17));
        let nominal = 1.0 / cli.fps;
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut last_phase = state.phase;
        let mut sectors_cleared = 0u32;
        let mut deaths = 0u32;
        for _ in 0..cli.frames {
            let dt = (nominal * clock.random_range(0.8..1.25)).min(MAX_FRAME_DT);
            tick(&mut state, &input, dt);
            audio.play_events(&state.drain_events());

            if state.phase != last_phase {
                match state.phase {
                    GamePhase::SectorClear => sectors_cleared += 1,
                    GamePhase::GameOver => deaths += 1,
                    _ => {}
                }
                last_phase = state.phase;
            }
        }

        log::info!(
            "Done: {} sectors cleared, {} game overs, high score {}",
            sectors_cleared,
            deaths,
            state.high_score
        );

        let snapshot = state.snapshot();
        let json = if cli.full {
            serde_json::to_string_pretty(&snapshot)?
        } else {
            serde_json::to_string_pretty(&snapshot.summary())?
        };
        println!("{json}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives the library directly
}
