use std::{fs, path::PathBuf};

use anyhow::Context as _;
use rowrise_engine::{BoardSeed, GameSession, RoundConfig};

use self::app::PlayApp;
use crate::tui::Runtime;

mod app;
mod input;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for row generation (32 hex digits); random if omitted
    #[clap(long)]
    pub(crate) seed: Option<BoardSeed>,
    /// Path to a round configuration file (JSON format)
    #[clap(long)]
    pub(crate) config: Option<PathBuf>,
    /// High score carried over from earlier sessions
    #[clap(long, default_value_t = 0)]
    pub(crate) high_score: usize,
    /// Frame rate, overriding the configuration file
    #[clap(long)]
    pub(crate) fps: Option<u32>,
}

fn load_config(arg: &PlayArg) -> anyhow::Result<RoundConfig> {
    let mut config = match &arg.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => RoundConfig::default(),
    };
    if let Some(fps) = arg.fps {
        config.frames_per_second = fps;
    }
    config.validate().context("invalid round configuration")?;
    Ok(config)
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = load_config(arg)?;
    let session = match arg.seed {
        Some(seed) => GameSession::with_seed(config, seed),
        None => GameSession::new(config),
    }
    .context("invalid round configuration")?
    .with_high_score(arg.high_score);

    let mut app = PlayApp::new(session);
    Runtime::new().run(&mut app)?;

    println!("High score: {}", app.high_score());
    Ok(())
}
