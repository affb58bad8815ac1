use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use snake_sim::{Episode, EvoTrainer, SimConfig, TrainerConfig, run_episode};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RunConfig {
    sim: SimConfig,
    trainer: TrainerConfig,
}

fn load_config() -> Result<RunConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(RunConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let cfg: RunConfig = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    cfg.sim.validate()?;
    Ok(cfg)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = load_config()?;
    info!(
        "grid {}x{}, population {}, {} generations",
        cfg.sim.grid_size, cfg.sim.grid_size, cfg.trainer.population, cfg.trainer.generations
    );

    let seed = cfg.trainer.seed;
    let mut trainer = EvoTrainer::new(cfg.sim.clone(), cfg.trainer)?;
    let mut best = trainer.run()?.clone();
    info!("best total fitness {:.1}", trainer.best_fitness());

    // Replay the winner once and show where it ended.
    let mut episode = Episode::seeded(cfg.sim, seed)?;
    let t = run_episode(&mut best, &mut episode);
    info!("replay: {:?} after {} ticks, length {}", t.reason, t.ticks, t.length);
    println!("{}", episode.snapshot());
    println!("{}", serde_json::to_string_pretty(&best)?);
    Ok(())
}
