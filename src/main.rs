use anyhow::{Context, Result};
use clap::Parser;
use flappy_duo::terminal::TerminalDevice;
use flappy_duo::{FramePacer, Game, GameRng, Params, Switches, run};
use log::{LevelFilter, info};
use std::fs::File;
use std::path::PathBuf;

/// Flappy Bird for one or two players. Number keys flip the difficulty
/// switches while playing.
#[derive(Parser)]
#[command(name = "flappy-duo", version, about)]
struct Cli {
    /// Initial switch bank (decimal, 0x hex or 0b binary)
    #[arg(short, long, default_value = "0", value_parser = parse_bits)]
    switches: u32,

    /// Seed for obstacle gaps; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per second
    #[arg(long, default_value_t = Params::DEFAULT_FPS)]
    fps: u32,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_bits(s: &str) -> Result<u32, String> {
    let parsed = if let Some(hex) = s.strip_prefix("0x") {
        u32::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        u32::from_str_radix(bin, 2)
    } else {
        s.parse()
    };
    let bits = parsed.map_err(|e| format!("invalid switch bank {s:?}: {e}"))?;
    if bits >= 1 << Switches::COUNT {
        return Err(format!("switch bank {s:?} has bits above SW{}", Switches::COUNT - 1));
    }
    Ok(bits)
}

fn init_logging(cli: &Cli) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    // The terminal is ours while playing: stay quiet on stderr unless asked.
    let default = if cli.verbose {
        LevelFilter::Debug
    } else if cli.log_file.is_some() {
        LevelFilter::Info
    } else {
        LevelFilter::Off
    };
    builder.filter_level(default).parse_default_env();

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let rng = match cli.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let mut device = TerminalDevice::open(Switches(cli.switches))
        .context("failed to bring up the terminal display")?;
    let mut game = Game::new(device.switches(), rng);
    let pacer = FramePacer::from_fps(cli.fps);

    let result = run(&mut game, &mut device, &pacer);
    device.close().context("failed to restore the terminal")?;

    let frames = result.context("game loop aborted")?;
    info!("exited after {frames} frames");
    let round = &game.world().round;
    println!(
        "High scores: P1 {}, P2 {}",
        round.high_scores[0], round.high_scores[1]
    );
    Ok(())
}
