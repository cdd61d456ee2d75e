use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use rand::thread_rng;

mod engine;
mod error;
mod scores;
mod slide48;

use engine::session::GameSession;
use engine::spawn::Difficulty;
use scores::JsonScoreStore;
use slide48::Slide48;

#[derive(Parser)]
#[command(about = "a 2048-style merge puzzle in the terminal")]
struct Cli {
    /// Board side length.
    #[arg(long, default_value_t = 4)]
    size: usize,

    /// Difficulty label: easy, normal, or hard.
    #[arg(long, default_value = "normal")]
    difficulty: String,

    /// Per-move round timer in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    round_ms: u64,

    /// Total match duration in milliseconds, shown as a progress readout.
    #[arg(long, default_value_t = 600_000)]
    match_ms: u64,

    /// Score history file.
    #[arg(long, default_value = "scores.json")]
    scores: PathBuf,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(cli.verbose.log_level_filter())
        .chain(fern::log_file("./slide48.log")?)
        .apply()?;

    // malformed configuration keeps the defaults rather than erroring
    let size = if cli.size < 2 {
        log::warn!("ignoring board size {}, using 4", cli.size);
        4
    } else {
        cli.size
    };
    let round_ms = if cli.round_ms == 0 {
        log::warn!("ignoring zero round duration, using 10000ms");
        10_000
    } else {
        cli.round_ms
    };
    let match_ms = if cli.match_ms == 0 {
        log::warn!("ignoring zero match duration, using 600000ms");
        600_000
    } else {
        cli.match_ms
    };

    let session = GameSession::new(
        thread_rng(),
        size,
        Difficulty::from_label(&cli.difficulty),
        round_ms,
    );
    let store = JsonScoreStore::new(cli.scores);
    if let Some(best) = store.load_all().first() {
        log::info!("best recorded score so far: {} ({})", best.points, best.label);
    }

    let app = Slide48::new(session, store, round_ms, Duration::from_millis(match_ms));
    app.run(stdout().lock())?;

    Ok(())
}
