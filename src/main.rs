use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use crossterm::terminal;
use weather::{app::App, location::Location, source::SnapshotFile, terminal::AlternateScreen};

mod logging;

/// Shows a forecast in the terminal. `r` reloads, `q` quits.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// "City", "City, ST" or "City, State, Country"
    #[arg(short, long)]
    location: Location,

    /// One Call JSON payload to display, re-read on every reload
    #[arg(short, long)]
    snapshot: String,

    /// Where the rolling log file goes
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let snapshot_path = shellexpand::full(&args.snapshot)
        .with_context(|| format!("couldn't expand {}", args.snapshot))?
        .into_owned();

    let log_dir = args.log_dir.unwrap_or_else(logging::default_log_dir);
    let logging = logging::init(&log_dir);
    if let Some(logging) = &logging {
        tracing::debug!(log_dir = %logging.log_dir().display(), snapshot = %snapshot_path);
    }

    let _screen = AlternateScreen::new().context("couldn't take over the terminal")?;
    let size = terminal::size().context("couldn't read the terminal size")?;

    let source = Arc::new(SnapshotFile::new(snapshot_path));
    let mut app = App::new(source, args.location, size);

    let mut stdout = BufWriter::new(stdout());
    app.run(&mut stdout)
}
