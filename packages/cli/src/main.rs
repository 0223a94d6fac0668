use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use nu_ansi_term::Color;

use docfs_cli::{execute, Command};
use docfs_store::{ConsoleLogger, Driver, Level, Options};

/// docfs - read and write records in a docfs store
#[derive(Parser, Debug)]
#[command(name = "docfs")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Store root directory (defaults to $DOCFS_ROOT, then the current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Console log threshold: fatal, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

fn root_dir(args: &Args) -> PathBuf {
    args.root
        .clone()
        .or_else(|| std::env::var_os("DOCFS_ROOT").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("./"))
}

fn main() {
    let args = Args::parse();

    let options = Options::new().logger(Arc::new(ConsoleLogger::new(args.log_level)));

    let result = Driver::open(root_dir(&args), options)
        .map_err(docfs_cli::CommandError::from)
        .and_then(|db| {
            let stdout = std::io::stdout();
            execute(&args.command, &db, &mut stdout.lock())
        });

    if let Err(e) = result {
        eprintln!("{} {}", Color::Red.bold().paint("Error:"), e);
        std::process::exit(1);
    }
}
