use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use todo_tactician::format::DEFAULT_PATH;
use todo_tactician::menu::Session;
use todo_tactician::{load, selftest};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todo", version, about = "Menu-driven todo list backed by a task document")]
struct Args {
    /// Task document to open; created on first save
    #[arg(default_value = DEFAULT_PATH, conflicts_with = "test")]
    path: PathBuf,
    /// Run the built-in save/load round-trip check and exit
    #[arg(long)]
    test: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    if args.test {
        return Ok(match selftest::run() {
            Ok(count) => {
                println!("Test: round-trip OK ({} items)", count);
                ExitCode::SUCCESS
            }
            Err(e) => {
                println!("Test: round-trip FAILED: {}", e);
                ExitCode::FAILURE
            }
        });
    }

    let store = match load(&args.path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.path.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };
    println!("[Start] Loaded {} tasks from {}", store.len(), args.path.display());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, &args.path, stdin.lock(), stdout.lock());
    session.run().context("terminal I/O failed")?;
    drop(session);

    println!("[End]");
    Ok(ExitCode::SUCCESS)
}
