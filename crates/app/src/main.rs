use std::io::Read;

use quiz_core::model::SelectionInput;
use services::{Entropy, QuestionSelector, SelectionError};
use storage::fixture::SeedFixture;
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

mod args;

use args::{ArgsError, Command, SeedArgs, SelectArgs, print_usage};

fn init_tracing() {
    // stdout carries the JSON result; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_input(args: &SelectArgs) -> Result<String, std::io::Error> {
    match &args.input {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

async fn select(args: SelectArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(&args)?;
    let input = SelectionInput::from_json(&raw).map_err(SelectionError::from)?;

    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let entropy = args.seed.map_or(Entropy::Thread, Entropy::seeded);
    let selector = QuestionSelector::from_storage(entropy, &storage);

    let ids = selector.select_from_input(input).await?;
    println!("{}", serde_json::to_string(&ids)?);
    Ok(())
}

async fn seed(args: SeedArgs) -> Result<(), Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(&args.fixture)?;
    let fixture: SeedFixture = serde_json::from_str(&raw)?;

    prepare_sqlite_file(&args.db_url)?;
    let storage = Storage::sqlite(&args.db_url).await?;
    let report = storage.seed(&fixture).await?;
    tracing::info!(
        db = %args.db_url,
        questions = report.questions,
        attempts = report.attempts,
        "seeded question bank"
    );
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: select when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Select,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Select,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let env = |key: &str| std::env::var(key).ok();
    let mut iter = argv.into_iter();
    let report_usage = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };

    match cmd {
        Command::Select => select(SelectArgs::parse(&mut iter, env).map_err(report_usage)?).await,
        Command::Seed => seed(SeedArgs::parse(&mut iter, env).map_err(report_usage)?).await,
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
