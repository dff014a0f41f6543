use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidDbUrl { raw: String },
    MissingFixture,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingFixture => write!(f, "seed requires --fixture <file>"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app select [--db <sqlite_url>] [--input <file>] [--seed <u64>]");
    eprintln!("  app seed   [--db <sqlite_url>] --fixture <file>");
    eprintln!();
    eprintln!("select reads the request JSON from --input, or stdin when omitted,");
    eprintln!("and prints the selected question ids as a JSON array.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_SEED, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select,
    Seed,
}

impl Command {
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "select" => Some(Self::Select),
            "seed" => Some(Self::Seed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectArgs {
    pub db_url: String,
    pub input: Option<PathBuf>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedArgs {
    pub db_url: String,
    pub fixture: PathBuf,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_seed(raw: String) -> Result<u64, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ArgsError::InvalidSeed { raw })
}

fn db_url_value(args: &mut impl Iterator<Item = String>) -> Result<String, ArgsError> {
    let value = require_value(args, "--db")?;
    if value.trim().is_empty() {
        return Err(ArgsError::InvalidDbUrl { raw: value });
    }
    Ok(normalize_sqlite_url(value))
}

fn default_db_url(env: &impl Fn(&str) -> Option<String>) -> String {
    env("QUIZ_DB_URL").map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url)
}

impl SelectArgs {
    pub fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = default_db_url(&env);
        let mut input = None;
        let mut seed = env("QUIZ_SEED").map(parse_seed).transpose()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = db_url_value(args)?,
                "--input" => input = Some(PathBuf::from(require_value(args, "--input")?)),
                "--seed" => seed = Some(parse_seed(require_value(args, "--seed")?)?),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            input,
            seed,
        })
    }
}

impl SeedArgs {
    pub fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = default_db_url(&env);
        let mut fixture = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => db_url = db_url_value(args)?,
                "--fixture" => fixture = Some(PathBuf::from(require_value(args, "--fixture")?)),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            fixture: fixture.ok_or(ArgsError::MissingFixture)?,
        })
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> impl Iterator<Item = String> {
        items
            .iter()
            .map(|s| (*s).to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn select_defaults() {
        let args = SelectArgs::parse(&mut argv(&[]), no_env).unwrap();
        assert_eq!(args.db_url, DEFAULT_DB_URL);
        assert_eq!(args.input, None);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn select_reads_env_then_flags_override() {
        let env = |key: &str| match key {
            "QUIZ_DB_URL" => Some("sqlite::memory:".to_string()),
            "QUIZ_SEED" => Some("7".to_string()),
            _ => None,
        };
        let args = SelectArgs::parse(&mut argv(&[]), env).unwrap();
        assert_eq!(args.db_url, "sqlite::memory:");
        assert_eq!(args.seed, Some(7));

        let args = SelectArgs::parse(&mut argv(&["--seed", "11", "--input", "req.json"]), env)
            .unwrap();
        assert_eq!(args.seed, Some(11));
        assert_eq!(args.input, Some(PathBuf::from("req.json")));
    }

    #[test]
    fn select_rejects_bad_values() {
        assert_eq!(
            SelectArgs::parse(&mut argv(&["--seed", "abc"]), no_env),
            Err(ArgsError::InvalidSeed { raw: "abc".into() })
        );
        assert_eq!(
            SelectArgs::parse(&mut argv(&["--db"]), no_env),
            Err(ArgsError::MissingValue { flag: "--db" })
        );
        assert_eq!(
            SelectArgs::parse(&mut argv(&["--verbose"]), no_env),
            Err(ArgsError::UnknownArg("--verbose".into()))
        );
    }

    #[test]
    fn seed_requires_fixture() {
        assert_eq!(
            SeedArgs::parse(&mut argv(&["--db", "sqlite::memory:"]), no_env),
            Err(ArgsError::MissingFixture)
        );
        let args = SeedArgs::parse(&mut argv(&["--fixture", "bank.json"]), no_env).unwrap();
        assert_eq!(args.fixture, PathBuf::from("bank.json"));
    }

    #[test]
    fn normalizes_relative_paths() {
        let url = normalize_sqlite_url("sqlite:data/quiz.db".into());
        assert!(url.starts_with("sqlite:///") || url.starts_with("sqlite://"));
        assert!(url.ends_with("data/quiz.db"));
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:".into()),
            "sqlite::memory:"
        );
    }
}
