mod logging;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use course_core::ProgressSnapshot;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, CatalogService, CatalogSource, ProgressAggregator, ProgressStore};
use ui::{App, UiApp, build_app_context};

use crate::logging::{LogFormat, LoggingConfig};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidLogFormat { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidLogFormat { raw } => {
                write!(f, "invalid --log-format value: {raw} (expected pretty or json)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn progress_store(&self) -> Arc<ProgressStore> {
        self.services.progress_store()
    }

    fn aggregator(&self) -> Arc<ProgressAggregator> {
        self.services.aggregator()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui       [options]");
    eprintln!("  cargo run -p app -- progress [options] [--json]");
    eprintln!("  cargo run -p app -- reset    [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>        default sqlite://dev.sqlite3");
    eprintln!("  --catalog <path>         default: bundled catalog");
    eprintln!("  --log-level <level>      default info");
    eprintln!("  --log-format <format>    pretty | json");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSE_DB_URL, COURSE_CATALOG, COURSE_LOG_LEVEL, COURSE_LOG_FORMAT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Progress,
    Reset,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "progress" => Some(Self::Progress),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    db_url: String,
    catalog: CatalogSource,
    logging: LoggingConfig,
    json: bool,
}

impl Args {
    fn from_env() -> Result<Self, ArgsError> {
        let db_url = std::env::var("COURSE_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://dev.sqlite3".into(), normalize_sqlite_url);
        let catalog = std::env::var("COURSE_CATALOG")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or(CatalogSource::Bundled, |path| {
                CatalogSource::File(PathBuf::from(path))
            });
        let mut logging = LoggingConfig::default();
        if let Ok(level) = std::env::var("COURSE_LOG_LEVEL") {
            logging.level = level;
        }
        if let Ok(raw) = std::env::var("COURSE_LOG_FORMAT") {
            logging.format =
                LogFormat::parse(&raw).ok_or(ArgsError::InvalidLogFormat { raw })?;
        }

        Ok(Self {
            db_url,
            catalog,
            logging,
            json: false,
        })
    }

    fn parse(cmd: Command, args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::from_env()?;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    parsed.catalog = CatalogSource::File(PathBuf::from(value));
                }
                "--log-level" => {
                    parsed.logging.level = require_value(args, "--log-level")?;
                }
                "--log-format" => {
                    let raw = require_value(args, "--log-format")?;
                    parsed.logging.format =
                        LogFormat::parse(&raw).ok_or(ArgsError::InvalidLogFormat { raw })?;
                }
                "--json" if cmd == Command::Progress => parsed.json = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
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

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(cmd, &mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    parsed.logging.init();
    tracing::info!(command = ?cmd, db = %parsed.db_url, "starting");

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, &parsed.catalog).await?;

    match cmd {
        Command::Ui => {
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Learn")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Progress => print_progress(&services, parsed.json).await,
        Command::Reset => {
            if services.progress_store().reset().await {
                println!("progress reset");
                Ok(())
            } else {
                Err(std::io::Error::other("failed to reset progress").into())
            }
        }
    }
}

async fn print_progress(
    services: &AppServices,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = services.catalog();
    let aggregator = services.aggregator();

    let mut report = Vec::with_capacity(catalog.courses().len());
    for course in catalog.courses() {
        report.push((course, aggregator.course_overview(course).await));
    }

    if json {
        let value: serde_json::Map<String, serde_json::Value> = report
            .iter()
            .map(|(course, progress)| {
                serde_json::to_value(progress).map(|value| (course.id().to_string(), value))
            })
            .collect::<Result<_, _>>()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for (course, progress) in &report {
        println!("{} {}", course.title(), snapshot_line(progress.course));
        for module in course.modules() {
            println!(
                "  {} {}",
                module.title(),
                snapshot_line(progress.module(module.id()))
            );
        }
    }
    Ok(())
}

fn snapshot_line(snapshot: ProgressSnapshot) -> String {
    format!(
        "{}/{} ({}%)",
        snapshot.completed, snapshot.total, snapshot.percentage
    )
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
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
