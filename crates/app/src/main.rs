use std::fmt;
use std::io::{self, BufRead};
use std::sync::Arc;

use chrono::{Local, Timelike};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use azkar_core::model::Category;
use services::{AppServices, ProgressService};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCategory { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --category value: {raw}"),
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

struct Args {
    db_url: String,
    category: Option<Category>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--category <morning|evening>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:azkar.sqlite3");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  AZKAR_DB_URL, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("AZKAR_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://azkar.sqlite3".into(), normalize_sqlite_url);
        let mut category = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    let parsed = value
                        .parse::<Category>()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                    category = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { db_url, category })
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
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
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

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "app=info,services=info,storage=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Category the screen opens on, by local hour.
///
/// Night runs from 18:00 to 06:00; that window suggests the evening list,
/// everything else the morning one.
fn default_category(hour: u32) -> Category {
    if hour >= 18 || hour < 6 {
        Category::Evening
    } else {
        Category::Morning
    }
}

fn category_glyph(category: Category) -> &'static str {
    match category {
        Category::Morning => "☀",
        Category::Evening => "☾",
    }
}

fn category_title(category: Category) -> &'static str {
    match category {
        Category::Morning => "أذكار الصباح",
        Category::Evening => "أذكار المساء",
    }
}

fn render_overview(progress: &ProgressService, suggested: Category) {
    println!();
    println!("أذكار الصباح والمساء");
    for category in Category::ALL {
        let view = progress.progress_view(category);
        let marker = if category == suggested { ">" } else { " " };
        println!(
            "{marker} {} {}  {:.0}% ({}/{})",
            category_glyph(category),
            category_title(category),
            view.fraction * 100.0,
            view.completed,
            view.total,
        );
    }
    println!();
    println!("commands: morning | evening | reset | quit");
}

fn render_category(progress: &ProgressService, category: Category) {
    let view = progress.progress_view(category);
    println!();
    println!(
        "{} {}  {:.0}%",
        category_glyph(category),
        category_title(category),
        view.fraction * 100.0,
    );
    for (index, item) in progress.catalog().items(category).iter().enumerate() {
        let remaining = progress.get_remaining(item.id());
        if remaining == 0 {
            println!("{:>3}. [✓] {}", index + 1, item.text());
        } else {
            println!("{:>3}. [{remaining}] {}", index + 1, item.text());
        }
    }
    println!();
    println!("commands: <number> | back | reset | quit");
}

fn handle_tap(progress: &ProgressService, category: Category, index: usize) {
    let items = progress.catalog().items(category);
    let Some(item) = index.checked_sub(1).and_then(|i| items.get(i)) else {
        println!("no item {index} in this list");
        return;
    };

    if progress.is_completed(item.id()) {
        println!("already completed");
        return;
    }

    let remaining = progress.decrement(item.id());
    if remaining == 0 {
        println!("✓ completed");
    } else {
        println!("{remaining} left");
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so
    // core/services stay pure.
    prepare_sqlite_file(&args.db_url)?;
    let services = AppServices::new_sqlite(&args.db_url).await?;
    let progress: Arc<ProgressService> = services.progress();
    tracing::info!(db_url = %args.db_url, "storage ready");

    let suggested = default_category(Local::now().hour());
    let mut current = args.category;
    match current {
        Some(category) => render_category(&progress, category),
        None => render_overview(&progress, suggested),
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        match (current, input) {
            (_, "quit" | "q") => break,
            (_, "reset") => {
                progress.reset();
                match current {
                    Some(category) => render_category(&progress, category),
                    None => render_overview(&progress, suggested),
                }
            }
            (None, "morning" | "m") => {
                current = Some(Category::Morning);
                render_category(&progress, Category::Morning);
            }
            (None, "evening" | "e") => {
                current = Some(Category::Evening);
                render_category(&progress, Category::Evening);
            }
            (Some(_), "back" | "b") => {
                current = None;
                render_overview(&progress, suggested);
            }
            (Some(category), input) => {
                if let Ok(index) = input.parse::<usize>() {
                    handle_tap(&progress, category, index);
                } else if !input.is_empty() {
                    println!("commands: <number> | back | reset | quit");
                }
            }
            (None, input) => {
                if !input.is_empty() {
                    println!("commands: morning | evening | reset | quit");
                }
            }
        }
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
