//! Imports a JSON exam file into the exam database.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use exam_engine::{models::import::ExamImport, store};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

#[derive(Parser)]
#[command(name = "import_questions", version, about = "Import JSON exam questions into the exam database")]
struct Cli {
    /// Path to the JSON file to import
    json_file: PathBuf,

    /// SQLite database URL
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://test_engine.db")]
    db: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let content = std::fs::read_to_string(&cli.json_file)
        .with_context(|| format!("reading {}", cli.json_file.display()))?;
    let exam: ExamImport = serde_json::from_str(&content).context(
        "Invalid JSON format. Must include exam_name, exam_code, and questions.",
    )?;

    let options = SqliteConnectOptions::from_str(&cli.db)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .with_context(|| format!("opening {}", cli.db))?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database initialized at {}", cli.db);

    let summary = store::import::import_exam(&pool, &exam).await?;

    tracing::info!(
        "Successfully imported {} questions into {} ({}), test bank {}",
        summary.questions_imported,
        summary.exam_name,
        summary.exam_code,
        summary.test_bank_id
    );

    Ok(())
}
