//! Note Canvas command-line client.
//!
//! Talks to the notes service at NOTE_CANVAS_API_URL
//! (default http://localhost:5000/api) and keeps the session token under
//! NOTE_CANVAS_DATA_DIR.

use anyhow::Result;
use clap::Parser;
use note_canvas::cli::{self, Cli};
use note_canvas::{Config, NoteCanvas};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    log::info!(
        "[CONFIG] API at {}, storage at {}",
        config.api_url,
        config.storage_path().display()
    );

    let app = NoteCanvas::from_config(&config);
    cli::run(cli, &app).await
}
