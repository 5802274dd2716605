use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

mod controller;
mod model;
mod ui;

use clap::Parser;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use controller::Controller;
use model::{Model, Status, ViewerConfig};
use pageable::domain::PageableError;
use pageable::window::DEFAULT_WINDOW_SIZE;
use ui::TableUI;

#[derive(Parser, Debug)]
#[command(name = "pageable", version, about = "Paged, sortable table viewer")]
struct Cli {
    /// Tabular file to view (csv, parquet or arrow)
    file: String,

    /// Rows shown per page
    #[arg(long, default_value_t = 20)]
    per_page: usize,

    /// Number of page buttons shown at once
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Sort by this column before the first render
    #[arg(long)]
    sort_by: Option<String>,
}

fn main() -> ExitCode {
    match run() {
        Err(e) => {
            ratatui::restore();
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => {
            ratatui::restore();
            ExitCode::SUCCESS
        }
    }
}

// The terminal belongs to the UI, so logs go to a file when asked for
fn init_tracing() {
    if let Ok(path) = std::env::var("PAGEABLE_LOG")
        && let Ok(file) = std::fs::File::create(path)
    {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false),
            )
            .with(ErrorLayer::default())
            .init();
    }
}

fn run() -> Result<(), PageableError> {
    let cli = Cli::parse();
    init_tracing();

    let path = shellexpand::full(&cli.file)
        .map_err(|e| PageableError::LoadingFailed(e.to_string()))?;
    let config = ViewerConfig::default()
        .with_per_page(cli.per_page.max(1))
        .with_window_size(cli.window_size);

    info!("Loading {path} ...");
    let mut model = Model::load(PathBuf::from(path.as_ref()), &config)?;
    if let Some(field) = cli.sort_by.as_deref() {
        model.sort_by_column(field)?;
    }

    let ui = TableUI::new(&config);
    let controller = Controller::new(&config);
    let mut terminal = ratatui::init();

    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event()? {
            model.update(message);
        }
    }

    Ok(())
}
