// Todo list terminal client.
//
// Startup sequence:
// 1. Load config
// 2. Initialize tracing (log to file, not terminal)
// 3. Build the HTTP todo service and the runtime driver
// 4. Run the TUI until the user quits

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use todo_app::config;
use todo_app::runtime::Driver;
use todo_app::service::HttpTodoService;
use todo_app::tui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config().context("failed to load configuration")?;

    init_tracing(&config.log_dir)?;
    info!(api_url = %config.api_url, "todo client starting up");

    let service = HttpTodoService::new(&config.api_url, config.request_timeout());
    let (driver, responses) = Driver::new(Arc::new(service));

    tui::run(driver, responses).await?;

    info!("todo client shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing(log_dir: &std::path::Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_file = std::fs::File::create(log_dir.join("todo.log")).context("failed to create log file")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_app=info,todo_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("failed to set tracing subscriber")?;

    Ok(())
}
