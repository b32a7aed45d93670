use gigdeck::adapters::ReqwestHttpClient;
use gigdeck::app::{App, AppMessage};
use gigdeck::cli::Cli;
use gigdeck::config::AppConfig;
use gigdeck::error::GigdeckError;
use gigdeck::logging::{default_log_path, init_logging};
use gigdeck::terminal::{setup_panic_hook, TerminalManager};
use gigdeck::ui;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::EventStream;
use futures::StreamExt;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Event loop tick; drives spinners and the background refresh check
const TICK: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();

    color_eyre::install()?;
    setup_panic_hook();

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(e) = init_logging(&log_path, &cli.log_level) {
        eprintln!("Warning: {}", e);
    }

    let config = cli.apply(AppConfig::from_env());
    config.validate().map_err(startup_failure)?;
    tracing::info!(?config, "Starting gigdeck {}", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|source| startup_failure(GigdeckError::Runtime { source }))?;
    let result = runtime.block_on(async {
        let http = Arc::new(ReqwestHttpClient::with_timeout(config.request_timeout));
        let mut app = App::from_config(http, &config);

        let mut manager = TerminalManager::new().map_err(startup_failure)?;
        app.start();
        let result = run_app(manager.terminal(), &mut app).await;
        manager.restore()?;
        result
    });

    if let Err(ref e) = result {
        tracing::error!("gigdeck exited with error: {}", e);
    }
    result
}

/// Log and print a startup failure with its recovery hint.
fn startup_failure(err: GigdeckError) -> color_eyre::Report {
    tracing::error!(category = %err.category(), "Startup failed: {}", err);
    eprintln!("{}", err.user_message());
    eprintln!("{}", err.recovery_hint());
    err.into()
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, &mut *app))?;
            app.needs_redraw = false;
        }

        tokio::select! {
            _ = ticker.tick() => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(event)) => app.handle_terminal_event(event),
                    Some(Err(e)) => tracing::warn!("Terminal event error: {}", e),
                    None => app.quit(),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
