use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pagemodal::app::{App, PageReport};
use pagemodal::config;
use pagemodal::fixture::PageFixture;
use pagemodal::modal::CallbackRegistry;

mod cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting pagemodal");

    let args = cli::Args::parse();

    let config = match &args.config {
        Some(path) => config::load_from(path)?,
        None => config::load()?,
    };
    let fixture = PageFixture::load(&args.page)?;
    let api_delay = args.api_delay_ms.map(Duration::from_millis);

    let mut app = App::new(&config, &fixture, CallbackRegistry::with_builtins(), api_delay);
    let report = app.run(fixture.events.clone()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &PageReport) {
    for line in &report.transcript {
        println!("{line}");
    }
    println!();
    for modal in &report.modals {
        let player = if modal.player { " (player)" } else { "" };
        println!("{}/{}: {:?}{}", modal.section, modal.id, modal.state, player);
    }
    println!(
        "scroll locked: {}, focus: {}",
        report.scroll_locked,
        report.focused.as_deref().unwrap_or("none")
    );
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("pagemodal").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "pagemodal.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
