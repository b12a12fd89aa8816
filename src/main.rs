use clap::Parser;
use pdfdesk::core::config::{self, DEFAULT_CONFIG_PATH};
use pdfdesk::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfdesk", about = "Write text documents and convert them to PDF")]
struct Args {
    /// Path to the JSON config file (created with defaults if missing)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to pdfdesk.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("pdfdesk.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("pdfdesk starting up with config {}", args.config.display());

    let config = match config::load_or_init(&args.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("pdfdesk: {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };

    tui::run(config)
}
