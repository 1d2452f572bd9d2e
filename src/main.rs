use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use palaver::core::config;
use palaver::tui;

#[derive(Parser)]
#[command(name = "palaver", about = "Terminal chat for Google's generative language API")]
struct Args {
    /// Model to request completions from (e.g. "gemini-pro")
    #[arg(short, long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to palaver.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("palaver.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("palaver: {e}");
            std::process::exit(2);
        }
    };
    let config = config::resolve(&file_config, args.model.as_deref());

    log::info!("Palaver starting up with model: {}", config.model_name);

    tui::run(config)
}
