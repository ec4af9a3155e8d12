use winpilot_core::init_logging;

mod app;
mod commands;
mod server;
mod table;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Default (no flag) = quiet mode, -v/--verbose = verbose mode
    let verbose = matches.get_flag("verbose");
    let config = commands::resolve_config(&matches)?;
    init_logging(!verbose, config.logging.format);

    commands::run_command(&matches, &config).await?;

    Ok(())
}
