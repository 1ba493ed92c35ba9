use anyhow::Result;
use clap::Parser;
use layerterm::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Routes log::warn!() etc. from the config crate into the debug log file.
    // --log-level takes precedence over LAYERTERM_DEBUG_LEVEL.
    layerterm::debug::init_log_bridge(cli.debug_level());
    log::info!("Starting layerterm {}", layerterm::VERSION);

    let mut stdout = std::io::stdout().lock();
    let result = cli::execute(&cli, &mut stdout);
    if let Err(ref e) = result {
        eprintln!("layerterm: error: {e:#}");
    }
    result
}
