use anyhow::Result;
use clap::Parser;
use projection_data::cli::{Cli, CliHandler};
use projection_data::logging::initialize_logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(cli.verbose)?;

    let handler = CliHandler::new(cli.config.as_deref())?;
    handler.handle_command(cli.command)?;

    Ok(())
}
