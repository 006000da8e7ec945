//! retbro CLI
//!
//! Command-line front end for browsing ROM catalogs, looking up game info,
//! and handing titles to a web player.

mod cli_types;
mod commands;
mod error;
mod logging;
mod spinner;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::AppContext;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Drive one async command on a single-threaded runtime.
fn block_on(fut: impl Future<Output = Result<(), CliError>>) -> Result<(), CliError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(fut)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = AppContext::new(cli.offline, cli.quiet);

    match cli.command {
        Commands::Systems { source } => {
            block_on(commands::systems::run_systems(&ctx, &source.source))
        }
        Commands::Titles {
            source,
            system,
            filter,
        } => block_on(commands::titles::run_titles(
            &ctx,
            &source.source,
            &system,
            filter.as_deref(),
        )),
        Commands::Info {
            source,
            system,
            title,
        } => block_on(commands::info::run_info(&ctx, &source.source, &system, &title)),
        Commands::Launch {
            source,
            system,
            title,
            page,
        } => block_on(commands::launch::run_launch(
            &ctx,
            &source.source,
            &system,
            &title,
            page.as_deref(),
        )),
        Commands::Browse { source } => block_on(commands::browse::run_browse(&ctx, &source.source)),
        Commands::Extract {
            url,
            system,
            output,
        } => block_on(commands::extract::run_extract(
            &ctx,
            &url,
            &system,
            output.as_deref(),
        )),
        Commands::Config { action } => match action {
            ConfigAction::Show => {
                commands::config::run_config_show(&ctx);
                Ok(())
            }
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(force),
        },
    }
}
