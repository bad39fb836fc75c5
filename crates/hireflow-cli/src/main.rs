//! Hireflow CLI entry point.
//!
//! Binary name: `hflow`
//!
//! Parses CLI arguments, sets up tracing, wires stores and backend clients,
//! then dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use hireflow_observe::tracing_setup::{
    TracingOptions, filter_for_verbosity, init_tracing, shutdown_tracing,
};

use cli::{Cli, Commands, DraftsCommand};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "hflow", &mut std::io::stdout());
        return Ok(());
    }

    let loaded = state::load_config().await;
    let config = loaded.config;

    init_tracing(&TracingOptions {
        default_filter: filter_for_verbosity(cli.verbose, cli.quiet).to_string(),
        enable_otel: config.enable_otel,
        json: false,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    if let Some(warning) = loaded.warning {
        tracing::warn!("{warning}");
    }

    let result = run(cli, config).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, config: hireflow_types::config::ClientConfig) -> anyhow::Result<()> {
    let state = AppState::init(config, cli.ephemeral).await?;

    match cli.command {
        Commands::Wizard { kind, fresh } => {
            cli::wizard::run_wizard(&state, kind, fresh, cli.json).await?;
        }

        Commands::Drafts { action } => match action {
            DraftsCommand::List => cli::drafts::list_drafts(&state, cli.json).await?,
            DraftsCommand::Show { kind } => cli::drafts::show_draft(&state, kind, cli.json).await?,
            DraftsCommand::Discard { kind, force } => {
                cli::drafts::discard_draft(&state, kind, force, cli.json).await?
            }
        },

        Commands::Login { email } => cli::auth::login(&state, email, cli.json).await?,
        Commands::Logout => cli::auth::logout(&state, cli.json).await?,
        Commands::Role { role } => cli::auth::set_role(&state, role, cli.json).await?,
        Commands::ForgotPassword { email } => {
            cli::auth::forgot_password(&state, email, cli.json).await?
        }
        Commands::ResetPassword { token } => {
            cli::auth::reset_password(&state, &token, cli.json).await?
        }

        Commands::Status => cli::status::status(&state, cli.json).await?,

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
