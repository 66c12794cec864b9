use std::path::PathBuf;

use clap::{Parser, Subcommand};
use datahub_setup::assign::{self, HubRequest};
use datahub_setup::config::Config;
use datahub_setup::credentials::{CredentialSource, TerminalPrompt};
use datahub_setup::gateway::OracleGateway;
use datahub_setup::io::spreadsheet;
use datahub_setup::model::Document;
use datahub_setup::{Result, SetupError, notify};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|error| SetupError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Assign(args) => {
            let (config, document) = load_inputs(&args)?;
            execute_assign(&config, &document, &args)
        }
        Command::Notify(args) => {
            let (config, document) = load_inputs(&args)?;
            execute_notify(&config, &document, &args)
        }
        Command::Setup(args) => {
            let (config, document) = load_inputs(&args)?;
            execute_assign(&config, &document, &args)?;
            execute_notify(&config, &document, &args)
        }
    }
}

fn load_inputs(args: &SetupArgs) -> Result<(Config, Document)> {
    let config = Config::load(&args.config)?;
    if !args.spreadsheet.exists() {
        return Err(SetupError::MissingInput(args.spreadsheet.clone()));
    }
    let document = spreadsheet::read_document(&args.spreadsheet)?;
    Ok((config, document))
}

fn execute_assign(config: &Config, document: &Document, args: &SetupArgs) -> Result<()> {
    let request = HubRequest {
        name: args.datahub_name.clone(),
        password: args.datahub_password.clone(),
    };
    let mut gateway = OracleGateway::new(config, Box::new(TerminalPrompt));
    assign::run(document, &request, &config.webin, &mut gateway)
}

fn execute_notify(config: &Config, document: &Document, args: &SetupArgs) -> Result<()> {
    let recipients = notify::collect_recipients(document);
    if recipients.is_empty() {
        warn!("spreadsheet lists no contact addresses; nothing to send");
        return Ok(());
    }

    let message = notify::compose(&args.datahub_name, &args.datahub_password);
    let password = TerminalPrompt.password_only("mail relay")?;
    let report = notify::send(
        &message,
        &recipients,
        &config.admin_email,
        config.email_port,
        &password,
    )?;
    info!(
        sent = report.sent.len(),
        failed = report.failed.len(),
        "notification run finished"
    );
    if !report.all_sent() {
        return Err(SetupError::Delivery {
            failed: report.failed.len(),
            total: recipients.len(),
        });
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Assign an ENA data hub and notify its contacts."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register the data hub and link its Webin accounts.
    Assign(SetupArgs),
    /// Send credential emails to every contact in the spreadsheet.
    Notify(SetupArgs),
    /// Assign the data hub, then notify its contacts.
    Setup(SetupArgs),
}

#[derive(clap::Args)]
struct SetupArgs {
    /// Input spreadsheet for the data hub assignment.
    #[arg(long = "spreadsheet")]
    spreadsheet: PathBuf,

    /// Name of the data hub to be assigned.
    #[arg(long = "datahub_name")]
    datahub_name: String,

    /// Password for the data hub to be assigned.
    #[arg(long = "datahub_password")]
    datahub_password: String,

    /// Tool configuration file (TOML, or legacy KEY=value lines).
    #[arg(long = "config", default_value = "config.toml")]
    config: PathBuf,
}
