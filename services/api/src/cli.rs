use crate::commands::{run_check, run_validate, CheckArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use farm_schemes::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Farm Schemes",
    about = "Match farmers to the government welfare schemes they are eligible for",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the scheme catalog from the command line
    Schemes {
        #[command(subcommand)]
        command: SchemesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SchemesCommand {
    /// List the schemes an applicant profile is eligible for
    Check(CheckArgs),
    /// Load the catalog and report rows the rule engine cannot evaluate
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Schemes {
            command: SchemesCommand::Check(args),
        } => run_check(args),
        Command::Schemes {
            command: SchemesCommand::Validate(args),
        } => run_validate(args),
    }
}
