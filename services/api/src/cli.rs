use crate::commands::{run_evaluate, run_schemes, EvaluateArgs, SchemesArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sarvasahay::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "SarvaSahay",
    about = "Match citizen profiles against government welfare schemes",
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
    /// Evaluate a profile JSON file against the scheme catalog
    Evaluate(EvaluateArgs),
    /// List the schemes in the active catalog
    Schemes(SchemesArgs),
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
        Command::Evaluate(args) => run_evaluate(args),
        Command::Schemes(args) => run_schemes(args),
    }
}
