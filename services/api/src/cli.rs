use crate::demo::{run_demo, run_submit, run_triage, DemoArgs, SubmitArgs, TriageArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use outreach_intake::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Outreach Intake Service",
    about = "Run the assistance-request intake endpoint and its companion tools",
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
    /// Classify a saved intake record and print the triage result
    Triage(TriageArgs),
    /// Post a saved intake record to a running intake endpoint
    Submit(SubmitArgs),
    /// Run an end-to-end wizard demo against the in-memory repository
    Demo(DemoArgs),
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
        Command::Triage(args) => run_triage(args),
        Command::Submit(args) => run_submit(args).await,
        Command::Demo(args) => run_demo(args),
    }
}
