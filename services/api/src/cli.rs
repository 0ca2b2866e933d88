use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use skill_matrix::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Skill Matrix Portal",
    about = "Run and demonstrate the workforce skill matrix service from the command line",
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
    /// Generate dashboard and analytics reports for stakeholder reviews
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommand,
    },
    /// Run an end-to-end CLI demo covering analytics and notifications
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DashboardCommand {
    /// Print the dashboard statistics and analytics rollup
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON dataset file to serve (overrides APP_DATASET)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard {
            command: DashboardCommand::Report(args),
        } => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}
