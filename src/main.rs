use clap::{Parser, Subcommand};
use invest_sim::api::{
    ProjectArgs, SolveArgs, run_http_server, run_project_command, run_solve_command,
};
use invest_sim::log::init_logging;

#[derive(Parser)]
#[command(
    name = "invest-sim",
    version,
    about = "Investment growth projection and target savings calculator"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project year-end portfolio values
    Project(ProjectArgs),
    /// Solve the contribution needed to reach a target capital
    Solve(SolveArgs),
    /// Serve the JSON API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Commands::Project(args) => run_project_command(&args),
        Commands::Solve(args) => run_solve_command(&args),
        Commands::Serve { port } => {
            if let Err(e) = run_http_server(port).await {
                tracing::error!(error = %e, "server failed");
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
            return;
        }
    };

    match output {
        Ok(text) => print!("{text}"),
        Err(e) => {
            tracing::error!(error = %e, "calculation failed");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
