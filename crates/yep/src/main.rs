mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// YEP: a modular business application server
#[derive(Parser, Debug)]
#[command(name = "yep", author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the YEP server of the project in PROJECT_DIR
    ///
    /// Generates the project's start program from the modules its
    /// configuration package depends on, then compiles and runs it.
    Server(cli::ServerArgs),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    match args.command {
        Commands::Server(server) => cli::run_server(&server),
    }
}
