//! swiftfacts CLI entry point.

use clap::Parser;
use swiftfacts::cli::{self, Cli, Commands, EXIT_ERROR};

fn init_logging(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or(if verbose { "debug" } else { "warn" });
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(verbose)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Imports(args) => cli::run_imports(&cli, args),
        Commands::Conformance(args) => cli::run_conformance(&cli, args),
        Commands::StaticUsage(args) => cli::run_static_usage(&cli, args),
        Commands::Initializers(args) => cli::run_initializers(&cli, args),
        Commands::Properties(args) => cli::run_properties(&cli, args),
        Commands::Types(args) => cli::run_types(&cli, args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
