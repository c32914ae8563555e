use std::process;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use kubetopo::cli::{
    check_settings, format_check_result, load_settings, render_settings, reparse_with_env_file,
    Cli, Commands,
};

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // Env-backed flags are read at parse time, so parse again once the
    // .env file is loaded
    let cli = match reparse_with_env_file(cli, std::env::args_os()) {
        Ok(cli) => cli,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    match cli.command {
        Commands::Resolve(args) => {
            let output = load_settings(&cli.kube)
                .and_then(|settings| render_settings(&settings, args.output));
            match output {
                Ok(text) => print!("{}", text),
                Err(e) => {
                    error!("Failed to resolve topology: {}", e);
                    process::exit(1);
                }
            }
        }
        Commands::Check => {
            let result = check_settings(load_settings(&cli.kube));
            print!("{}", format_check_result(&result));
            if let Some(ref e) = result.error {
                error!("Topology check failed: {}", e);
                process::exit(1);
            }
        }
    }
}
