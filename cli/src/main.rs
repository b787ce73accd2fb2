//! fleetprobe - discover and watch network services of containerised workloads

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fleetprobe::cli::Cli;
use fleetprobe::output::{OutputContext, json};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (json, no_color) = (cli.json, cli.no_color);
    if let Err(e) = cli.run().await {
        let message = format!("{e:#}");
        let errors = OutputContext::new(no_color, false);
        if json {
            match json::format_error(&message, "COMMAND_FAILED") {
                Ok(obj) => println!("{obj}"),
                Err(_) => errors.error(&message),
            }
        } else {
            errors.error(&message);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
