//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;
use crate::infra::config::YamlConfigStore;
use crate::infra::docker::DockerConnector;
use crate::infra::network::TcpEndpointProbe;

/// Discover and watch network services of containerised workloads
#[derive(Parser)]
#[command(
    name = "fleetprobe",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fleet configuration file [default: ~/.fleetprobe/config.yaml]
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Discover endpoints and poll their reachability
    Watch(commands::watch::WatchArgs),

    /// Remove stale containers labelled lg_cleanup=auto
    Cleanup(commands::cleanup::CleanupArgs),

    /// Check whether a single address and port accept connections
    Probe(commands::probe::ProbeArgs),

    /// Validate the fleet configuration file
    Validate,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            command,
            ..
        } = self;
        let app = AppContext::new(no_color, quiet, json);
        match command {
            Command::Watch(args) => {
                let store = YamlConfigStore::new(config);
                commands::watch::run(
                    &app,
                    &args,
                    &store,
                    DockerConnector,
                    commands::watch::probe_for,
                )
                .await
            }
            Command::Cleanup(args) => commands::cleanup::run(&app, &args, &DockerConnector).await,
            Command::Probe(args) => {
                let probe = match args.connect_timeout() {
                    Some(limit) => TcpEndpointProbe::with_timeout(limit),
                    None => TcpEndpointProbe::new(),
                };
                commands::probe::run(&app, &args, &probe).await
            }
            Command::Validate => {
                let store = YamlConfigStore::new(config);
                commands::validate::run(&app, &store)
            }
            Command::Version => commands::version::run(&app),
        }
    }
}
