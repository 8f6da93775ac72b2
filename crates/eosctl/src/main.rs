mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use eosctl_core::Node;

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(mut cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Local commands never resolve a device
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "eosctl", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load()?;
            if cli.global.output.is_none() {
                cli.global.output = config::default_output(&cfg);
            }

            let device = config::resolve_device(&cli.global, &cfg)?;
            let node = Node::connect(&device)?;

            tracing::debug!(command = ?cmd, host = %device.host, "dispatching command");
            commands::dispatch(cmd, &node, &cli.global)
        }
    }
}
