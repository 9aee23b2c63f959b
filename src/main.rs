//! `dotsetup` command-line entry point.
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use std::sync::Arc;

use dotsetup::{cli, commands, logging};

/// Set up console and file logging for `command`.
fn start(verbose: bool, command: &str) -> Arc<logging::Logger> {
    let log = logging::Logger::new(command);
    logging::init_subscriber(verbose, command, log.log_path());
    Arc::new(log)
}

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    // Failures are logged by the command itself.
    let result = match args.command {
        cli::Command::Install(opts) => {
            let log = start(args.verbose, "install");
            commands::install::run(&args.global, &opts, &log)
        }
        cli::Command::List => {
            let log = start(args.verbose, "list");
            commands::list::run(&args.global, &log)
        }
        cli::Command::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut cli::Cli::command(),
                "dotsetup",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    };

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
