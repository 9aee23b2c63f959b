//! Command-line interface definition.
use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the declarative installer.
#[derive(Parser, Debug)]
#[command(
    name = "dotsetup",
    about = "Install programs and dotfiles from a declarative config",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Override the tool directory (holds the config file and configs/)
    #[arg(long, global = true)]
    pub root: Option<std::path::PathBuf>,

    /// Use this configuration file instead of <root>/configs.{toml,yml,yaml}
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install the named programs, or every program when none are given
    Install(InstallOpts),
    /// List configured programs and their actions
    List,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Programs to install, in order
    pub programs: Vec<String>,

    /// Overwrite existing destinations instead of skipping them
    #[arg(short, long)]
    pub force: bool,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_all() {
        let cli = Cli::parse_from(["dotsetup", "install"]);
        assert!(matches!(cli.command, Command::Install(ref o) if o.programs.is_empty() && !o.force));
    }

    #[test]
    fn parse_install_programs_in_order() {
        let cli = Cli::parse_from(["dotsetup", "install", "zsh", "vim"]);
        let Command::Install(opts) = cli.command else {
            panic!("expected install");
        };
        assert_eq!(opts.programs, ["zsh", "vim"]);
    }

    #[test]
    fn parse_force() {
        let cli = Cli::parse_from(["dotsetup", "install", "--force", "vim"]);
        let Command::Install(opts) = cli.command else {
            panic!("expected install");
        };
        assert!(opts.force);
        assert_eq!(opts.programs, ["vim"]);
    }

    #[test]
    fn parse_dry_run_short() {
        let cli = Cli::parse_from(["dotsetup", "-n", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_root_and_config_overrides() {
        let cli = Cli::parse_from([
            "dotsetup",
            "--root",
            "/opt/dotsetup",
            "--config",
            "/tmp/alt.yml",
            "list",
        ]);
        assert_eq!(
            cli.global.root,
            Some(std::path::PathBuf::from("/opt/dotsetup"))
        );
        assert_eq!(
            cli.global.config,
            Some(std::path::PathBuf::from("/tmp/alt.yml"))
        );
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["dotsetup", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Command::Completions {
                shell: clap_complete::Shell::Bash
            }
        ));
    }

    #[test]
    fn parse_version_and_verbose() {
        let cli = Cli::parse_from(["dotsetup", "-v", "version"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Version));
    }
}
