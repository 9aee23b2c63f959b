//! Installer session: one configuration, one context, many programs.
use std::path::Path;

use crate::actions::{Context, Dispatcher};
use crate::config::Config;
use crate::error::InstallError;
use crate::runner::{RunStats, run_program};

/// Owns everything needed to install programs for one run.
///
/// The configuration and context are fixed at construction; `install` may
/// be called repeatedly and relies on skip-by-default to stay idempotent.
#[derive(Debug)]
pub struct Session {
    config: Config,
    ctx: Context,
    dispatcher: Dispatcher,
}

impl Session {
    /// Create a session over an already loaded configuration.
    #[must_use]
    pub fn new(config: Config, ctx: Context) -> Self {
        Self {
            config,
            ctx,
            dispatcher: Dispatcher::default(),
        }
    }

    /// Load the configuration at `config_path`, or locate it under the
    /// context's root, and create a session.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Config`] if no configuration can be found,
    /// read or parsed.
    pub fn load(ctx: Context, config_path: Option<&Path>) -> Result<Self, InstallError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Config::locate(&ctx.root)?,
        };
        let config = Config::load(&path)?;
        ctx.log.debug(&format!(
            "loaded {} program(s) from {}",
            config.programs.len(),
            path.display()
        ));
        Ok(Self::new(config, ctx))
    }

    /// Replace the dispatcher.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Dispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// The loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The kind lookup table.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The run context.
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.ctx
    }

    /// Install `programs` in the given order, or every configured program in
    /// lexicographic order when `programs` is empty.
    ///
    /// Every requested name is checked before anything runs.  Each program
    /// gets one header line; the first failing action aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::UnknownProgram`] for an unconfigured name, or
    /// the first [`InstallError`] raised by a program.
    pub fn install(&self, programs: &[String]) -> Result<RunStats, InstallError> {
        let selected: Vec<&str> = if programs.is_empty() {
            self.config.program_names().collect()
        } else {
            programs.iter().map(String::as_str).collect()
        };

        let mut plan = Vec::with_capacity(selected.len());
        for name in selected {
            let actions = self
                .config
                .program(name)
                .ok_or_else(|| InstallError::UnknownProgram {
                    name: name.to_string(),
                    available: self.config.program_names().collect::<Vec<_>>().join(", "),
                })?;
            plan.push((name, actions));
        }

        let mut total = RunStats::default();
        for (name, actions) in plan {
            self.ctx.log.stage(name);
            let stats = run_program(name, actions, &self.ctx, &self.dispatcher)?;
            total.merge(&stats);
        }
        self.ctx.log.debug(&format!("total: {}", total.summary()));
        Ok(total)
    }
}
