//! Command: list configured programs.
use anyhow::Result;
use std::sync::Arc;

use crate::actions::Dispatcher;
use crate::cli::GlobalOpts;
use crate::config::Config;
use crate::logging::{Log, Logger};

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let sink = Arc::clone(log);
    let result = super::open_session(global, sink, false)
        .map(|session| render(session.config(), session.dispatcher(), log.as_ref()));
    super::report_failure(result, log.as_ref())
}

/// Log one header per program and one line per action.
///
/// Kinds without an executor are reported as warnings; they would only
/// fail once `install` reaches them.
pub fn render(config: &Config, dispatcher: &Dispatcher, log: &dyn Log) {
    for (name, actions) in &config.programs {
        log.stage(name);
        for (i, action) in actions.iter().enumerate() {
            let line = format!("{}. {} {}", i + 1, action.kind, action.params);
            if dispatcher.dispatch(&action.kind).is_ok() {
                log.info(&line);
            } else {
                log.warn(&format!("{line} (unknown kind)"));
            }
        }
    }
}
