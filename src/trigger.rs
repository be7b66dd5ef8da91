use crate::entry::Entry;
use crate::error::ConfigError;
use crate::format::FormatPlan;
use regex::Regex;
use std::io::Write;
use std::process::Command;

/// A trigger bound to a command template.
///
/// `matches` sees the raw input line, never the rendered output, so triggers
/// work independently of output formatting and even when parsing fails.
pub trait Executor {
    fn matches(&self, line: &str) -> bool;
    fn execute(&self, entry: Option<&Entry>, diag: &mut dyn Write);
}

/// Runs an external command through the platform shell when its trigger
/// pattern matches. Entry fields are substituted into the command template
/// the same way the output format substitutes them.
pub struct CommandExecutor {
    trigger: Regex,
    command: FormatPlan,
    debug: bool,
}

impl CommandExecutor {
    pub fn new(trigger: Regex, command: &str, debug: bool) -> Self {
        CommandExecutor {
            trigger,
            command: FormatPlan::compile(command),
            debug,
        }
    }
}

impl Executor for CommandExecutor {
    fn matches(&self, line: &str) -> bool {
        self.trigger.is_match(line)
    }

    /// Synchronous: the pipeline waits for the command, so commands fire in
    /// line order and never overlap. The command's own output goes to the
    /// diagnostic stream, keeping stdout clean for formatted lines. A
    /// failing command never stops the pipeline.
    fn execute(&self, entry: Option<&Entry>, diag: &mut dyn Write) {
        let command = self.command.render(entry);
        match shell(&command).output() {
            Ok(output) => {
                let _ = diag.write_all(&output.stdout);
                let _ = diag.write_all(&output.stderr);
                if !output.status.success() && self.debug {
                    let _ = writeln!(
                        diag,
                        "lcfmt: command '{}' exited with {}",
                        command, output.status
                    );
                }
            }
            Err(e) => {
                if self.debug {
                    let _ = writeln!(diag, "lcfmt: failed to run command '{}': {}", command, e);
                }
            }
        }
    }
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// Installed when no triggers are configured, so the driver keeps a single
/// iterate-executors path.
pub struct NoopExecutor;

impl Executor for NoopExecutor {
    fn matches(&self, _line: &str) -> bool {
        false
    }

    fn execute(&self, _entry: Option<&Entry>, _diag: &mut dyn Write) {}
}

/// Build the executor set from the configured trigger patterns and commands.
/// Zero triggers installs the no-op executor; a non-empty trigger list must
/// pair one-to-one with commands.
pub fn build_executors(
    triggers: &[String],
    commands: &[String],
    debug: bool,
) -> Result<Vec<Box<dyn Executor>>, ConfigError> {
    if triggers.is_empty() {
        return Ok(vec![Box::new(NoopExecutor)]);
    }
    if triggers.len() != commands.len() {
        return Err(ConfigError::TriggerCommandMismatch {
            triggers: triggers.len(),
            commands: commands.len(),
        });
    }
    let mut executors: Vec<Box<dyn Executor>> = Vec::with_capacity(triggers.len());
    for (pattern, command) in triggers.iter().zip(commands) {
        let trigger = Regex::new(pattern).map_err(|e| ConfigError::InvalidTrigger {
            pattern: pattern.clone(),
            source: e,
        })?;
        executors.push(Box::new(CommandExecutor::new(trigger, command, debug)));
    }
    Ok(executors)
}
