//! Live command executors.

use std::process::Command;

use crate::error::PortError;
use crate::ports::command::{CommandExecutor, CommandOutput, Invocation};

/// Spawns the CLI as a child process.
///
/// The first argument is the program to run; the session environment is
/// applied on top of the inherited one.
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation<'_>) -> Result<CommandOutput, PortError> {
        let (program, args) =
            invocation.args.split_first().ok_or("cannot execute an empty command")?;
        let output = Command::new(program).args(args).envs(invocation.env).output()?;
        Ok(CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Runs a CLI that lives in the test process.
///
/// The closure receives the whole invocation, so a Rust CLI can route its
/// HTTP traffic through `invocation.context.http` and be intercepted.
pub struct InProcessExecutor<F> {
    run: F,
}

impl<F> InProcessExecutor<F>
where
    F: Fn(&Invocation<'_>) -> Result<CommandOutput, PortError> + Send + Sync,
{
    /// Wraps the closure that implements the CLI.
    pub fn new(run: F) -> Self {
        Self { run }
    }
}

impl<F> CommandExecutor for InProcessExecutor<F>
where
    F: Fn(&Invocation<'_>) -> Result<CommandOutput, PortError> + Send + Sync,
{
    fn execute(&self, invocation: &Invocation<'_>) -> Result<CommandOutput, PortError> {
        (self.run)(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ServiceContext;
    use std::collections::BTreeMap;

    fn run_with(executor: &dyn CommandExecutor, args: &[&str]) -> Result<CommandOutput, PortError> {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let mut env = BTreeMap::new();
        env.insert("CLIMOCK_TEST_VALUE".to_string(), "from-session".to_string());
        let context = ServiceContext::live(std::env::temp_dir().join("climock_exec_test"));
        executor.execute(&Invocation { args: &args, env: &env, context: &context })
    }

    #[test]
    fn process_executor_captures_output_and_env() {
        let result =
            run_with(&ProcessExecutor, &["sh", "-c", "echo $CLIMOCK_TEST_VALUE; exit 3"]).unwrap();
        assert_eq!(result.exit_code, 3);
        assert_eq!(result.stdout.trim(), "from-session");
    }

    #[test]
    fn process_executor_rejects_empty_args() {
        assert!(run_with(&ProcessExecutor, &[]).is_err());
    }

    #[test]
    fn in_process_executor_sees_arguments() {
        let executor = InProcessExecutor::new(|inv: &Invocation<'_>| {
            Ok(CommandOutput { exit_code: 0, stdout: inv.args.join(" "), stderr: String::new() })
        });
        let result = run_with(&executor, &["cli", "vm", "list"]).unwrap();
        assert_eq!(result.stdout, "cli vm list");
    }
}
