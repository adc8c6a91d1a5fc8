use tokio::process::Command;

use crate::errors::LauncherError;
use crate::invocation::Invocation;
use crate::utils::exit_code;

/// Executes one external command and reports its exit code.
///
/// A non-zero code is returned as `Ok`; deciding whether it is fatal is up to the caller.
/// `Err` is reserved for commands that could not be started.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, invocation: &Invocation) -> Result<i32, LauncherError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    async fn run(&self, invocation: &Invocation) -> Result<i32, LauncherError> {
        (**self).run(invocation).await
    }
}

/// Runs commands as child processes that share the launcher's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, invocation: &Invocation) -> Result<i32, LauncherError> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|source| LauncherError::SpawnFailed {
                command: invocation.to_string(),
                source,
            })?;
        Ok(exit_code(status))
    }
}

/// Reports success for every command without running it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

impl CommandRunner for DryRunRunner {
    async fn run(&self, _invocation: &Invocation) -> Result<i32, LauncherError> {
        Ok(0)
    }
}
