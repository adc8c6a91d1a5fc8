use std::path::PathBuf;

use crate::config::EnvConfig;
use crate::errors::LauncherError;
use crate::plan::LaunchPlan;
use crate::runner::CommandRunner;

/// Runs the provision, build and test steps of a containerized test run.
pub struct TestLauncher<R> {
    config: EnvConfig,
    runner: R,
    workdir: Option<PathBuf>,
}

impl<R: CommandRunner> TestLauncher<R> {
    pub fn new(config: EnvConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            workdir: None,
        }
    }

    /// Runs every command from `dir` instead of the current directory.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    pub fn plan(&self, args: &[String]) -> LaunchPlan {
        LaunchPlan::new(&self.config, args, self.workdir.clone())
    }

    /// Runs the launch, forwarding `args` to the test container.
    ///
    /// Steps run one after another. The first step that cannot start or exits non-zero
    /// stops the launch, and its error carries that step's exit code.
    pub async fn launch(&self, args: &[String]) -> Result<(), LauncherError> {
        if let Some(dir) = &self.workdir {
            let metadata = tokio::fs::metadata(dir).await?;
            if !metadata.is_dir() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} is not a directory", dir.display()),
                )
                .into());
            }
        }

        log::debug!("resolved configuration: {:?}", self.config);
        let plan = self.plan(args);

        for invocation in plan.invocations() {
            log::info!("{}: {}", invocation.step, invocation);
            let code = self.runner.run(invocation).await?;
            if code != 0 {
                return Err(LauncherError::StepFailed {
                    step: invocation.step,
                    command: invocation.to_string(),
                    code,
                });
            }
        }
        Ok(())
    }
}
