use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use test_cpu_launcher::config::EnvConfig;
use test_cpu_launcher::errors::LauncherError;
use test_cpu_launcher::launcher::TestLauncher;
use test_cpu_launcher::runner::{CommandRunner, DryRunRunner, ProcessRunner};

/// Build and run the graphistry test-cpu container.
///
/// Options come from PYTHON_VERSION, PIP_DEPS, WITH_NEO4J, WITH_LINT, WITH_TYPECHECK,
/// WITH_BUILD and TEST_CPU_VERSION.
#[derive(Parser, Debug)]
#[command(name = "test-cpu-launcher")]
struct Cli {
    /// Print the commands that would run without running them.
    #[arg(long)]
    dry_run: bool,

    /// Directory every command runs from.
    #[arg(short = 'C', long, value_name = "DIR")]
    workdir: Option<PathBuf>,

    /// Arguments passed through to the test run.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

impl Cli {
    async fn exec(self) -> Result<()> {
        let config = EnvConfig::from_env()
            .map_err(LauncherError::from)
            .context("could not resolve launch options from the environment")?;
        if self.dry_run {
            log::info!("dry run: commands are logged, not executed");
            self.launch(config, DryRunRunner).await
        } else {
            self.launch(config, ProcessRunner).await
        }
    }

    async fn launch<R: CommandRunner>(&self, config: EnvConfig, runner: R) -> Result<()> {
        let mut launcher = TestLauncher::new(config, runner);
        if let Some(dir) = &self.workdir {
            launcher = launcher.with_workdir(dir);
        }
        log::debug!("plan: {:?}", launcher.plan(&self.args));
        Ok(launcher.launch(&self.args).await?)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().exec().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            let code = error
                .downcast_ref::<LauncherError>()
                .map_or(1, LauncherError::exit_code);
            ExitCode::from(code.clamp(1, 255) as u8)
        }
    }
}
