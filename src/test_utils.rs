/// This module provides a scriptable stand-in for the container runtime, so launches can be
/// exercised without docker.
#[cfg(any(test, feature = "testing"))]
pub mod launcher_test_utils {
    use std::collections::HashMap;

    use tokio::sync::Mutex;

    use crate::errors::LauncherError;
    use crate::invocation::{Invocation, Step};
    use crate::runner::CommandRunner;

    /// Records every invocation it receives and answers with a scripted exit code.
    ///
    /// Steps without a scripted code succeed.
    ///
    /// # Example
    /// ```rust,ignore
    /// use test_cpu_launcher::config::EnvConfig;
    /// use test_cpu_launcher::invocation::Step;
    /// use test_cpu_launcher::launcher::TestLauncher;
    /// use test_cpu_launcher::test_utils::launcher_test_utils::RecordingRunner;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let runner = RecordingRunner::new().fail_step(Step::Build, 3);
    ///     let launcher = TestLauncher::new(EnvConfig::default(), &runner);
    ///     let error = launcher.launch(&[]).await.unwrap_err();
    ///     assert_eq!(error.exit_code(), 3);
    ///     assert_eq!(runner.steps().await, vec![Step::Build]);
    /// }
    /// ```
    #[derive(Debug, Default)]
    pub struct RecordingRunner {
        codes: HashMap<Step, i32>,
        invocations: Mutex<Vec<Invocation>>,
    }

    impl RecordingRunner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes `step` exit with `code`.
        pub fn fail_step(mut self, step: Step, code: i32) -> Self {
            self.codes.insert(step, code);
            self
        }

        pub async fn invocations(&self) -> Vec<Invocation> {
            self.invocations.lock().await.clone()
        }

        pub async fn steps(&self) -> Vec<Step> {
            self.invocations
                .lock()
                .await
                .iter()
                .map(|invocation| invocation.step)
                .collect()
        }
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, invocation: &Invocation) -> Result<i32, LauncherError> {
            self.invocations.lock().await.push(invocation.clone());
            Ok(self.codes.get(&invocation.step).copied().unwrap_or(0))
        }
    }
}
