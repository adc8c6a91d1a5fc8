use std::fmt;
use std::path::PathBuf;

use crate::utils::render_args;

/// The external steps a launch can go through, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    ProvisionNeo4j,
    Build,
    Test,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ProvisionNeo4j => "neo4j provisioning",
            Step::Build => "image build",
            Step::Test => "test run",
        };
        f.write_str(name)
    }
}

/// A single external command: program, arguments, extra environment and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub step: Step,
    pub program: String,
    pub args: Vec<String>,
    /// Variables added on top of the inherited environment.
    pub envs: Vec<(String, String)>,
    pub current_dir: Option<PathBuf>,
}

impl Invocation {
    pub fn new(step: Step, program: impl Into<String>) -> Self {
        Self {
            step,
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.current_dir = dir;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env = self
            .envs
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>();
        let line = render_args(
            env.iter()
                .map(String::as_str)
                .chain(std::iter::once(self.program.as_str()))
                .chain(self.args.iter().map(String::as_str)),
        );
        f.write_str(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_a_shell_line() {
        let invocation = Invocation::new(Step::Build, "docker-compose")
            .arg("build")
            .args(["--build-arg", "PIP_DEPS=-e .[dev]", "test-cpu"]);
        assert_eq!(
            invocation.to_string(),
            "docker-compose build --build-arg 'PIP_DEPS=-e .[dev]' test-cpu"
        );
    }

    #[test]
    fn display_prefixes_env_overlay() {
        let mut invocation = Invocation::new(Step::Test, "pytest").arg("-x");
        invocation.envs.push(("CI".to_string(), "1".to_string()));
        assert_eq!(invocation.to_string(), "CI=1 pytest -x");
    }

    #[test]
    fn steps_have_readable_names() {
        assert_eq!(Step::ProvisionNeo4j.to_string(), "neo4j provisioning");
        assert_eq!(Step::Test.to_string(), "test run");
    }
}
