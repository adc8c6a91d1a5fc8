use std::path::PathBuf;

use crate::config::EnvConfig;
use crate::invocation::{Invocation, Step};

/// Sidecar launcher, relative to the working directory.
pub const NEO4J_LAUNCH_SCRIPT: &str = "../test/db/neo4j/launch.sh";
pub const BUILD_TARGET: &str = "test-cpu";
pub const SECURITY_OPT: &str = "seccomp=unconfined";
pub const MARKER_ENV: &str = "PYTEST_CURRENT_TEST=TRUE";
pub const MAXFAIL_FLAG: &str = "--maxfail=1";

/// The ordered list of commands a launch runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    invocations: Vec<Invocation>,
}

impl LaunchPlan {
    pub fn new(config: &EnvConfig, args: &[String], workdir: Option<PathBuf>) -> Self {
        let mut invocations = Vec::with_capacity(3);

        if config.with_neo4j.is_enabled() {
            invocations.push(
                Invocation::new(Step::ProvisionNeo4j, NEO4J_LAUNCH_SCRIPT)
                    .current_dir(workdir.clone()),
            );
        }

        if config.with_build.is_enabled() {
            invocations.push(
                Invocation::new(Step::Build, config.compose_tool.as_str())
                    .arg("build")
                    .args([
                        "--build-arg".to_string(),
                        format!("PYTHON_VERSION={}", config.python_version),
                        "--build-arg".to_string(),
                        format!("PIP_DEPS={}", config.pip_deps),
                        BUILD_TARGET.to_string(),
                    ])
                    .current_dir(workdir.clone()),
            );
        }

        let forwarded = [
            MARKER_ENV.to_string(),
            format!("WITH_NEO4J={}", config.with_neo4j),
            format!("WITH_LINT={}", config.with_lint),
            format!("WITH_TYPECHECK={}", config.with_typecheck),
            format!("WITH_BUILD={}", config.with_build),
        ];
        let mut run = Invocation::new(Step::Test, config.container_tool.as_str())
            .args(["run", "--security-opt", SECURITY_OPT]);
        for env in forwarded {
            run = run.arg("-e").arg(env);
        }
        invocations.push(
            run.arg("--rm")
                .args(config.network())
                .arg(config.image())
                .arg(MAXFAIL_FLAG)
                .args(args.iter().cloned())
                .current_dir(workdir),
        );

        Self { invocations }
    }

    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    pub fn steps(&self) -> Vec<Step> {
        self.invocations.iter().map(|i| i.step).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn config(vars: &[(&str, &str)]) -> EnvConfig {
        EnvConfig::from_vars(vars.iter().copied()).unwrap()
    }

    #[test]
    fn default_plan_builds_then_runs() {
        let plan = LaunchPlan::new(&config(&[]), &args(&["-k", "test_login"]), None);
        assert_eq!(plan.steps(), vec![Step::Build, Step::Test]);

        let build = &plan.invocations()[0];
        assert_eq!(build.program, "docker-compose");
        assert_eq!(
            build.args,
            args(&[
                "build",
                "--build-arg",
                "PYTHON_VERSION=3.6",
                "--build-arg",
                "PIP_DEPS=-e .[dev]",
                "test-cpu",
            ])
        );

        let run = &plan.invocations()[1];
        assert_eq!(run.program, "docker");
        assert_eq!(
            run.args,
            args(&[
                "run",
                "--security-opt",
                "seccomp=unconfined",
                "-e",
                "PYTEST_CURRENT_TEST=TRUE",
                "-e",
                "WITH_NEO4J=0",
                "-e",
                "WITH_LINT=1",
                "-e",
                "WITH_TYPECHECK=1",
                "-e",
                "WITH_BUILD=1",
                "--rm",
                "graphistry/test-cpu:latest",
                "--maxfail=1",
                "-k",
                "test_login",
            ])
        );
    }

    #[test]
    fn neo4j_provisions_first_and_attaches_network() {
        let plan = LaunchPlan::new(&config(&[("WITH_NEO4J", "1")]), &[], None);
        assert_eq!(
            plan.steps(),
            vec![Step::ProvisionNeo4j, Step::Build, Step::Test]
        );

        let provision = &plan.invocations()[0];
        assert_eq!(provision.program, "../test/db/neo4j/launch.sh");
        assert!(provision.args.is_empty());

        let run = &plan.invocations()[2];
        assert!(run.args.contains(&"WITH_NEO4J=1".to_string()));
        let rm = run.args.iter().position(|a| a == "--rm").unwrap();
        assert_eq!(
            &run.args[rm + 1..rm + 4],
            &args(&["--net", "grph_net", "graphistry/test-cpu:latest"])[..]
        );
    }

    #[test]
    fn no_network_flag_without_neo4j() {
        for vars in [vec![], vec![("WITH_NEO4J", "0")]] {
            let plan = LaunchPlan::new(&config(&vars), &[], None);
            let run = plan.invocations().last().unwrap();
            assert!(!run.args.iter().any(|a| a == "--net" || a == "grph_net"));
        }
    }

    #[test]
    fn build_is_skipped_when_disabled() {
        let plan = LaunchPlan::new(&config(&[("WITH_BUILD", "0")]), &[], None);
        assert_eq!(plan.steps(), vec![Step::Test]);
        assert!(plan.invocations()[0]
            .args
            .contains(&"WITH_BUILD=0".to_string()));
    }

    #[test]
    fn build_uses_resolved_arguments() {
        let plan = LaunchPlan::new(
            &config(&[
                ("PYTHON_VERSION", "3.8"),
                ("PIP_DEPS", "graphistry[all]"),
                ("COMPOSE_TOOL", "podman-compose"),
            ]),
            &[],
            None,
        );
        let build = &plan.invocations()[0];
        assert_eq!(build.program, "podman-compose");
        assert!(build.args.contains(&"PYTHON_VERSION=3.8".to_string()));
        assert!(build.args.contains(&"PIP_DEPS=graphistry[all]".to_string()));
        assert_eq!(build.args.last().unwrap(), "test-cpu");
    }

    #[test]
    fn pass_through_arguments_trail_in_order() {
        let passed = args(&["tests/test_plot.py", "-x", "--maxfail=3", "-k", "a or b"]);
        let plan = LaunchPlan::new(
            &config(&[("TEST_CPU_VERSION", "v2")]),
            &passed,
            None,
        );
        let run = plan.invocations().last().unwrap();
        let image = run
            .args
            .iter()
            .position(|a| a == "graphistry/test-cpu:v2")
            .unwrap();
        assert_eq!(run.args[image + 1], "--maxfail=1");
        assert_eq!(&run.args[image + 2..], &passed[..]);
    }

    #[test]
    fn workdir_applies_to_every_step() {
        let dir = PathBuf::from("/src/pygraphistry/docker");
        let plan = LaunchPlan::new(
            &config(&[("WITH_NEO4J", "1")]),
            &[],
            Some(dir.clone()),
        );
        assert!(plan
            .invocations()
            .iter()
            .all(|i| i.current_dir.as_ref() == Some(&dir)));
    }
}
